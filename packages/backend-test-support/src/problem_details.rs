//! Assertions for the Problem Details error contract.
//!
//! Kept independent of gatekeeper's own types so the tests check the wire
//! contract rather than the implementation.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the server's Problem Details body.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert that raw response parts form a Problem Details response with the
/// expected status and code, and that the trace id header matches the body.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let problem: ProblemDetailsLike = serde_json::from_slice(body_bytes).unwrap_or_else(|_| {
        panic!(
            "Failed to parse error body as ProblemDetails. Raw body: {}",
            String::from_utf8_lossy(body_bytes)
        )
    });

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    problem
}

/// Assert the uniform authentication rejection: 401, code `UNAUTHORIZED`,
/// fixed detail, `WWW-Authenticate: Bearer`, and a trace id shared by body,
/// `x-trace-id` and `x-request-id` when the latter is present.
pub async fn assert_unauthorized<B>(resp: ServiceResponse<B>) -> ProblemDetailsLike
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();

    let www_auth = headers
        .get(WWW_AUTHENTICATE)
        .expect("401 responses must have WWW-Authenticate header");
    assert_eq!(www_auth.to_str().unwrap(), "Bearer");

    let body = actix_web::test::read_body(resp).await;
    let problem = assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
    );
    assert_eq!(problem.detail, "Authentication required");

    if let Some(request_id) = headers.get("x-request-id") {
        assert_eq!(request_id.to_str().unwrap(), problem.trace_id);
    }

    problem
}
