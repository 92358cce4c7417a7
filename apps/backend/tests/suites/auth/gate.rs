use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App, HttpResponse};
use gatekeeper::middleware::{BearerAuth, RequestTrace};
use gatekeeper::{AppError, CurrentPrincipal, SecurityConfig};
use gatekeeper_test_support::problem_details::assert_unauthorized;
use serde_json::Value;

use crate::support::auth::{
    app_data, bearer, mint_test_token, mint_token_issued_ago, test_security,
};

#[actix_web::test]
async fn test_valid_token_reaches_protected_route() {
    let security = test_security();
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(app_data(security.clone()))
            .configure(gatekeeper::routes::configure),
    )
    .await;

    let token = mint_test_token(42_i64, &security);
    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().get("x-request-id").is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["principal_id"], 42);
    assert_eq!(
        body["expires_at"].as_i64().unwrap() - body["issued_at"].as_i64().unwrap(),
        3600
    );
}

#[actix_web::test]
async fn test_string_principal_is_preserved() {
    let security = test_security();
    let app = test::init_service(
        App::new()
            .app_data(app_data(security.clone()))
            .configure(gatekeeper::routes::configure),
    )
    .await;

    let token = mint_test_token("user-abc", &security);
    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["principal_id"], "user-abc");
}

#[actix_web::test]
async fn test_missing_header_is_rejected() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(app_data(test_security()))
            .configure(gatekeeper::routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/private/me").to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_unauthorized(resp).await;
    assert_ne!(problem.trace_id, "unknown");
}

#[actix_web::test]
async fn test_malformed_headers_are_rejected() {
    let security = test_security();
    let token = mint_test_token(42_i64, &security);
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(app_data(security))
            .configure(gatekeeper::routes::configure),
    )
    .await;

    let malformed_headers = vec![
        "Token abc123".to_string(),
        "Bearer".to_string(),
        "Bearer ".to_string(),
        "Basic abc123".to_string(),
        "abc123".to_string(),
        format!("bearer {token}"),
        format!("Bearer  {token}"),
        format!("Bearer {token} extra"),
        token.clone(),
    ];

    for header_value in malformed_headers {
        let req = test::TestRequest::get()
            .uri("/api/private/me")
            .insert_header(("Authorization", header_value))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_unauthorized(resp).await;
    }
}

#[actix_web::test]
async fn test_bad_tokens_get_identical_rejections() {
    let security = test_security();
    let valid = mint_test_token(42_i64, &security);

    let (prefix, _) = valid.rsplit_once('.').unwrap();
    let tampered = format!("{prefix}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
    let expired = mint_token_issued_ago(42_i64, Duration::from_secs(2 * 3600), &security);
    let foreign = mint_test_token(42_i64, &SecurityConfig::new("another-secret"));

    let bad_tokens = vec![
        "invalid.jwt.token".to_string(),
        "not_even_close_to_jwt".to_string(),
        "a.b.c.d".to_string(),
        tampered,
        expired,
        foreign,
    ];

    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(app_data(security))
            .configure(gatekeeper::routes::configure),
    )
    .await;

    let mut rejections = Vec::new();
    for token in bad_tokens {
        let req = test::TestRequest::get()
            .uri("/api/private/me")
            .insert_header(("Authorization", bearer(&token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        let problem = assert_unauthorized(resp).await;
        rejections.push((problem.type_, problem.title, problem.detail, problem.code));
    }

    // No cause leaks: everything but the trace id is identical.
    assert!(rejections.windows(2).all(|pair| pair[0] == pair[1]));
}

#[actix_web::test]
async fn test_rejected_request_never_reaches_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let handler_calls = calls.clone();

    let app = test::init_service(
        App::new().app_data(app_data(test_security())).service(
            web::scope("/guarded").wrap(BearerAuth).route(
                "",
                web::get().to(move || {
                    let calls = handler_calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        HttpResponse::Ok().finish()
                    }
                }),
            ),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/guarded")
        .insert_header(("Authorization", "Bearer invalid.jwt.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_missing_app_state_is_internal_error() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api/private")
                .wrap(BearerAuth)
                .configure(gatekeeper::routes::private::configure_routes),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/private/me")
        .insert_header(("Authorization", "Bearer a.b.c"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INTERNAL");
}

async fn whoami(principal: CurrentPrincipal) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body(principal.id.to_string()))
}

#[actix_web::test]
async fn test_current_principal_outside_gate_is_unauthorized() {
    let security = test_security();
    let token = mint_test_token(42_i64, &security);
    let app = test::init_service(
        App::new()
            .app_data(app_data(security))
            .route("/ungated", web::get().to(whoami)),
    )
    .await;

    // Even a valid token is not read by the extractor itself.
    let req = test::TestRequest::get()
        .uri("/ungated")
        .insert_header(("Authorization", bearer(&token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_unauthorized(resp).await;
}

#[actix_web::test]
async fn test_health_is_open() {
    let app = test::init_service(
        App::new()
            .app_data(app_data(test_security()))
            .configure(gatekeeper::routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
}
