//! Bearer-token authentication gate.
//!
//! Wrap a scope with [`BearerAuth`] to require `Authorization: Bearer <token>`.
//! Admitted requests carry a [`Principal`] in their extensions; every
//! rejection is the same 401 Problem Details response regardless of cause.
//! The cause is only logged.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::auth::{verify_access_token, Principal, TokenError};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::trace_ctx;

const BEARER_PREFIX: &str = "Bearer ";

/// Internal reason a request was not authenticated. Never sent to clients.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("missing or malformed bearer credential")]
    MissingBearer,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token names no principal")]
    MissingPrincipal,
}

impl AuthFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthFailure::MissingBearer => "missing_bearer",
            AuthFailure::Token(e) => e.kind(),
            AuthFailure::MissingPrincipal => "missing_principal",
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly `Bearer ` followed by a non-empty token with no
/// whitespace. The scheme is matched case-sensitively.
pub fn parse_bearer(header_value: Option<&HeaderValue>) -> Result<&str, AuthFailure> {
    let value = header_value
        .ok_or(AuthFailure::MissingBearer)?
        .to_str()
        .map_err(|_| AuthFailure::MissingBearer)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthFailure::MissingBearer)?;

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthFailure::MissingBearer);
    }

    Ok(token)
}

/// Resolve the principal behind an `Authorization` header value.
pub fn authenticate(
    header_value: Option<&HeaderValue>,
    security: &SecurityConfig,
) -> Result<Principal, AuthFailure> {
    let token = parse_bearer(header_value)?;
    let claims = verify_access_token(token, security)?;
    Principal::from_claims(claims).ok_or(AuthFailure::MissingPrincipal)
}

pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware { service }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return reject(req, AppError::internal("AppState not available"));
        };

        let outcome = authenticate(
            req.headers().get(header::AUTHORIZATION),
            &app_state.security,
        );

        match outcome {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(failure) => {
                let trace_id = trace_ctx::trace_id();
                match failure {
                    AuthFailure::MissingBearer => debug!(
                        reason = failure.kind(),
                        url.path = %req.path(),
                        trace_id = %trace_id,
                        "rejecting unauthenticated request"
                    ),
                    _ => warn!(
                        reason = failure.kind(),
                        url.path = %req.path(),
                        trace_id = %trace_id,
                        "rejecting request with unusable bearer token"
                    ),
                }
                reject(req, AppError::unauthorized())
            }
        }
    }
}

/// Short-circuit with `err`. The response is rendered inside the returned
/// future so it runs in the request's trace scope.
fn reject<B: 'static>(
    req: ServiceRequest,
    err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    Box::pin(async move { Ok(req.error_response(err).map_into_right_body()) })
}
