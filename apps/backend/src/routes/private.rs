use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::auth::PrincipalId;
use crate::error::AppError;
use crate::extractors::CurrentPrincipal;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub principal_id: PrincipalId,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Protected endpoint that returns the caller's identity
async fn me(principal: CurrentPrincipal) -> Result<HttpResponse, AppError> {
    let response = MeResponse {
        principal_id: principal.id.clone(),
        issued_at: principal.claims.issued_at,
        expires_at: principal.claims.expires_at,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::get().to(me)));
}
