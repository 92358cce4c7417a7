use actix_web::web;

use crate::middleware::BearerAuth;

pub mod health;
pub mod private;

/// Register all routes. Everything under `/api/private` sits behind the
/// bearer gate; `/health` is open.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api/private")
            .wrap(BearerAuth)
            .configure(private::configure_routes),
    );
}
