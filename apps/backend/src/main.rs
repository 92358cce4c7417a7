use actix_web::{web, App, HttpServer};
use gatekeeper::config::ServerConfig;
use gatekeeper::middleware::{RequestTrace, StructuredLogger};
use gatekeeper::routes;
use gatekeeper::state::AppState;
use gatekeeper::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (APP_JWT_SECRET is required; see config::server for the rest).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        token_ttl_secs = config.security.token_ttl.as_secs(),
        "starting gatekeeper"
    );

    let data = web::Data::new(AppState::new(config.security.clone()));

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
