//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.
//! `api-server print-schema` writes the GraphQL SDL to stdout and exits.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::graphql::build_schema;
use api_server::handlers;
use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;
use api_server::telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    if std::env::args().nth(1).as_deref() == Some("print-schema") {
        let service = quill_core::PostService::new(
            std::sync::Arc::new(quill_infra::InMemoryPostRepository::new()),
            config.service.clone(),
        );
        println!("{}", build_schema(service).sdl());
        return Ok(());
    }

    init_telemetry(&TelemetryConfig::from_env())?;

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;

    HttpServer::new(move || {
        App::new()
            .wrap(api_server::cors())
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
