use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod controller;
mod domain;
mod dto;
mod middleware;
mod repository;
mod service;
mod util;

use config::Settings;
use controller::{AuthController, SnippetController};
use middleware::RequestId;
use repository::{PgSnippetRepository, PgUserRepository};
use service::{AuthService, SnippetService};
use util::error::InternalError;
use util::{AppError, ResponseBuilder};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snipbin=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().unwrap_or_else(|_| Settings::default());

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.connection_string())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to connect to postgres");
            AppError::from(InternalError::Database)
        })?;

    let snippet_service = SnippetService::new(PgSnippetRepository::new(pool.clone()));
    let auth_service = AuthService::new(PgUserRepository::with_work_factor(
        pool.clone(),
        settings.auth.password_work_factor,
    ));

    tracing::info!(
        "Starting snipbin backend server on {}:{}",
        settings.application.host,
        settings.application.port
    );

    let bind_addr = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );

    HttpServer::new(move || {
        let snippet_controller = SnippetController::new(snippet_service.clone());
        let auth_controller = AuthController::new(auth_service.clone());
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .service(
                web::scope("/api/v1")
                    .route("/health", web::get().to(health_check))
                    .configure(|cfg| SnippetController::configure(cfg, snippet_controller))
                    .configure(|cfg| AuthController::configure(cfg, auth_controller)),
            )
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}

async fn health_check() -> Result<actix_web::HttpResponse, AppError> {
    #[derive(serde::Serialize)]
    struct HealthStatus {
        status: String,
        service: String,
        version: String,
    }

    ResponseBuilder::ok(HealthStatus {
        status: "healthy".to_string(),
        service: "snipbin backend".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
