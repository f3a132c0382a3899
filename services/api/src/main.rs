mod error;
mod person;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use dossier_common::types::ServiceInfo;
use dossier_config::{init_tracing, AppConfig};
use dossier_db::person::pg_repository::PgPersonRepository;
use dossier_enrich::{DemographicsClient, DemographicsConfig};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use person::service::PersonService;

#[derive(Clone)]
pub struct AppState {
    pub persons: PersonService<PgPersonRepository, DemographicsClient>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo::new("dossier-api"))
}

async fn metrics() -> impl IntoResponse {
    let body = "\
# HELP dossier_up Service up indicator\n\
# TYPE dossier_up gauge\n\
dossier_up 1\n\
# HELP dossier_info Service info\n\
# TYPE dossier_info gauge\n\
dossier_info{service=\"dossier-api\",version=\"0.1.0\"} 1\n";

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/metrics", get(metrics))
        .merge(person::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("failed to load config");
    init_tracing(&config.log_level);
    tracing::info!(service = "dossier-api", "starting");

    let pool = dossier_db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");
    dossier_db::ensure_schema(&pool)
        .await
        .expect("failed to apply database schema");

    let classifier = DemographicsClient::new(DemographicsConfig::from_env())
        .expect("failed to build classification client");

    let state = AppState {
        persons: PersonService::new(PgPersonRepository::new(pool), classifier),
    };

    let app = build_router(state);
    let addr: SocketAddr = config.bind_addr().parse().expect("invalid bind address");

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
