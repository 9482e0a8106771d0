use axum::{extract::State, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use configs::ServiceKind;

use crate::openapi;
use crate::state::AppState;

pub mod directory;
pub mod library;
pub mod profiles;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health { status: "ok", service: state.kind.name() })
}

/// Build the router for one service: its resource routes plus health, docs,
/// CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let kind = state.kind;
    let api = match kind {
        ServiceKind::Library => library::router(),
        ServiceKind::Profiles => profiles::router(),
        ServiceKind::Directory => directory::router(),
    };
    let docs = SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::for_service(kind));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(docs)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport errors
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
