use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::AppState;

mod exercises;
mod ping;
mod plan;
mod schedule;
mod users;
mod weight_history;

/// All API routes with request tracing and CORS for the configured origin
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let origin: HeaderValue = state.args.cors_origin.parse()?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .merge(ping::router())
        .merge(users::router())
        .merge(exercises::router())
        .merge(plan::router())
        .merge(weight_history::router())
        .merge(schedule::router())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state))
}
