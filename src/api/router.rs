//! API router.
//!
//! Returns a composable `Router` mounting every endpoint under `/api/`,
//! plus a JSON 404 fallback and the CORS policy from configuration.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config::AppConfig;
use crate::state::AppState;

/// Build the API router.
pub fn api_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    let cors = cors_layer(&ctx.state.config);

    Router::new()
        .route(
            "/api/appointments/available-slots",
            get(endpoints::appointments::available_slots),
        )
        .route(
            "/api/appointments/book-appointment",
            post(endpoints::appointments::book),
        )
        .route(
            "/api/opd/generate-ticket/:ticket_id",
            get(endpoints::opd::generate_ticket),
        )
        .route("/api/health", get(endpoints::health::check))
        .fallback(route_not_found)
        .with_state(ctx)
        .layer(cors)
}

/// JSON fallback for unknown routes.
async fn route_not_found() -> ApiError {
    ApiError::NotFound("API route not found".into())
}

/// CORS policy from the configured origin list. A `*` entry allows any
/// origin; otherwise only the listed origins are echoed back.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
