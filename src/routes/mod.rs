use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::upload::UPLOADS_ROUTE;
use crate::handlers::{
    create_ticket, delete_ticket, get_ticket, health_check, list_tickets, update_ticket,
    upload_image,
};
use crate::state::AppState;
use crate::utils::error::AppError;

/// Bundled assets carry content hashes in their names.
const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

pub fn create_routes(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes(&config))
        .merge(static_routes(&config))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .with_state(state)
}

fn api_routes(config: &Config) -> Router<AppState> {
    Router::new()
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/tickets/upload",
            post(upload_image).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route(
            "/tickets/:id",
            get(get_ticket)
                .put(update_ticket)
                .patch(update_ticket)
                .delete(delete_ticket),
        )
        .fallback(api_not_found)
}

/// Frontend bundle, uploaded images, and the single-page-app fallback: any path that
/// is not a file in the bundle gets `index.html`.
fn static_routes(config: &Config) -> Router<AppState> {
    let frontend_dir = &config.frontend_dir;

    let assets = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static(ASSET_CACHE_CONTROL),
        ))
        .service(ServeDir::new(frontend_dir.join("assets")));

    let spa = ServeDir::new(frontend_dir).fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .nest_service("/assets", assets)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&config.uploads_dir))
        .fallback_service(spa)
}

async fn api_not_found() -> Response {
    AppError::NotFound("Route not found".to_string()).into_response()
}
