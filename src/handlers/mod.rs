use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::success;

pub mod tickets;
pub mod upload;

pub use tickets::{create_ticket, delete_ticket, get_ticket, list_tickets, update_ticket};
pub use upload::upload_image;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "OK",
        service: "tocket-api",
    };

    success(payload).into_response()
}
