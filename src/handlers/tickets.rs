use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::tickets as store;
use crate::models::{CreateTicket, TicketResponse, UpdateTicket};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, message, success};

const TICKET_NOT_FOUND: &str = "Ticket not found";

/// Non-numeric ids can never match a row, so they are reported as missing.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(TICKET_NOT_FOUND.to_string()))
}

pub async fn list_tickets(State(state): State<AppState>) -> Result<Response, AppError> {
    let tickets: Vec<TicketResponse> = store::list(&state.pool)
        .await?
        .into_iter()
        .map(TicketResponse::from)
        .collect();

    Ok(success(tickets).into_response())
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let ticket = store::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(TICKET_NOT_FOUND.to_string()))?;

    Ok(success(TicketResponse::from(ticket)).into_response())
}

pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicket>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(new_ticket) = payload?;
    new_ticket.validate().map_err(AppError::ValidationError)?;

    let ticket = store::insert(&state.pool, new_ticket).await?;
    tracing::info!(ticket_id = ticket.id, "Ticket created");

    Ok(created(TicketResponse::from(ticket)).into_response())
}

pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTicket>, JsonRejection>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let mut ticket = store::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(TICKET_NOT_FOUND.to_string()))?;

    let Json(patch) = payload?;
    patch.validate().map_err(AppError::ValidationError)?;
    patch.apply_to(&mut ticket);

    let ticket = store::save(&state.pool, &ticket)
        .await?
        .ok_or_else(|| AppError::NotFound(TICKET_NOT_FOUND.to_string()))?;
    tracing::info!(ticket_id = ticket.id, "Ticket updated");

    Ok(success(TicketResponse::from(ticket)).into_response())
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    if !store::soft_delete(&state.pool, id).await? {
        return Err(AppError::NotFound(TICKET_NOT_FOUND.to_string()));
    }
    tracing::info!(ticket_id = id, "Ticket deleted");

    Ok(message("Ticket deleted successfully").into_response())
}
