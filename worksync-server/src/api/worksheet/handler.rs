//! Worksheet Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use shared::models::{ProgressQuery, WorksheetEntry, WorksheetEntryCreate, WorksheetEntryUpdate};

use crate::auth::{Action, Actor};
use crate::core::ServerState;
use crate::db::repository::worksheet;
use crate::utils::time::{month_range, validate_not_future, year_range};
use crate::utils::validation::{MAX_TASK_LEN, validate_hours, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Own worksheet entries
pub async fn list_own(
    State(state): State<ServerState>,
    actor: Actor,
) -> AppResult<Json<Vec<WorksheetEntry>>> {
    let entries = worksheet::find_by_employee(&state.pool, actor.id()).await?;
    Ok(Json(entries))
}

/// Entries of one employee by email (self, hr, admin)
pub async fn list_by_email(
    State(state): State<ServerState>,
    actor: Actor,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<WorksheetEntry>>> {
    let email = email.trim().to_lowercase();
    if email != actor.email() {
        actor.authorize(Action::ViewProgress)?;
    }
    let entries = worksheet::find_filtered(&state.pool, Some(&email), None).await?;
    Ok(Json(entries))
}

/// Log work
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(payload): Json<WorksheetEntryCreate>,
) -> AppResult<Json<WorksheetEntry>> {
    actor.authorize(Action::LogWork)?;
    validate_required_text(&payload.task, "task", MAX_TASK_LEN)?;
    validate_hours(payload.hours_worked)?;
    validate_not_future(payload.date)?;

    let entry = worksheet::create(&state.pool, &actor.employee, &payload).await?;
    tracing::debug!(
        entry_id = entry.id,
        employee_id = actor.id(),
        hours = entry.hours_worked,
        "Work logged"
    );
    Ok(Json(entry))
}

/// Edit an own entry that is not yet claimed by a payment request
pub async fn update(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<WorksheetEntryUpdate>,
) -> AppResult<Json<WorksheetEntry>> {
    actor.authorize(Action::LogWork)?;
    if let Some(task) = &payload.task {
        validate_required_text(task, "task", MAX_TASK_LEN)?;
    }
    if let Some(hours) = payload.hours_worked {
        validate_hours(hours)?;
    }
    if let Some(date) = payload.date {
        validate_not_future(date)?;
    }

    owned_unlocked(&state, &actor, id).await?;
    let updated = worksheet::update_unclaimed(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::WorksheetEntryLocked))?;
    Ok(Json(updated))
}

/// Delete an own entry that is not yet claimed by a payment request
pub async fn delete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    actor.authorize(Action::LogWork)?;
    owned_unlocked(&state, &actor, id).await?;
    if !worksheet::delete_unclaimed(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::WorksheetEntryLocked));
    }
    Ok(Json(true))
}

/// Progress view over all entries (hr, admin)
///
/// `month` narrows to one month of `year` (default: current year);
/// `year` alone covers the whole year.
pub async fn progress(
    State(state): State<ServerState>,
    actor: Actor,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<Vec<WorksheetEntry>>> {
    actor.authorize(Action::ViewProgress)?;

    let range: Option<(NaiveDate, NaiveDate)> = match (query.month, query.year) {
        (Some(month), year) => Some(month_range(year, month)?),
        (None, Some(year)) => Some(year_range(year)?),
        (None, None) => None,
    };
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let entries = worksheet::find_filtered(&state.pool, email, range).await?;
    Ok(Json(entries))
}

async fn owned_unlocked(state: &ServerState, actor: &Actor, id: i64) -> AppResult<()> {
    let entry = worksheet::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::WorksheetEntryNotFound))?;
    if entry.employee_id != actor.id() {
        return Err(AppError::new(ErrorCode::WorksheetNotOwner));
    }
    if entry.is_locked() {
        return Err(AppError::new(ErrorCode::WorksheetEntryLocked));
    }
    Ok(())
}
