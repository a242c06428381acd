//! Contact Query Handlers

use axum::{Json, extract::State};
use shared::models::{ContactQuery, ContactQueryCreate};

use crate::auth::{Action, Actor, SessionContext};
use crate::core::ServerState;
use crate::db::repository::{contact, employee};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_DETAILS_LEN, MAX_NAME_LEN, validate_contact_designation, validate_email,
    validate_required_text,
};

/// Submit the contact form
///
/// Open to any signed-in identity; the query is linked to the employee
/// record when the caller has registered.
pub async fn submit(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(payload): Json<ContactQueryCreate>,
) -> AppResult<Json<ContactQuery>> {
    validate_email(&session.email)?;
    validate_required_text(&payload.heading, "heading", MAX_NAME_LEN)?;
    validate_required_text(&payload.details, "details", MAX_DETAILS_LEN)?;
    validate_contact_designation(payload.designation)?;

    let employee_id = employee::find_by_uid(&state.pool, &session.uid)
        .await?
        .map(|e| e.id);
    let query = contact::create(&state.pool, &session.email, employee_id, &payload).await?;

    tracing::info!(
        query_id = query.id,
        registered = employee_id.is_some(),
        "Contact query received"
    );
    Ok(Json(query))
}

/// Contact inbox, newest first (admin)
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
) -> AppResult<Json<Vec<ContactQuery>>> {
    actor.authorize(Action::ViewQueries)?;
    let queries = contact::find_all(&state.pool).await?;
    Ok(Json(queries))
}
