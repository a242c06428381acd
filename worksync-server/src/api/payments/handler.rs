//! Payroll Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    EmployeePayrollSummary, OwedSummary, PaymentCreate, PaymentQuery, PaymentRequest,
    PendingPaymentCheck,
};

use crate::auth::{Action, Actor};
use crate::core::ServerState;
use crate::db::repository::{employee, payment};
use crate::payroll;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Owed amount for one employee
pub async fn owed(
    State(state): State<ServerState>,
    actor: Actor,
    Path(email): Path<String>,
) -> AppResult<Json<OwedSummary>> {
    actor.authorize(Action::ViewOwed)?;
    let summary = payroll::owed_by_email(&state.pool, &email).await?;
    Ok(Json(summary))
}

/// Whether a request is awaiting approval for the employee
pub async fn check_pending(
    State(state): State<ServerState>,
    actor: Actor,
    Path(email): Path<String>,
) -> AppResult<Json<PendingPaymentCheck>> {
    actor.authorize(Action::ViewOwed)?;
    let check = payroll::check_pending(&state.pool, &email).await?;
    Ok(Json(check))
}

/// Active staff with owed balance
pub async fn summary(
    State(state): State<ServerState>,
    actor: Actor,
) -> AppResult<Json<Vec<EmployeePayrollSummary>>> {
    actor.authorize(Action::ViewOwed)?;
    let rows = payroll::payroll_summary(&state.pool).await?;
    Ok(Json(rows))
}

/// Open a payment request
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<PaymentRequest>> {
    actor.authorize(Action::CreatePayment)?;
    let request = payroll::create_payment(&state.pool, &actor, &payload).await?;
    Ok(Json(request))
}

/// All payment requests (filter: status)
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
    Query(query): Query<PaymentQuery>,
) -> AppResult<Json<Vec<PaymentRequest>>> {
    actor.authorize(Action::ViewPayroll)?;
    let requests = payment::find_all(&state.pool, query.status).await?;
    Ok(Json(requests))
}

/// Approve a pending request
pub async fn approve(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentRequest>> {
    actor.authorize(Action::ApprovePayment)?;
    let request = payroll::approve_payment(&state.pool, &actor, id).await?;
    Ok(Json(request))
}

/// Reject a pending request
pub async fn reject(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentRequest>> {
    actor.authorize(Action::RejectPayment)?;
    let request = payroll::reject_payment(&state.pool, &actor, id).await?;
    Ok(Json(request))
}

/// Payment history of one employee
pub async fn history(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<PaymentRequest>>> {
    actor.authorize_self_or(id, Action::ViewEmployees)?;
    if employee::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::with_message(
            ErrorCode::EmployeeNotFound,
            format!("Employee {id} not found"),
        ));
    }
    let requests = payment::find_by_employee(&state.pool, id).await?;
    Ok(Json(requests))
}
