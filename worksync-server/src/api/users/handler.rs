//! Employee Directory Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    Employee, EmployeeQuery, EmployeeRegister, Role, RoleChange, SalaryChange, StatusChange,
    VerificationToggle,
};

use crate::auth::{Action, Actor, SessionContext};
use crate::core::ServerState;
use crate::db::repository::{RepoError, employee};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_email, validate_optional_text,
    validate_required_text, validate_salary,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Register the calling identity as an employee
///
/// Self-registration may pick `employee` or `hr`; the configured bootstrap
/// email becomes `admin`.
pub async fn register(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(payload): Json<EmployeeRegister>,
) -> AppResult<Json<Employee>> {
    validate_email(&session.email)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.photo_url, "photo_url", MAX_URL_LEN)?;
    validate_optional_text(&payload.designation, "designation", MAX_NAME_LEN)?;
    validate_optional_text(&payload.bank_account_no, "bank_account_no", MAX_SHORT_TEXT_LEN)?;

    let role = if state.config.is_bootstrap_admin(&session.email) {
        Role::Admin
    } else if payload.role == Role::Admin {
        security_log!("WARN", "admin_self_assign", email = session.email.clone());
        return Err(AppError::permission_denied("Admin role cannot be self-assigned"));
    } else {
        payload.role
    };

    if employee::find_by_uid(&state.pool, &session.uid).await?.is_some()
        || employee::find_by_email(&state.pool, &session.email)
            .await?
            .is_some()
    {
        return Err(AppError::new(ErrorCode::EmployeeAlreadyRegistered));
    }

    let created = employee::create(&state.pool, &session.uid, &session.email, &payload, role)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmployeeAlreadyRegistered),
            other => other.into(),
        })?;

    tracing::info!(
        employee_id = created.id,
        role = created.role.as_str(),
        "Employee registered"
    );
    Ok(Json(created))
}

/// List employees (filters: role, status, verified)
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    actor.authorize(Action::ViewEmployees)?;
    let employees = employee::find_all(&state.pool, &query).await?;
    Ok(Json(employees))
}

/// Own profile
pub async fn me(actor: Actor) -> AppResult<Json<Employee>> {
    Ok(Json(actor.employee))
}

/// Employee details
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    actor.authorize_self_or(id, Action::ViewEmployees)?;
    let found = find_employee(&state, id).await?;
    Ok(Json(found))
}

/// Change role (admin)
pub async fn change_role(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<RoleChange>,
) -> AppResult<Json<Employee>> {
    actor.authorize(Action::ChangeRole)?;
    reject_self(&actor, id)?;
    find_employee(&state, id).await?;

    let updated = employee::update_role(&state.pool, id, payload.role).await?;
    security_log!(
        "INFO",
        "role_changed",
        employee_id = id,
        role = payload.role.as_str(),
        by = actor.email().to_string()
    );
    Ok(Json(updated))
}

/// Change employment status (admin)
pub async fn change_status(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<StatusChange>,
) -> AppResult<Json<Employee>> {
    actor.authorize(Action::ChangeStatus)?;
    reject_self(&actor, id)?;
    find_employee(&state, id).await?;

    let updated = employee::update_status(&state.pool, id, payload.status).await?;
    security_log!(
        "INFO",
        "status_changed",
        employee_id = id,
        status = payload.status.as_str(),
        by = actor.email().to_string()
    );
    Ok(Json(updated))
}

/// Adjust hourly rate (admin)
pub async fn adjust_salary(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<SalaryChange>,
) -> AppResult<Json<Employee>> {
    actor.authorize(Action::AdjustSalary)?;
    validate_salary(payload.salary)?;
    find_employee(&state, id).await?;

    let updated = employee::update_salary(&state.pool, id, payload.salary).await?;
    tracing::info!(employee_id = id, salary = payload.salary, "Salary adjusted");
    Ok(Json(updated))
}

/// Set the verification flag (hr, admin)
pub async fn toggle_verification(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<VerificationToggle>,
) -> AppResult<Json<Employee>> {
    actor.authorize(Action::ToggleVerification)?;
    let target = find_employee(&state, id).await?;
    if target.role != Role::Employee {
        return Err(AppError::validation("Only employees can be verified"));
    }

    let updated = employee::set_verified(&state.pool, id, payload.is_verified).await?;
    tracing::info!(
        employee_id = id,
        is_verified = payload.is_verified,
        by = %actor.email(),
        "Verification updated"
    );
    Ok(Json(updated))
}

async fn find_employee(state: &ServerState, id: i64) -> AppResult<Employee> {
    employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
        })
}

fn reject_self(actor: &Actor, id: i64) -> AppResult<()> {
    if actor.id() == id {
        return Err(AppError::new(ErrorCode::CannotModifySelf));
    }
    Ok(())
}
