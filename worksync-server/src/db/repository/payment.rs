//! Payment Request Repository

use super::RepoResult;
use shared::models::{PaymentRequest, PaymentStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, employee_id, email, amount, status, requested_by, approved_by, month, year, hourly_rate, hours_covered, balance_due, paid_date, rejected_at, rejected_by, created_at, updated_at";

pub async fn find_by_id(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<PaymentRequest>> {
    let sql = format!("SELECT {COLUMNS} FROM payment_request WHERE id = ?");
    let request = sqlx::query_as::<_, PaymentRequest>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(request)
}

/// All payment requests, newest first
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<PaymentStatus>,
) -> RepoResult<Vec<PaymentRequest>> {
    let requests = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {COLUMNS} FROM payment_request WHERE status = ? ORDER BY created_at DESC"
            );
            sqlx::query_as::<_, PaymentRequest>(&sql)
                .bind(status)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("SELECT {COLUMNS} FROM payment_request ORDER BY created_at DESC");
            sqlx::query_as::<_, PaymentRequest>(&sql)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(requests)
}

/// Payment history of one employee, newest first
pub async fn find_by_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> RepoResult<Vec<PaymentRequest>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM payment_request WHERE employee_id = ? ORDER BY year DESC, month DESC, created_at DESC"
    );
    let requests = sqlx::query_as::<_, PaymentRequest>(&sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await?;
    Ok(requests)
}

pub async fn has_pending(executor: impl SqliteExecutor<'_>, employee_id: i64) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM payment_request WHERE employee_id = ? AND status = 'pending')",
    )
    .bind(employee_id)
    .fetch_one(executor)
    .await?;
    Ok(exists)
}

/// Sum of approved (paid) amounts
pub async fn total_paid(executor: impl SqliteExecutor<'_>, employee_id: i64) -> RepoResult<f64> {
    let total: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) FROM payment_request WHERE employee_id = ? AND status = 'paid'",
    )
    .bind(employee_id)
    .fetch_one(executor)
    .await?;
    Ok(total)
}

/// Shortfall left by partial payments.
///
/// Each paid request settles `hours_covered` at its recorded `hourly_rate`
/// plus whatever was carried into it, so the running shortfall is the value
/// of all settled hours minus everything paid. Never negative.
pub async fn carried_balance(executor: impl SqliteExecutor<'_>, employee_id: i64) -> RepoResult<f64> {
    let carried: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(hours_covered * COALESCE(hourly_rate, 0) - amount), 0) AS REAL) \
         FROM payment_request WHERE employee_id = ? AND status = 'paid'",
    )
    .bind(employee_id)
    .fetch_one(executor)
    .await?;
    Ok(carried.max(0.0))
}

/// Insert a new request row. A second pending row for the same employee
/// violates `uq_payment_request_pending` and surfaces as `RepoError::Duplicate`.
pub async fn insert(executor: impl SqliteExecutor<'_>, request: &PaymentRequest) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO payment_request (id, employee_id, email, amount, status, requested_by, month, year, \
         hourly_rate, hours_covered, balance_due, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(request.id)
    .bind(request.employee_id)
    .bind(&request.email)
    .bind(request.amount)
    .bind(request.status)
    .bind(&request.requested_by)
    .bind(request.month)
    .bind(request.year)
    .bind(request.hourly_rate)
    .bind(request.hours_covered)
    .bind(request.balance_due)
    .bind(request.created_at)
    .bind(request.updated_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// `pending → paid`. Returns false when the row is missing or not pending.
pub async fn mark_paid(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    approved_by: &str,
    paid_date: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE payment_request SET status = 'paid', approved_by = ?1, paid_date = ?2, updated_at = ?2 \
         WHERE id = ?3 AND status = 'pending'",
    )
    .bind(approved_by)
    .bind(paid_date)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// `pending → rejected`. Returns false when the row is missing or not pending.
pub async fn mark_rejected(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    rejected_by: &str,
    rejected_at: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE payment_request SET status = 'rejected', rejected_by = ?1, rejected_at = ?2, updated_at = ?2 \
         WHERE id = ?3 AND status = 'pending'",
    )
    .bind(rejected_by)
    .bind(rejected_at)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(rows.rows_affected() > 0)
}
