//! Payment request workflow
//!
//! Every mutation runs in one transaction. Creation takes SQLite's write lock
//! first (employee row touch) so the gate checks and the insert see the same
//! state; `uq_payment_request_pending` turns any residual race into
//! [`PayrollError::PaymentPending`].

use shared::models::{
    EmployeePayrollSummary, PaymentCreate, PaymentRequest, PaymentStatus, PendingPaymentCheck,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::PayrollError;
use super::owed;
use super::transition::{self, CreateGate, PaymentEvent};
use crate::auth::Actor;
use crate::db::repository::{RepoError, employee, payment, worksheet};

/// Create a pending payment request for the employee named in `data`.
pub async fn create_payment(
    pool: &SqlitePool,
    requester: &Actor,
    data: &PaymentCreate,
) -> Result<PaymentRequest, PayrollError> {
    if !(1..=12).contains(&data.month) {
        return Err(PayrollError::InvalidPeriod(format!(
            "month must be between 1 and 12, got {}",
            data.month
        )));
    }
    if !(2000..=9999).contains(&data.year) {
        return Err(PayrollError::InvalidPeriod(format!(
            "year out of range: {}",
            data.year
        )));
    }

    let email = data.email.trim().to_lowercase();
    let target = employee::find_by_email(pool, &email)
        .await?
        .ok_or_else(|| PayrollError::EmployeeNotFound(email.clone()))?;

    let mut tx = pool.begin().await?;

    // Write first: holds the database write lock until commit
    if !employee::touch(&mut *tx, target.id).await? {
        return Err(PayrollError::EmployeeNotFound(email));
    }
    let target = employee::find_by_id(&mut *tx, target.id)
        .await?
        .ok_or_else(|| PayrollError::EmployeeNotFound(email.clone()))?;

    let has_pending = payment::has_pending(&mut *tx, target.id).await?;
    let summary = owed::summarize(&mut *tx, &target).await?;

    let amount = transition::check_create(&CreateGate {
        is_active: target.is_active(),
        is_verified: target.is_verified,
        has_pending,
        owed: summary.total_owed,
        requested: data.amount,
    })?;

    let now = now_millis();
    let request = PaymentRequest {
        id: snowflake_id(),
        employee_id: target.id,
        email: target.email.clone(),
        amount,
        status: PaymentStatus::Pending,
        requested_by: requester.email().to_string(),
        approved_by: None,
        month: data.month,
        year: data.year,
        hourly_rate: target.salary,
        hours_covered: summary.unpaid_hours,
        balance_due: summary.total_owed,
        paid_date: None,
        rejected_at: None,
        rejected_by: None,
        created_at: now,
        updated_at: now,
    };

    match payment::insert(&mut *tx, &request).await {
        Ok(()) => {}
        Err(RepoError::Duplicate(_)) => return Err(PayrollError::PaymentPending),
        Err(e) => return Err(e.into()),
    }
    let claimed = worksheet::claim_unclaimed(&mut *tx, target.id, request.id).await?;

    tx.commit().await?;

    tracing::info!(
        payment_id = request.id,
        employee_id = target.id,
        amount = request.amount,
        claimed_entries = claimed,
        requested_by = %request.requested_by,
        "Payment request created"
    );
    Ok(request)
}

/// `pending → paid`, stamping `paid_date` and `approved_by`. Irreversible.
pub async fn approve_payment(
    pool: &SqlitePool,
    approver: &Actor,
    id: i64,
) -> Result<PaymentRequest, PayrollError> {
    let mut tx = pool.begin().await?;

    if !payment::mark_paid(&mut *tx, id, approver.email(), now_millis()).await? {
        return Err(explain_rejected_transition(&mut *tx, id, PaymentEvent::Approve).await);
    }
    let updated = payment::find_by_id(&mut *tx, id)
        .await?
        .ok_or(PayrollError::NotFound(id))?;

    tx.commit().await?;

    tracing::info!(
        payment_id = id,
        employee_id = updated.employee_id,
        amount = updated.amount,
        approved_by = %approver.email(),
        "Payment approved"
    );
    Ok(updated)
}

/// `pending → rejected`; claimed worksheet entries are released.
pub async fn reject_payment(
    pool: &SqlitePool,
    approver: &Actor,
    id: i64,
) -> Result<PaymentRequest, PayrollError> {
    let mut tx = pool.begin().await?;

    if !payment::mark_rejected(&mut *tx, id, approver.email(), now_millis()).await? {
        return Err(explain_rejected_transition(&mut *tx, id, PaymentEvent::Reject).await);
    }
    let released = worksheet::release(&mut *tx, id).await?;
    let updated = payment::find_by_id(&mut *tx, id)
        .await?
        .ok_or(PayrollError::NotFound(id))?;

    tx.commit().await?;

    tracing::info!(
        payment_id = id,
        employee_id = updated.employee_id,
        released_entries = released,
        rejected_by = %approver.email(),
        "Payment rejected"
    );
    Ok(updated)
}

/// The conditional update matched nothing: report why
async fn explain_rejected_transition(
    conn: &mut sqlx::SqliteConnection,
    id: i64,
    event: PaymentEvent,
) -> PayrollError {
    match payment::find_by_id(conn, id).await {
        Ok(Some(current)) => match transition::next_status(current.status, event) {
            Err(e) => e,
            Ok(_) => PayrollError::NotPending(current.status),
        },
        Ok(None) => PayrollError::NotFound(id),
        Err(e) => e.into(),
    }
}

/// Whether the employee has a request awaiting approval
pub async fn check_pending(
    pool: &SqlitePool,
    email: &str,
) -> Result<PendingPaymentCheck, PayrollError> {
    let email = email.trim().to_lowercase();
    let target = employee::find_by_email(pool, &email)
        .await?
        .ok_or_else(|| PayrollError::EmployeeNotFound(email.clone()))?;
    let has_pending_payment = payment::has_pending(pool, target.id).await?;
    Ok(PendingPaymentCheck {
        email: target.email,
        has_pending_payment,
    })
}

/// Owed summary for one employee by email
pub async fn owed_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<shared::models::OwedSummary, PayrollError> {
    let email = email.trim().to_lowercase();
    let target = employee::find_by_email(pool, &email)
        .await?
        .ok_or_else(|| PayrollError::EmployeeNotFound(email.clone()))?;
    let mut conn = pool.acquire().await?;
    Ok(owed::summarize(&mut *conn, &target).await?)
}

/// Active staff with owed balance and pending flag (HR payroll view)
pub async fn payroll_summary(pool: &SqlitePool) -> Result<Vec<EmployeePayrollSummary>, PayrollError> {
    let staff = employee::find_active_staff(pool).await?;
    let mut conn = pool.acquire().await?;

    let mut rows = Vec::with_capacity(staff.len());
    for member in staff {
        let summary = owed::summarize(&mut *conn, &member).await?;
        let has_pending_payment = payment::has_pending(&mut *conn, member.id).await?;
        rows.push(EmployeePayrollSummary {
            employee: member,
            total_hours: summary.total_hours,
            total_paid: summary.total_paid,
            total_owed: summary.total_owed,
            has_pending_payment,
        });
    }
    Ok(rows)
}
