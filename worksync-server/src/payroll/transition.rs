//! Payment request state machine
//!
//! ```text
//!   none ──create──▶ pending ──approve──▶ paid (terminal)
//!                       │
//!                       └──reject──▶ rejected (archived, employee back to none)
//! ```
//!
//! Pure functions; the service applies them inside a transaction and the
//! database guards (partial unique index, conditional updates) back them up.

use rust_decimal::Decimal;
use shared::models::PaymentStatus;

use super::PayrollError;
use super::owed::{round_money, to_decimal, to_f64};

/// Admin decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEvent {
    Approve,
    Reject,
}

/// Next status for `event`, or why the request cannot take it
pub fn next_status(
    current: PaymentStatus,
    event: PaymentEvent,
) -> Result<PaymentStatus, PayrollError> {
    match (current, event) {
        (PaymentStatus::Pending, PaymentEvent::Approve) => Ok(PaymentStatus::Paid),
        (PaymentStatus::Pending, PaymentEvent::Reject) => Ok(PaymentStatus::Rejected),
        (PaymentStatus::Paid, _) => Err(PayrollError::AlreadyPaid),
        (status, _) => Err(PayrollError::NotPending(status)),
    }
}

/// Everything the create gate looks at, read under the write lock
#[derive(Debug, Clone)]
pub struct CreateGate {
    pub is_active: bool,
    pub is_verified: bool,
    pub has_pending: bool,
    pub owed: f64,
    /// Explicit amount; `None` pays the full owed balance
    pub requested: Option<f64>,
}

/// Check the create preconditions in order and return the amount to request.
///
/// Order: fired → not verified → payment pending → nothing owed → amount bounds.
pub fn check_create(gate: &CreateGate) -> Result<f64, PayrollError> {
    if !gate.is_active {
        return Err(PayrollError::EmployeeFired);
    }
    if !gate.is_verified {
        return Err(PayrollError::NotVerified);
    }
    if gate.has_pending {
        return Err(PayrollError::PaymentPending);
    }

    let owed = to_decimal(gate.owed);
    if owed <= Decimal::ZERO {
        return Err(PayrollError::NothingOwed);
    }

    let Some(requested) = gate.requested else {
        return Ok(to_f64(owed));
    };
    if !requested.is_finite() || requested <= 0.0 {
        return Err(PayrollError::InvalidAmount(format!(
            "amount must be a positive number, got {requested}"
        )));
    }
    let amount = to_decimal(round_money(requested));
    if amount <= Decimal::ZERO {
        return Err(PayrollError::InvalidAmount(format!(
            "amount rounds to zero: {requested}"
        )));
    }
    if amount > owed {
        return Err(PayrollError::ExceedsOwed {
            requested: to_f64(amount),
            owed: to_f64(owed),
        });
    }
    Ok(to_f64(amount))
}
