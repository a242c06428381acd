//! Owed amount calculation
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.
//!
//! `total_owed = max(0, unpaid_hours × salary + carried_balance)`
//!
//! Hours claimed by a paid request are settled at the rate recorded on that
//! request, so later rate changes only price work that is still unpaid. A
//! partial payment leaves `balance_due - amount` on the request, which is
//! carried into the next balance.

use rust_decimal::prelude::*;
use shared::models::{Employee, OwedSummary};
use sqlx::SqliteConnection;

use crate::db::repository::{RepoResult, payment, worksheet};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; NaN / infinity become zero
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal to f64, rounded to 2 places (half-up)
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary amount to cents
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Owed balance from aggregated inputs. A missing rate prices unpaid hours at zero.
pub fn compute_owed(unpaid_hours: f64, salary: Option<f64>, carried: f64) -> f64 {
    let rate = salary.map(to_decimal).unwrap_or(Decimal::ZERO);
    let earned = to_decimal(unpaid_hours) * rate;
    let owed = earned + to_decimal(carried);
    to_f64(owed.max(Decimal::ZERO))
}

/// Aggregate an employee's hours and paid requests into an [`OwedSummary`].
///
/// Takes a connection so the payment service can run it inside its
/// transaction; handlers pass a pooled connection.
pub async fn summarize(conn: &mut SqliteConnection, employee: &Employee) -> RepoResult<OwedSummary> {
    let total_hours = worksheet::total_hours(&mut *conn, employee.id).await?;
    let unpaid_hours = worksheet::unpaid_hours(&mut *conn, employee.id).await?;
    let total_paid = payment::total_paid(&mut *conn, employee.id).await?;
    let carried = payment::carried_balance(&mut *conn, employee.id).await?;

    Ok(OwedSummary {
        employee_id: employee.id,
        email: employee.email.clone(),
        salary: employee.salary,
        total_hours,
        unpaid_hours,
        total_paid: round_money(total_paid),
        carried_balance: round_money(carried),
        total_owed: compute_owed(unpaid_hours, employee.salary, carried),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_owed() {
        // 10h at $20/h, nothing paid
        assert_eq!(compute_owed(10.0, Some(20.0), 0.0), 200.0);
    }

    #[test]
    fn test_settled_hours_owe_nothing() {
        assert_eq!(compute_owed(0.0, Some(20.0), 0.0), 0.0);
    }

    #[test]
    fn test_carried_shortfall_is_added() {
        // $50 left over from a partial payment, 5 new hours at $20
        assert_eq!(compute_owed(5.0, Some(20.0), 50.0), 150.0);
        assert_eq!(compute_owed(0.0, Some(20.0), 50.0), 50.0);
    }

    #[test]
    fn test_missing_rate_prices_hours_at_zero() {
        assert_eq!(compute_owed(10.0, None, 0.0), 0.0);
        assert_eq!(compute_owed(10.0, None, 25.0), 25.0);
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(compute_owed(10.0, Some(20.0), -500.0), 0.0);
    }

    #[test]
    fn test_decimal_precision() {
        // 0.3h at 33.33 = 9.999 → 10.00
        assert_eq!(compute_owed(0.3, Some(33.33), 0.0), 10.0);
        // 7.5h at 12.35 = 92.625 → half-up 92.63
        assert_eq!(compute_owed(7.5, Some(12.35), 0.0), 92.63);
    }

    #[test]
    fn test_nan_treated_as_zero() {
        assert_eq!(compute_owed(f64::NAN, Some(20.0), 0.0), 0.0);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }
}
