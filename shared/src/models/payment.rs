//! Payment Request Model (薪资发放申请)

use serde::{Deserialize, Serialize};

use super::employee::Employee;

/// Payment request status
///
/// `Rejected` is an archived terminal record: the employee is back to having
/// no outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentStatus {
    Pending,
    Paid,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }
}

/// Payment request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentRequest {
    pub id: i64,
    pub employee_id: i64,
    pub email: String,
    pub amount: f64,
    pub status: PaymentStatus,
    /// HR/admin email that created the request
    pub requested_by: String,
    pub approved_by: Option<String>,
    /// Covered period
    pub month: i32,
    pub year: i32,
    /// Hourly rate at creation
    pub hourly_rate: Option<f64>,
    /// Hours of the worksheet entries claimed by this request
    pub hours_covered: f64,
    /// Owed balance at creation; `balance_due - amount` carries forward once paid
    pub balance_due: f64,
    /// Unix millis, set on approval
    pub paid_date: Option<i64>,
    pub rejected_at: Option<i64>,
    pub rejected_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payment request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    /// Employee email
    pub email: String,
    /// Defaults to the full owed balance
    pub amount: Option<f64>,
    pub month: i32,
    pub year: i32,
}

/// Payroll list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentQuery {
    pub status: Option<PaymentStatus>,
}

/// Owed amount summary for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwedSummary {
    pub employee_id: i64,
    pub email: String,
    pub salary: Option<f64>,
    /// All hours ever logged
    pub total_hours: f64,
    /// Hours not yet covered by a paid request
    pub unpaid_hours: f64,
    pub total_paid: f64,
    /// Shortfall left by the latest partial payment
    pub carried_balance: f64,
    pub total_owed: f64,
}

/// Pending payment check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPaymentCheck {
    pub email: String,
    pub has_pending_payment: bool,
}

/// Employee row in the HR payroll view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePayrollSummary {
    #[serde(flatten)]
    pub employee: Employee,
    pub total_hours: f64,
    pub total_paid: f64,
    pub total_owed: f64,
    pub has_pending_payment: bool,
}
