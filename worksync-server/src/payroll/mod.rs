//! 薪资模块
//!
//! - [`owed`] - 应付金额计算 (rust_decimal)
//! - [`transition`] - 付款申请状态机 (纯函数)
//! - [`service`] - 事务内的创建 / 审批 / 驳回

pub mod owed;
pub mod service;
pub mod transition;

pub use service::{
    approve_payment, check_pending, create_payment, owed_by_email, payroll_summary, reject_payment,
};

use shared::error::{AppError, ErrorCode};
use shared::models::PaymentStatus;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Payroll errors
#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("Employee {0} not found")]
    EmployeeNotFound(String),

    #[error("Employee not verified")]
    NotVerified,

    #[error("Employee has been fired")]
    EmployeeFired,

    #[error("Payment pending approval")]
    PaymentPending,

    #[error("No amount owed to process payment")]
    NothingOwed,

    #[error("Payment amount {requested} exceeds owed balance {owed}")]
    ExceedsOwed { requested: f64, owed: f64 },

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid payment period: {0}")]
    InvalidPeriod(String),

    #[error("Payment request {0} not found")]
    NotFound(i64),

    #[error("Payment has already been paid")]
    AlreadyPaid,

    #[error("Payment request is {}, not pending", .0.as_str())]
    NotPending(PaymentStatus),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for PayrollError {
    fn from(err: sqlx::Error) -> Self {
        PayrollError::Repo(err.into())
    }
}

impl From<PayrollError> for AppError {
    fn from(err: PayrollError) -> Self {
        let message = err.to_string();
        match err {
            PayrollError::EmployeeNotFound(email) => {
                AppError::with_message(ErrorCode::EmployeeNotFound, message)
                    .with_detail("email", email)
            }
            PayrollError::NotVerified => AppError::new(ErrorCode::EmployeeNotVerified),
            PayrollError::EmployeeFired => AppError::new(ErrorCode::EmployeeFired),
            PayrollError::PaymentPending => AppError::new(ErrorCode::PaymentPending),
            PayrollError::NothingOwed => AppError::new(ErrorCode::NothingOwed),
            PayrollError::ExceedsOwed { requested, owed } => {
                AppError::with_message(ErrorCode::PaymentExceedsOwed, message)
                    .with_detail("requested", requested)
                    .with_detail("owed", owed)
            }
            PayrollError::InvalidAmount(_) | PayrollError::InvalidPeriod(_) => {
                AppError::validation(message)
            }
            PayrollError::NotFound(id) => {
                AppError::with_message(ErrorCode::PaymentNotFound, message).with_detail("id", id)
            }
            PayrollError::AlreadyPaid => AppError::new(ErrorCode::PaymentAlreadyPaid),
            PayrollError::NotPending(_) => {
                AppError::with_message(ErrorCode::PaymentNotPending, message)
            }
            PayrollError::Repo(e) => e.into(),
        }
    }
}
