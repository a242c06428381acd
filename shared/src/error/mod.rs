//! Unified error system for WorkSync
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: JSON body of error responses
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Employee errors
//! - 4xxx: Worksheet errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::EmployeeNotVerified);
//! assert_eq!(err.message, "Employee not verified");
//!
//! let err = AppError::validation("hours_worked must be positive")
//!     .with_detail("field", "hours_worked");
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code.code(), 2);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody, ErrorDetails};
