//! Unified error codes for WorkSync
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Employee errors
//! - 4xxx: Worksheet errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the browser client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled (employee fired)
    AccountDisabled = 1007,
    /// Identity is valid but has no employee record yet
    NotRegistered = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Cannot change own role or status
    CannotModifySelf = 2004,

    // ==================== 3xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 3001,
    /// Employee is not verified
    EmployeeNotVerified = 3002,
    /// Employee already registered (uid or email taken)
    EmployeeAlreadyRegistered = 3003,
    /// Employee has been fired
    EmployeeFired = 3004,

    // ==================== 4xxx: Worksheet ====================
    /// Worksheet entry not found
    WorksheetEntryNotFound = 4001,
    /// Worksheet entry is claimed by a payment request
    WorksheetEntryLocked = 4002,
    /// Worksheet entry belongs to another employee
    WorksheetNotOwner = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment request not found
    PaymentNotFound = 5001,
    /// Employee already has a pending payment request
    PaymentPending = 5002,
    /// Nothing owed to the employee
    NothingOwed = 5003,
    /// Requested amount exceeds owed balance
    PaymentExceedsOwed = 5004,
    /// Payment request has already been paid
    PaymentAlreadyPaid = 5005,
    /// Payment request is not pending
    PaymentNotPending = 5006,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account is disabled",
            Self::NotRegistered => "Account is not registered",

            // Permission
            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Specific role required",
            Self::AdminRequired => "Admin role required",
            Self::CannotModifySelf => "Cannot change your own role or status",

            // Employee
            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeNotVerified => "Employee not verified",
            Self::EmployeeAlreadyRegistered => "Employee already registered",
            Self::EmployeeFired => "Employee has been fired",

            // Worksheet
            Self::WorksheetEntryNotFound => "Worksheet entry not found",
            Self::WorksheetEntryLocked => "Worksheet entry already submitted for payment",
            Self::WorksheetNotOwner => "Worksheet entry belongs to another employee",

            // Payment
            Self::PaymentNotFound => "Payment request not found",
            Self::PaymentPending => "Payment pending approval",
            Self::NothingOwed => "No amount owed to process payment",
            Self::PaymentExceedsOwed => "Payment amount exceeds owed balance",
            Self::PaymentAlreadyPaid => "Payment has already been paid",
            Self::PaymentNotPending => "Payment request is not pending",

            // System
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 value to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::NotRegistered),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::CannotModifySelf),

            // Employee
            3001 => Ok(ErrorCode::EmployeeNotFound),
            3002 => Ok(ErrorCode::EmployeeNotVerified),
            3003 => Ok(ErrorCode::EmployeeAlreadyRegistered),
            3004 => Ok(ErrorCode::EmployeeFired),

            // Worksheet
            4001 => Ok(ErrorCode::WorksheetEntryNotFound),
            4002 => Ok(ErrorCode::WorksheetEntryLocked),
            4003 => Ok(ErrorCode::WorksheetNotOwner),

            // Payment
            5001 => Ok(ErrorCode::PaymentNotFound),
            5002 => Ok(ErrorCode::PaymentPending),
            5003 => Ok(ErrorCode::NothingOwed),
            5004 => Ok(ErrorCode::PaymentExceedsOwed),
            5005 => Ok(ErrorCode::PaymentAlreadyPaid),
            5006 => Ok(ErrorCode::PaymentNotPending),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
