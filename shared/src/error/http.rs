//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::EmployeeNotFound
            | Self::WorksheetEntryNotFound
            | Self::PaymentNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmployeeAlreadyRegistered
            | Self::PaymentAlreadyPaid
            | Self::PaymentNotPending
            | Self::WorksheetEntryLocked => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::NotRegistered
            | Self::PermissionDenied
            | Self::RoleRequired
            | Self::AdminRequired
            | Self::CannotModifySelf
            | Self::WorksheetNotOwner => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation, blocked transitions)
            Self::ValidationFailed
            | Self::EmployeeNotVerified
            | Self::EmployeeFired
            | Self::PaymentPending
            | Self::NothingOwed
            | Self::PaymentExceedsOwed => StatusCode::BAD_REQUEST,
        }
    }
}
