//! Payroll API Module
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/employee-owed/{email} | GET | hr, admin |
//! | /api/check-pending-payment/{email} | GET | hr, admin |
//! | /api/payroll-summary | GET | hr, admin |
//! | /api/process-payment | POST | hr, admin |
//! | /api/payroll | GET | admin |
//! | /api/approve-payment/{id} | PUT | admin |
//! | /api/reject-payment/{id} | PUT | admin |
//! | /api/payment-history/{id} | GET | 本人, hr, admin |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Payroll router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/employee-owed/{email}", get(handler::owed))
        .route(
            "/api/check-pending-payment/{email}",
            get(handler::check_pending),
        )
        .route("/api/payroll-summary", get(handler::summary))
        .route("/api/process-payment", post(handler::create))
        .route("/api/payroll", get(handler::list))
        .route("/api/approve-payment/{id}", put(handler::approve))
        .route("/api/reject-payment/{id}", put(handler::reject))
        .route("/api/payment-history/{id}", get(handler::history))
}
