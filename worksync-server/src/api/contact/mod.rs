//! Contact Query API Module
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/submit-query | POST | 已登录 (无需注册) |
//! | /api/queries | GET | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Contact query router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/submit-query", post(handler::submit))
        .route("/api/queries", get(handler::list))
}
