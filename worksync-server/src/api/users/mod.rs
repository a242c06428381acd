//! Employee Directory API Module
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/users | POST | 已登录 (未注册) |
//! | /api/users | GET | hr, admin |
//! | /api/users/me | GET | 已注册 |
//! | /api/users/{id} | GET | 本人, hr, admin |
//! | /api/users/{id}/role | PUT | admin |
//! | /api/users/{id}/status | PUT | admin |
//! | /api/users/{id}/salary | PUT | admin |
//! | /api/toggle-verification/{id} | POST | hr, admin |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Employee directory router
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/users", routes())
        .route("/api/toggle-verification/{id}", post(handler::toggle_verification))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::register).get(handler::list))
        .route("/me", get(handler::me))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/role", put(handler::change_role))
        .route("/{id}/status", put(handler::change_status))
        .route("/{id}/salary", put(handler::adjust_salary))
}
