//! Worksheet API Module
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/worksheet | GET | 已注册 (本人记录) |
//! | /api/worksheet | POST | employee |
//! | /api/worksheet/{key} | GET | 本人, hr, admin (`key` = email) |
//! | /api/worksheet/{key} | PUT, DELETE | employee, 仅本人未结算记录 (`key` = entry id) |
//! | /api/progress | GET | hr, admin |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Worksheet router
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/worksheet", routes())
        .route("/api/progress", get(handler::progress))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_own).post(handler::create))
        .route(
            "/{key}",
            get(handler::list_by_email)
                .put(handler::update)
                .delete(handler::delete),
        )
}
