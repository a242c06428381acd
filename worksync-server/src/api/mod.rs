//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 员工目录 / 角色 / 状态 / 验证
//! - [`worksheet`] - 工时记录与进度
//! - [`payments`] - 应付金额与付款申请
//! - [`contact`] - 联系表单
//!
//! 认证在 handler 层通过 [`crate::auth::SessionContext`] / [`crate::auth::Actor`]
//! 提取器完成，`/health` 之外的所有路由都需要 Bearer token。

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod contact;
pub mod health;
pub mod payments;
pub mod users;
pub mod worksheet;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Employee directory
        .merge(users::router())
        // Worksheet + progress
        .merge(worksheet::router())
        // Owed amounts + payment requests
        .merge(payments::router())
        // Contact form + inbox
        .merge(contact::router())
}

/// Build a fully configured application with all middleware
///
/// Used by both the HTTP server and the integration tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // CORS - browser client on another origin
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::x_request_id())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
