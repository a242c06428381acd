//! Session Extractors
//!
//! - [`SessionContext`]: 已验证的令牌身份 (尚未注册也可以存在)
//! - [`Actor`]: 会话 + 数据库中的员工记录，授权一律基于这里的角色

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::models::Employee;

use crate::AppError;
use crate::auth::{JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::security_log;

/// 已验证的调用方身份 (来自 Bearer 令牌)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// 身份提供方用户 ID
    pub uid: String,
    /// 登录邮箱 (小写)
    pub email: String,
    pub display_name: Option<String>,
}

/// 当前操作者: 会话 + 已注册的员工记录
#[derive(Debug, Clone)]
pub struct Actor {
    pub session: SessionContext,
    pub employee: Employee,
}

impl Actor {
    pub fn id(&self) -> i64 {
        self.employee.id
    }

    pub fn email(&self) -> &str {
        &self.employee.email
    }
}

impl FromRequestParts<ServerState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<SessionContext>() {
            return Ok(session.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        match state.get_jwt_service().validate_token(token) {
            Ok(claims) => {
                let session = SessionContext {
                    uid: claims.sub,
                    email: claims.email.trim().to_lowercase(),
                    display_name: claims.name,
                };
                if session.uid.is_empty() || session.email.is_empty() {
                    return Err(AppError::invalid_token("Malformed token claims"));
                }
                parts.extensions.insert(session.clone());
                Ok(session)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );

                match e {
                    JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

impl FromRequestParts<ServerState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionContext::from_request_parts(parts, state).await?;

        let employee = employee::find_by_uid(&state.pool, &session.uid)
            .await?
            .ok_or_else(|| {
                security_log!("WARN", "not_registered", uid = session.uid.clone());
                AppError::new(shared::error::ErrorCode::NotRegistered)
            })?;

        if !employee.is_active() {
            security_log!(
                "WARN",
                "disabled_account",
                employee_id = employee.id,
                email = employee.email.clone()
            );
            return Err(AppError::new(shared::error::ErrorCode::AccountDisabled));
        }

        Ok(Actor { session, employee })
    }
}
