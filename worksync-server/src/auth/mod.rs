//! 认证授权模块
//!
//! - [`JwtService`] - 身份令牌验证
//! - [`SessionContext`] - 已验证的令牌身份
//! - [`Actor`] - 会话 + 已注册员工 (授权主体)
//! - [`permissions`] - 角色与操作对照表

pub mod extractor;
pub mod jwt;
pub mod permissions;

pub use extractor::{Actor, SessionContext};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use permissions::{Action, authorize, is_allowed};
