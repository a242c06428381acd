//! WorkSync Server - 员工工时与薪资审批后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx, WAL)
//! - **认证** (`auth`): 外部身份提供方签发的 JWT 验证 + 角色授权
//! - **薪资** (`payroll`): 应付金额计算、付款申请状态机
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! worksync-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 验证、会话上下文、权限
//! ├── db/            # 连接池、迁移、仓储
//! ├── payroll/       # 应付金额、状态机、付款服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验、时间
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod payroll;
pub mod utils;

// Re-export 公共类型
pub use auth::{Actor, JwtService, SessionContext};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env、创建工作目录、初始化日志
///
/// 返回 guard 需要在 main 中持有，否则文件日志会丢失缓冲区内容
pub fn setup_environment(
    config: &Config,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use anyhow::Context;

    std::fs::create_dir_all(&config.work_dir)
        .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;

    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    )
}

pub fn print_banner() {
    println!(
        r#"
 _       __           __   _____
| |     / /___  _____/ /__/ ___/__  ______  _____
| | /| / / __ \/ ___/ //_/\__ \/ / / / __ \/ ___/
| |/ |/ / /_/ / /  / ,<  ___/ / /_/ / / / / /__
|__/|__/\____/_/  /_/|_|/____/\__, /_/ /_/\___/
                             /____/
    "#
    );
}
