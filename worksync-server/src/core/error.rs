use thiserror::Error;

/// 服务器启动/运行错误
///
/// 请求级错误走 [`AppError`](crate::AppError)，这里只处理进程级失败
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        ServerError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for ServerError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ServerError::Database(format!("Failed to apply migrations: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
