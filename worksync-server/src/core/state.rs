use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求 clone 一份成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | 令牌验证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 校验配置
    /// 2. 打开数据库并执行迁移
    /// 3. 创建 JWT 服务
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.validate()?;

        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db.pool, jwt_service))
    }

    /// 基于内存数据库的状态 (测试)
    pub async fn in_memory(config: Config) -> Result<Self, ServerError> {
        let db = DbService::in_memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Ok(Self::new(config, db.pool, jwt_service))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
