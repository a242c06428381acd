use crate::auth::JwtConfig;
use crate::core::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/worksync.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | JWT_SECRET | (开发环境随机生成) | 身份令牌共享密钥 |
/// | JWT_ISSUER | - | 令牌签发者 (设置后校验) |
/// | JWT_AUDIENCE | - | 令牌受众 (设置后校验) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志目录 (设置后按天滚动写文件) |
/// | BOOTSTRAP_ADMIN_EMAIL | - | 以该邮箱注册的账号直接成为 admin |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/worksync HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// JWT 验证配置
    pub jwt: JwtConfig,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 首个管理员邮箱
    pub bootstrap_admin_email: Option<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{}/worksync.db", work_dir.trim_end_matches('/')));

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            work_dir,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::from_env(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            bootstrap_admin_email: std::env::var("BOOTSTRAP_ADMIN_EMAIL")
                .ok()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// 测试用配置: 固定密钥，不读取环境变量
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            database_path: ":memory:".into(),
            environment: "test".into(),
            jwt: JwtConfig::with_secret(jwt_secret),
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
            bootstrap_admin_email: None,
            request_timeout_ms: 30000,
            shutdown_timeout_ms: 1000,
        }
    }

    /// 启动前检查: 生产环境必须显式配置 JWT_SECRET
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.jwt.secret.len() < 32 {
            return Err(ServerError::Config(
                "JWT_SECRET must be at least 32 characters long".into(),
            ));
        }
        if self.is_production() && !self.jwt.secret_from_env {
            return Err(ServerError::Config(
                "JWT_SECRET environment variable must be set in production".into(),
            ));
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 邮箱是否为引导管理员
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.bootstrap_admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(email))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
