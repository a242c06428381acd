//! JWT 令牌服务
//!
//! 令牌由外部身份提供方签发 (HS256, 共享密钥)，本服务只负责验证。
//! `generate_token` 用于测试和本地联调。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌签发者 (None 表示不校验)
    pub issuer: Option<String>,
    /// 令牌受众 (None 表示不校验)
    pub audience: Option<String>,
    /// 时钟偏差容忍 (秒)
    pub leeway_secs: u64,
    /// 密钥是否来自 JWT_SECRET
    #[serde(skip)]
    pub secret_from_env: bool,
}

impl JwtConfig {
    /// 从环境变量加载
    ///
    /// 未设置 JWT_SECRET 时生成临时密钥，生产环境由 [`Config::validate`](crate::Config::validate) 拒绝启动
    pub fn from_env() -> Self {
        let (secret, secret_from_env) = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => (secret, true),
            _ => {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                (generate_printable_secret(), false)
            }
        };

        Self {
            secret,
            issuer: std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
            audience: std::env::var("JWT_AUDIENCE").ok().filter(|s| !s.is_empty()),
            leeway_secs: std::env::var("JWT_LEEWAY_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            secret_from_env,
        }
    }

    /// 使用固定密钥 (测试)
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: None,
            audience: None,
            leeway_secs: 0,
            secret_from_env: true,
        }
    }
}

/// 生成可打印的随机密钥 (用于开发环境)
fn generate_printable_secret() -> String {
    use rand::Rng;
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 身份提供方用户 ID (Subject)
    pub sub: String,
    /// 登录邮箱
    pub email: String,
    /// 显示名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 签发令牌 (测试/联调用)
    pub fn generate_token(
        &self,
        uid: &str,
        email: &str,
        expiration_minutes: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(expiration_minutes);

        let claims = Claims {
            sub: uid.to_string(),
            email: email.to_string(),
            name: None,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_secs;
        validation.set_required_spec_claims(&["sub", "exp"]);
        match &self.config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}
