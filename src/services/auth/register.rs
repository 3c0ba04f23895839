//! 用户注册

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{LearnifyError, Result};
use crate::models::auth::entities::CodeType;
use crate::models::auth::{RegisterRequest, RegisterResponse, responses::AuthTokens};
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::services::email::EmailService;
use crate::storage::Storage;
use crate::utils::code::generate_verification_code;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

/// 生成验证码入库并发送邮件
///
/// SMTP 未配置时只入库不发信，方便本地开发。
pub(crate) async fn send_email_verification_code(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    email: &str,
) -> Result<()> {
    let config = AppConfig::get();
    let code = generate_verification_code();
    let expires_at = (chrono::Utc::now()
        + chrono::Duration::minutes(config.verification.code_expiry_minutes))
    .timestamp();

    storage
        .replace_verification_code(
            user_id,
            CodeType::Email,
            &code,
            expires_at,
            config.verification.max_attempts,
        )
        .await?;

    if !EmailService::is_configured() {
        tracing::warn!("SMTP 未配置，跳过验证码邮件发送 (user_id={})", user_id);
        return Ok(());
    }

    EmailService::send_verification_code(email, &code).await
}

/// 注册新用户
///
/// 邮箱唯一；注册成功后自动发送邮箱验证码并返回令牌对。
pub async fn register(
    storage: &Arc<dyn Storage>,
    req: RegisterRequest,
) -> Result<RegisterResponse> {
    // 1. 字段校验
    validate_name(&req.firstname).map_err(LearnifyError::validation)?;
    validate_name(&req.lastname).map_err(LearnifyError::validation)?;
    validate_email(&req.email).map_err(LearnifyError::validation)?;
    validate_password_simple(&req.password).map_err(LearnifyError::validation)?;

    // 2. 邮箱唯一性
    if storage.get_user_by_email(&req.email).await?.is_some() {
        return Err(LearnifyError::conflict("邮箱已被其他用户使用"));
    }

    // 3. 哈希密码后创建用户
    let password_hash = hash_password(&req.password)?;

    let user = storage
        .create_user(CreateUserRequest {
            firstname: req.firstname,
            lastname: req.lastname,
            email: req.email,
            password: password_hash,
            role: UserRole::Student,
            phone_number: None,
        })
        .await?;

    // 4. 签发令牌对
    let token_pair = user
        .generate_token_pair()
        .map_err(LearnifyError::authentication)?;

    // 5. 自动发送邮箱验证码
    send_email_verification_code(storage, user.id, &user.email).await?;

    tracing::info!("User {} registered successfully", user.email);

    let config = AppConfig::get();
    Ok(RegisterResponse {
        tokens: AuthTokens {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: config.jwt.access_token_expiry * 60,
        },
        user,
    })
}
