//! 密码重置
//!
//! 明文令牌只出现在邮件里，数据库保存 SHA-256 哈希。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{LearnifyError, Result};
use crate::models::auth::requests::ResetPasswordRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::services::email::EmailService;
use crate::storage::Storage;
use crate::utils::code::{generate_reset_token, hash_reset_token};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

/// 发起密码重置
///
/// 出于安全考虑，无论邮箱是否注册都返回成功。
pub async fn forgot_password(storage: &Arc<dyn Storage>, email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(LearnifyError::validation("邮箱不能为空"));
    }

    let Some(user) = storage.get_user_by_email(email).await? else {
        // 不暴露邮箱是否注册
        return Ok(());
    };

    let config = AppConfig::get();
    let (token, token_hash) = generate_reset_token();
    let expires_at = (chrono::Utc::now()
        + chrono::Duration::hours(config.verification.reset_token_expiry_hours))
    .timestamp();

    storage
        .set_reset_password_token(user.id, Some(token_hash), Some(expires_at))
        .await?;

    if !EmailService::is_configured() {
        tracing::warn!("SMTP 未配置，跳过重置邮件发送 (user_id={})", user.id);
        return Ok(());
    }

    EmailService::send_password_reset(&user.email, &token).await
}

/// 校验重置令牌是否有效（存在且未过期）
pub async fn verify_reset_token(storage: &Arc<dyn Storage>, token: &str) -> Result<bool> {
    if token.is_empty() {
        return Err(LearnifyError::validation("令牌不能为空"));
    }

    let user = storage
        .get_user_by_reset_token(&hash_reset_token(token))
        .await?;

    Ok(user.is_some())
}

/// 用重置令牌设置新密码
///
/// 成功后清除令牌并发送密码修改通知，返回用户邮箱。
pub async fn reset_password(
    storage: &Arc<dyn Storage>,
    req: ResetPasswordRequest,
) -> Result<String> {
    if req.token.is_empty() || req.password.is_empty() {
        return Err(LearnifyError::validation("令牌和新密码不能为空"));
    }

    validate_password_simple(&req.password).map_err(LearnifyError::validation)?;

    let user = storage
        .get_user_by_reset_token(&hash_reset_token(&req.token))
        .await?
        .ok_or_else(|| LearnifyError::validation("无效或已过期的重置令牌"))?;

    let password_hash = hash_password(&req.password)?;

    storage
        .update_user(
            user.id,
            UpdateUserRequest {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

    // 清除重置令牌，确保一次性使用
    storage
        .set_reset_password_token(user.id, None, None)
        .await?;

    if EmailService::is_configured() {
        if let Err(e) = EmailService::send_password_changed(&user.email).await {
            tracing::warn!("密码修改通知发送失败: {}", e);
        }
    }

    tracing::info!("Password reset completed for user {}", user.email);

    Ok(user.email)
}
