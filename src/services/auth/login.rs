//! 用户登录

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{LearnifyError, Result};
use crate::models::auth::{LoginRequest, LoginResponse, responses::AuthTokens};
use crate::storage::Storage;
use crate::utils::password::verify_password;

/// 邮箱 + 密码登录
pub async fn login(storage: &Arc<dyn Storage>, req: LoginRequest) -> Result<LoginResponse> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(LearnifyError::validation("邮箱和密码不能为空"));
    }

    // 1. 按邮箱获取用户
    let user = storage
        .get_user_by_email(&req.email)
        .await?
        .ok_or_else(|| LearnifyError::not_found("用户不存在"))?;

    // 2. 验证密码
    if !verify_password(&req.password, &user.password_hash) {
        return Err(LearnifyError::authentication("密码错误"));
    }

    // 3. 签发令牌对
    let token_pair = user
        .generate_token_pair()
        .map_err(LearnifyError::authentication)?;

    tracing::info!("User {} logged in successfully", user.email);

    let config = AppConfig::get();
    Ok(LoginResponse {
        tokens: AuthTokens {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: config.jwt.access_token_expiry * 60,
        },
        user,
    })
}
