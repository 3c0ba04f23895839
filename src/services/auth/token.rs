//! 令牌刷新与吊销
//!
//! 登出时把 refresh token 写入缓存吊销名单，TTL 与令牌剩余有效期一致；
//! 刷新前先查名单。

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::cache::{CacheResult, ObjectCache};
use crate::errors::{LearnifyError, Result};
use crate::utils::jwt::JwtUtils;

// 吊销名单的缓存键，避免在缓存里存完整令牌
fn revoked_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("auth:revoked:{}", hex::encode(hasher.finalize()))
}

/// 用 refresh token 换新的 access token
pub async fn refresh(cache: &Arc<dyn ObjectCache>, refresh_token: &str) -> Result<String> {
    if let CacheResult::Found(_) = cache.get_raw(&revoked_key(refresh_token)).await {
        return Err(LearnifyError::authentication("令牌已被吊销"));
    }

    JwtUtils::refresh_access_token(refresh_token)
        .map_err(|e| LearnifyError::authentication(format!("刷新令牌无效: {e}")))
}

/// 登出：吊销 refresh token
pub async fn logout(cache: &Arc<dyn ObjectCache>, refresh_token: &str) -> Result<()> {
    let claims = JwtUtils::verify_refresh_token(refresh_token)
        .map_err(|e| LearnifyError::authentication(format!("刷新令牌无效: {e}")))?;

    // TTL 取令牌剩余有效期，过期后名单项自动清理
    let now = chrono::Utc::now().timestamp();
    let ttl = (claims.exp as i64 - now).max(1) as u64;

    cache
        .insert_raw(revoked_key(refresh_token), "revoked".to_string(), ttl)
        .await;

    tracing::info!("Refresh token revoked for user {}", claims.sub);

    Ok(())
}
