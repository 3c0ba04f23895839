use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::User;

// 令牌对响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64, // access token 有效期（秒）
}

// 登录响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub tokens: AuthTokens,
    pub user: User,
}

// 注册响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct RegisterResponse {
    pub tokens: AuthTokens,
    pub user: User,
}

// 邮箱验证响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct VerifyEmailResponse {
    pub email_verified: bool,
    pub is_verified: bool,
}
