use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 注册请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[ts(skip)]
    pub password: String,
}

// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    #[ts(skip)]
    pub password: String,
}

// 重置密码请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct ResetPasswordRequest {
    #[ts(skip)]
    pub token: String,
    #[ts(skip)]
    pub password: String,
}
