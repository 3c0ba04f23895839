use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求（password 字段在入库前已被替换为哈希）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[ts(skip)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub phone_number: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::Student
}

// 更新用户请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: Option<bool>,
    pub phone_verified: Option<bool>,
    pub is_verified: Option<bool>,
    #[ts(skip)]
    pub password_hash: Option<String>,
}
