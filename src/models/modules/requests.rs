use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 创建章节请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/module.ts")]
pub struct CreateModuleRequest {
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sort_order: i32,
    #[serde(default)]
    pub is_published: bool,
}

// 更新章节请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/module.ts")]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}
