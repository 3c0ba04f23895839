use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::GradeItemType;

// 创建成绩请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub item_id: i64,
    pub item_type: GradeItemType,
    pub score: f64,
    pub max_score: f64,
    pub feedback: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_published: bool,
}

fn default_weight() -> f64 {
    1.0
}

fn default_category() -> String {
    "uncategorized".to_string()
}

// 更新成绩请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    pub feedback: Option<String>,
    pub weight: Option<f64>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

// 成绩列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeListQuery {
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
    pub item_type: Option<GradeItemType>,
    pub is_published: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
