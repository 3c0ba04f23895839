use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Grade;
use crate::models::common::pagination::PaginationInfo;

// 成绩列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

// 课程总评（简单平均 + 加权平均）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct CourseGradeSummary {
    pub total_grade: f64,
    pub weighted_grade: f64,
}
