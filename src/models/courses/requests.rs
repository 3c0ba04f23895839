use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::CourseStatus;

// 创建课程请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default = "default_status")]
    pub status: CourseStatus,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_status() -> CourseStatus {
    CourseStatus::Draft
}

// 更新课程请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub status: Option<CourseStatus>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 课程列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub status: Option<CourseStatus>,
    pub instructor_id: Option<i64>,
    // 标题/描述模糊搜索
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}
