use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::LessonType;

// 创建课时请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/lesson.ts")]
pub struct CreateLessonRequest {
    pub module_id: i64,
    pub title: String,
    pub content: String,
    pub sort_order: i32,
    #[serde(default = "default_lesson_type")]
    pub lesson_type: LessonType,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub is_published: bool,
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub quiz_id: Option<i64>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_lesson_type() -> LessonType {
    LessonType::Text
}

// 更新课时请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/lesson.ts")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
    pub duration: Option<i32>,
    pub is_published: Option<bool>,
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub quiz_id: Option<i64>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}
