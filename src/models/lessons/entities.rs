use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课时类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/lesson.ts")]
pub enum LessonType {
    Video,
    Text,
    Pdf,
    Quiz,
    Assignment,
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonType::Video => write!(f, "video"),
            LessonType::Text => write!(f, "text"),
            LessonType::Pdf => write!(f, "pdf"),
            LessonType::Quiz => write!(f, "quiz"),
            LessonType::Assignment => write!(f, "assignment"),
        }
    }
}

impl std::str::FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(LessonType::Video),
            "text" => Ok(LessonType::Text),
            "pdf" => Ok(LessonType::Pdf),
            "quiz" => Ok(LessonType::Quiz),
            "assignment" => Ok(LessonType::Assignment),
            _ => Err(format!("Invalid lesson type: {s}")),
        }
    }
}

// 课时实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub content: String,
    pub sort_order: i32,
    pub lesson_type: LessonType,
    // 时长（分钟）
    pub duration: i32,
    pub is_published: bool,
    // 按类型必填：video -> video_url, pdf -> file_url, quiz -> quiz_id
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub quiz_id: Option<i64>,
    // assignment 课时的截止时间
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
