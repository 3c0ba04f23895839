use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub enum CourseStatus {
    Draft,     // 草稿
    Published, // 已发布
    Archived,  // 已归档
}

impl CourseStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
    pub const ARCHIVED: &'static str = "archived";
}

impl<'de> Deserialize<'de> for CourseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            CourseStatus::DRAFT => Ok(CourseStatus::Draft),
            CourseStatus::PUBLISHED => Ok(CourseStatus::Published),
            CourseStatus::ARCHIVED => Ok(CourseStatus::Archived),
            _ => Err(serde::de::Error::custom(format!(
                "无效的课程状态: '{s}'. 支持的状态: draft, published, archived"
            ))),
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseStatus::Draft => write!(f, "{}", CourseStatus::DRAFT),
            CourseStatus::Published => write!(f, "{}", CourseStatus::PUBLISHED),
            CourseStatus::Archived => write!(f, "{}", CourseStatus::ARCHIVED),
        }
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CourseStatus::Draft),
            "published" => Ok(CourseStatus::Published),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(format!("Invalid course status: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub instructor_id: i64,
    pub title: String,
    pub description: String,
    // 由标题派生，全局唯一
    pub slug: String,
    pub cover_image: String,
    pub status: CourseStatus,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
