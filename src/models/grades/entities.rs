use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 被评分项类型（多态引用的判别标签）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub enum GradeItemType {
    Quiz,
    Assignment,
    Exam,
    Project,
    Participation,
}

impl std::fmt::Display for GradeItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeItemType::Quiz => write!(f, "quiz"),
            GradeItemType::Assignment => write!(f, "assignment"),
            GradeItemType::Exam => write!(f, "exam"),
            GradeItemType::Project => write!(f, "project"),
            GradeItemType::Participation => write!(f, "participation"),
        }
    }
}

impl std::str::FromStr for GradeItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(GradeItemType::Quiz),
            "assignment" => Ok(GradeItemType::Assignment),
            "exam" => Ok(GradeItemType::Exam),
            "project" => Ok(GradeItemType::Project),
            "participation" => Ok(GradeItemType::Participation),
            _ => Err(format!("Invalid grade item type: {s}")),
        }
    }
}

/// 解析后的被评分项
///
/// 把 (item_id, item_type) 的弱引用解析成具体实体；exam/project/participation
/// 没有对应实体，解析结果为 None。
#[derive(Debug, Clone)]
pub enum GradedItem {
    Quiz(crate::models::quizzes::entities::Quiz),
    Assignment(crate::models::lessons::entities::Lesson),
}

// 成绩实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub item_id: i64,
    pub item_type: GradeItemType,
    pub score: f64,
    pub max_score: f64,
    // 派生值：score / max_score * 100，写入前计算
    pub percentage: f64,
    pub feedback: Option<String>,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    // 加权成绩计算用
    pub weight: f64,
    pub category: String,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 写入前计算百分比
///
/// max_score 为 0 时保持 0，避免除零。
pub fn derive_percentage(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        (score / max_score) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_roundtrip() {
        assert_eq!(derive_percentage(75.0, 100.0), 75.0);
        assert_eq!(derive_percentage(7.0, 10.0), 70.0);
    }

    #[test]
    fn test_zero_max_score() {
        assert_eq!(derive_percentage(5.0, 0.0), 0.0);
    }
}
