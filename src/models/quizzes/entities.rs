use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
}

impl QuestionType {
    /// 选择类题型（需要 selected_option_id）
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::TrueFalse)
    }

    /// 文本类题型（需要 text_response，人工评分）
    pub fn is_text(&self) -> bool {
        matches!(self, QuestionType::ShortAnswer | QuestionType::Essay)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::TrueFalse => write!(f, "true_false"),
            QuestionType::ShortAnswer => write!(f, "short_answer"),
            QuestionType::Essay => write!(f, "essay"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            "essay" => Ok(QuestionType::Essay),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

// 作答状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub enum AttemptStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStatus::InProgress => write!(f, "in_progress"),
            AttemptStatus::Completed => write!(f, "completed"),
            AttemptStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(AttemptStatus::InProgress),
            "completed" => Ok(AttemptStatus::Completed),
            "abandoned" => Ok(AttemptStatus::Abandoned),
            _ => Err(format!("Invalid attempt status: {s}")),
        }
    }
}

// 测验实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    // 可挂在具体课时下，也可作为课程级独立测验
    pub lesson_id: Option<i64>,
    pub title: String,
    pub description: String,
    // 限时（分钟）
    pub time_limit: i32,
    // 及格线（百分比 0-100）
    pub passing_score: f64,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub is_published: bool,
    // 派生值：所有题目分值之和
    pub total_points: f64,
    pub shuffle_questions: bool,
    pub show_results: bool,
    pub attempts_allowed: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 题目实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub points: f64,
    pub sort_order: i32,
    pub explanation: String,
    // short_answer/essay 的参考答案
    pub sample_answer: Option<String>,
    // true_false 必填
    pub correct_answer: Option<bool>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 选项实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
    pub sort_order: i32,
    pub explanation: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 测验作答实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    // (quiz_id, student_id, attempt_number) 唯一
    pub attempt_number: i32,
    pub status: AttemptStatus,
    // 百分比 0-100
    pub score: f64,
    pub is_passed: bool,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    // 用时（秒）
    pub time_spent: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 作答记录实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct QuizResponse {
    pub id: i64,
    pub quiz_attempt_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub text_response: Option<String>,
    // 文本题人工评分前保持 None
    pub is_correct: Option<bool>,
    pub points_awarded: f64,
    // 保存时从题目分值拷贝
    pub max_points: f64,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub feedback: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
