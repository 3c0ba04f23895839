use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::QuestionType;

// 创建测验请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub course_id: i64,
    pub lesson_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_time_limit")]
    pub time_limit: i32,
    #[serde(default = "default_passing_score")]
    pub passing_score: f64,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default = "default_show_results")]
    pub show_results: bool,
    #[serde(default = "default_attempts_allowed")]
    pub attempts_allowed: i32,
}

fn default_time_limit() -> i32 {
    30
}

fn default_passing_score() -> f64 {
    70.0
}

fn default_show_results() -> bool {
    true
}

fn default_attempts_allowed() -> i32 {
    1
}

// 创建题目请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct CreateQuestionRequest {
    pub quiz_id: i64,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default = "default_points")]
    pub points: f64,
    pub sort_order: i32,
    #[serde(default)]
    pub explanation: Option<String>,
    pub sample_answer: Option<String>,
    pub correct_answer: Option<bool>,
}

fn default_points() -> f64 {
    1.0
}

// 创建选项请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct CreateQuestionOptionRequest {
    pub question_id: i64,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    pub sort_order: i32,
    pub explanation: Option<String>,
}

// 提交单题作答（选择题给 selected_option_id，文本题给 text_response）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct SubmitResponseRequest {
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub text_response: Option<String>,
}

/// 作答记录的持久化数据（评分引擎算好后交给存储层）
#[derive(Debug, Clone)]
pub struct UpsertResponseData {
    pub quiz_attempt_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub text_response: Option<String>,
    pub is_correct: Option<bool>,
    pub points_awarded: f64,
    pub max_points: f64,
}

/// 作答评分的持久化数据
///
/// end_time/time_spent 仅在首次完成时为 Some，重算分数时为 None。
#[derive(Debug, Clone)]
pub struct AttemptScoreUpdate {
    pub score: f64,
    pub is_passed: bool,
    pub status: Option<super::entities::AttemptStatus>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub time_spent: Option<i64>,
}

// 人工评分请求（short_answer/essay）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/quiz.ts")]
pub struct ManualGradeRequest {
    pub is_correct: bool,
    pub points_awarded: f64,
    pub feedback: Option<String>,
}
