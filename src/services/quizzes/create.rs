//! 测验/题目/选项创建

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::quizzes::{
    entities::{Question, QuestionOption, QuestionType, Quiz},
    requests::{CreateQuestionOptionRequest, CreateQuestionRequest, CreateQuizRequest},
};
use crate::storage::Storage;

use super::total_points;

/// 创建测验
pub async fn create_quiz(
    storage: &Arc<dyn Storage>,
    req: CreateQuizRequest,
) -> Result<Quiz> {
    // 课程必须存在
    storage
        .get_course_by_id(req.course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {} 不存在", req.course_id)))?;

    if !(0.0..=100.0).contains(&req.passing_score) {
        return Err(LearnifyError::validation("及格线必须在 0-100 之间"));
    }

    storage.create_quiz(req).await
}

/// 创建题目
///
/// true_false 必须带 correct_answer；创建后重算测验总分。
pub async fn create_question(
    storage: &Arc<dyn Storage>,
    req: CreateQuestionRequest,
) -> Result<Question> {
    storage
        .get_quiz_by_id(req.quiz_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("测验 {} 不存在", req.quiz_id)))?;

    if req.question_type == QuestionType::TrueFalse && req.correct_answer.is_none() {
        return Err(LearnifyError::validation("判断题必须提供 correct_answer"));
    }

    if req.points < 0.0 {
        return Err(LearnifyError::validation("题目分值不能为负数"));
    }

    let question = storage.create_question(req).await?;

    // 题目集合变化后同步 total_points 派生值
    total_points::calculate_total_points(storage, question.quiz_id).await?;

    Ok(question)
}

/// 创建选项
pub async fn create_question_option(
    storage: &Arc<dyn Storage>,
    req: CreateQuestionOptionRequest,
) -> Result<QuestionOption> {
    storage
        .get_question_by_id(req.question_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("题目 {} 不存在", req.question_id)))?;

    storage.create_question_option(req).await
}
