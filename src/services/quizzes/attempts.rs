//! 作答生命周期
//!
//! in_progress -> completed 由计分触发（见 score_attempt）；
//! abandoned 是外部设置的独立终态。

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::quizzes::entities::{AttemptStatus, QuizAttempt};
use crate::storage::Storage;

/// 学生开始一次作答
///
/// attempt_number 取已有次数 +1；超出 attempts_allowed 时拒绝。
pub async fn start_attempt(
    storage: &Arc<dyn Storage>,
    quiz_id: i64,
    student_id: i64,
) -> Result<QuizAttempt> {
    let quiz = storage
        .get_quiz_by_id(quiz_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("测验 {quiz_id} 不存在")))?;

    let existing = storage.count_quiz_attempts(quiz_id, student_id).await?;

    if quiz.attempts_allowed > 0 && existing >= quiz.attempts_allowed as i64 {
        return Err(LearnifyError::validation(format!(
            "已达到最大作答次数 {}",
            quiz.attempts_allowed
        )));
    }

    // 并发开始同一次作答时由唯一约束兜底，冲突以 Conflict 返回
    storage
        .create_quiz_attempt(quiz_id, student_id, existing as i32 + 1)
        .await
}

/// 放弃作答
pub async fn abandon_attempt(
    storage: &Arc<dyn Storage>,
    attempt_id: i64,
) -> Result<QuizAttempt> {
    let attempt = storage
        .get_quiz_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("作答 {attempt_id} 不存在")))?;

    if attempt.status != AttemptStatus::InProgress {
        return Err(LearnifyError::validation("只有进行中的作答可以放弃"));
    }

    storage
        .update_attempt_status(attempt_id, AttemptStatus::Abandoned)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("作答 {attempt_id} 不存在")))
}
