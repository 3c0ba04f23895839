//! 作答总分汇总
//!
//! 全量重算：读取该次作答的所有记录，求和后写回作答文档。

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::quizzes::{
    entities::{AttemptStatus, QuizResponse},
    requests::AttemptScoreUpdate,
};
use crate::storage::Storage;

/// 从作答记录汇总百分比得分
///
/// 总可得分为 0 时得分为 0，避免除零。结果保留两位小数。
pub(crate) fn aggregate_score(responses: &[QuizResponse]) -> f64 {
    let total_awarded: f64 = responses.iter().map(|r| r.points_awarded).sum();
    let total_possible: f64 = responses.iter().map(|r| r.max_points).sum();

    let percentage = if total_possible > 0.0 {
        (total_awarded / total_possible) * 100.0
    } else {
        0.0
    };

    (percentage * 100.0).round() / 100.0
}

/// 汇总一次作答的总分并持久化
///
/// - 作答不存在 -> NotFound
/// - 没有任何作答记录或测验缺失 -> 返回 0，不写库
/// - in_progress 的作答在首次计分时转为 completed 并落下计时字段；
///   已完成的作答只重算分数，计时字段不再变动
pub async fn score_attempt(storage: &Arc<dyn Storage>, attempt_id: i64) -> Result<f64> {
    let attempt = storage
        .get_quiz_attempt_by_id(attempt_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("作答 {attempt_id} 不存在")))?;

    let responses = storage.list_responses_by_attempt(attempt_id).await?;
    let quiz = storage.get_quiz_by_id(attempt.quiz_id).await?;

    let Some(quiz) = quiz else {
        return Ok(0.0);
    };
    if responses.is_empty() {
        return Ok(0.0);
    }

    let percentage = aggregate_score(&responses);
    let is_passed = percentage >= quiz.passing_score;

    let update = if attempt.status == AttemptStatus::InProgress {
        let end_time = chrono::Utc::now();
        let time_spent = (end_time - attempt.start_time).num_seconds().max(0);

        AttemptScoreUpdate {
            score: percentage,
            is_passed,
            status: Some(AttemptStatus::Completed),
            end_time: Some(end_time),
            time_spent: Some(time_spent),
        }
    } else {
        // 重算分数，不再触碰状态与计时字段
        AttemptScoreUpdate {
            score: percentage,
            is_passed,
            status: None,
            end_time: None,
            time_spent: None,
        }
    };

    storage.save_attempt_score(attempt_id, update).await?;

    Ok(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn response(points_awarded: f64, max_points: f64) -> QuizResponse {
        QuizResponse {
            id: 1,
            quiz_attempt_id: 1,
            question_id: 1,
            selected_option_id: None,
            text_response: None,
            is_correct: None,
            points_awarded,
            max_points,
            graded_by: None,
            graded_at: None,
            feedback: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_marks() {
        assert_eq!(aggregate_score(&[response(10.0, 10.0)]), 100.0);
    }

    #[test]
    fn test_zero_marks() {
        assert_eq!(aggregate_score(&[response(0.0, 10.0)]), 0.0);
    }

    #[test]
    fn test_partial_marks_rounded() {
        // 2/3 -> 66.666... -> 66.67
        let responses = [response(1.0, 1.0), response(1.0, 1.0), response(0.0, 1.0)];
        assert_eq!(aggregate_score(&responses), 66.67);
    }

    #[test]
    fn test_zero_possible_points() {
        assert_eq!(aggregate_score(&[response(0.0, 0.0)]), 0.0);
    }

    #[test]
    fn test_score_within_bounds() {
        let responses = [response(3.0, 5.0), response(4.5, 5.0), response(0.0, 5.0)];
        let score = aggregate_score(&responses);
        assert!((0.0..=100.0).contains(&score));
    }
}
