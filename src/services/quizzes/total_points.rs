//! 测验总分派生值维护

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::storage::Storage;

/// 重算测验总分（所有题目分值之和）并写回
pub async fn calculate_total_points(storage: &Arc<dyn Storage>, quiz_id: i64) -> Result<f64> {
    storage
        .get_quiz_by_id(quiz_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("测验 {quiz_id} 不存在")))?;

    let questions = storage.list_questions_by_quiz(quiz_id).await?;
    let total_points: f64 = questions.iter().map(|q| q.points).sum();

    storage
        .update_quiz_total_points(quiz_id, total_points)
        .await?;

    Ok(total_points)
}
