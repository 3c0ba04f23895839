//! 成绩增改查

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::grades::{
    entities::{Grade, derive_percentage},
    requests::{CreateGradeRequest, UpdateGradeRequest},
};
use crate::storage::Storage;

/// 创建成绩
///
/// percentage = score / max_score * 100，写入前显式计算。
pub async fn create_grade(
    storage: &Arc<dyn Storage>,
    grader_id: i64,
    req: CreateGradeRequest,
) -> Result<Grade> {
    if req.max_score <= 0.0 {
        return Err(LearnifyError::validation("满分必须大于 0"));
    }
    if req.score < 0.0 {
        return Err(LearnifyError::validation("分数不能为负数"));
    }

    let percentage = derive_percentage(req.score, req.max_score);

    storage.create_grade(grader_id, percentage, req).await
}

/// 获取成绩
pub async fn get_grade(storage: &Arc<dyn Storage>, grade_id: i64) -> Result<Grade> {
    storage
        .get_grade_by_id(grade_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("成绩 {grade_id} 不存在")))
}

/// 更新成绩
///
/// score/max_score 任一变化时用合并后的值重新派生 percentage。
pub async fn update_grade(
    storage: &Arc<dyn Storage>,
    grade_id: i64,
    req: UpdateGradeRequest,
) -> Result<Grade> {
    let existing = storage
        .get_grade_by_id(grade_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("成绩 {grade_id} 不存在")))?;

    let percentage = if req.score.is_some() || req.max_score.is_some() {
        let score = req.score.unwrap_or(existing.score);
        let max_score = req.max_score.unwrap_or(existing.max_score);
        if max_score <= 0.0 {
            return Err(LearnifyError::validation("满分必须大于 0"));
        }
        Some(derive_percentage(score, max_score))
    } else {
        None
    };

    storage
        .update_grade(grade_id, percentage, req)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("成绩 {grade_id} 不存在")))
}
