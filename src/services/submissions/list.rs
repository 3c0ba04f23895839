//! 作业提交查询

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::submissions::entities::Submission;
use crate::storage::Storage;

/// 获取提交
pub async fn get_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<Submission> {
    storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("提交 {submission_id} 不存在")))
}

/// 列出课程内的全部提交
///
/// 课程 -> 章节 -> assignment 课时 -> 提交，三层展开。
pub async fn list_by_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Vec<Submission>> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))?;

    let modules = storage.list_modules_by_course(course_id).await?;
    let module_ids: Vec<i64> = modules.iter().map(|m| m.id).collect();

    let assignments = storage.list_assignments_by_module_ids(&module_ids).await?;
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

    storage
        .list_submissions_by_assignment_ids(&assignment_ids)
        .await
}
