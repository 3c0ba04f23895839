//! 作业提交评分

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::grades::{
    entities::{GradeItemType, derive_percentage},
    requests::CreateGradeRequest,
};
use crate::models::submissions::{
    entities::Submission,
    requests::GradeSubmissionRequest,
};
use crate::storage::Storage;

/// 为提交评分
///
/// 创建 assignment 类型的成绩并把 grade_id 回链到提交，
/// 提交状态随之转为 graded。
pub async fn grade_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
    grader_id: i64,
    req: GradeSubmissionRequest,
) -> Result<Submission> {
    if req.max_score <= 0.0 {
        return Err(LearnifyError::validation("满分必须大于 0"));
    }

    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("提交 {submission_id} 不存在")))?;

    // 作业 -> 章节 -> 课程，成绩挂在课程维度上
    let assignment = storage
        .get_lesson_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            LearnifyError::not_found(format!("作业 {} 不存在", submission.assignment_id))
        })?;
    let module = storage
        .get_module_by_id(assignment.module_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("章节 {} 不存在", assignment.module_id)))?;

    let percentage = derive_percentage(req.score, req.max_score);

    let grade = storage
        .create_grade(
            grader_id,
            percentage,
            CreateGradeRequest {
                student_id: submission.student_id,
                course_id: module.course_id,
                item_id: submission.assignment_id,
                item_type: GradeItemType::Assignment,
                score: req.score,
                max_score: req.max_score,
                feedback: req.feedback,
                weight: 1.0,
                category: "assignment".to_string(),
                is_published: req.is_published,
            },
        )
        .await?;

    storage
        .link_submission_grade(submission_id, grade.id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("提交 {submission_id} 不存在")))
}
