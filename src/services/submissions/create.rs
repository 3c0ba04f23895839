//! 作业提交创建

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::submissions::{
    entities::Submission,
    requests::CreateSubmissionRequest,
};
use crate::storage::Storage;

/// 学生提交作业
///
/// - 正文 / 文件 URL / 附件至少要有一个
/// - assignment_id 必须指向 type=assignment 的课时
/// - 截止时间之后提交记为迟交（没有截止时间则永不迟交）
/// - 同一学生对同一作业只能有一条提交，冲突以 Conflict 返回
pub async fn create_submission(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    req: CreateSubmissionRequest,
) -> Result<Submission> {
    if !Submission::has_content(&req.submission_text, &req.file_url, &req.attachments) {
        return Err(LearnifyError::validation(
            "提交必须包含正文、文件 URL 或附件之一",
        ));
    }

    let assignment = storage
        .get_assignment_by_id(req.assignment_id)
        .await?
        .ok_or_else(|| LearnifyError::validation("无效的作业引用"))?;

    let is_late = assignment
        .due_date
        .map(|due| chrono::Utc::now() > due)
        .unwrap_or(false);

    storage.create_submission(student_id, is_late, req).await
}
