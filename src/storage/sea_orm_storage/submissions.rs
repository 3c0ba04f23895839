//! 作业提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{LearnifyError, Result};
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::CreateSubmissionRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        is_late: bool,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let attachments = if req.attachments.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&req.attachments)?)
        };

        let model = ActiveModel {
            student_id: Set(student_id),
            assignment_id: Set(req.assignment_id),
            submission_text: Set(req.submission_text),
            file_url: Set(req.file_url),
            attachments: Set(attachments),
            submitted_at: Set(now),
            status: Set(SubmissionStatus::Submitted.to_string()),
            is_late: Set(is_late),
            grade_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "该作业已有提交记录"))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_by_student_and_assignment_impl(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某作业的全部提交
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 列出多个作业的全部提交
    pub async fn list_submissions_by_assignment_ids_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Submissions::find()
            .filter(Column::AssignmentId.is_in(assignment_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 关联成绩并把状态置为 graded
    pub async fn link_submission_grade_impl(
        &self,
        submission_id: i64,
        grade_id: i64,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(submission_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(submission_id),
            grade_id: Set(Some(grade_id)),
            status: Set(SubmissionStatus::Graded.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("关联成绩失败: {e}")))?;

        self.get_submission_by_id_impl(submission_id).await
    }
}
