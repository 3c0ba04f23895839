//! 测验作答与作答记录存储操作

use super::SeaOrmStorage;
use crate::entity::quiz_attempts::{ActiveModel, Column, Entity as QuizAttempts};
use crate::entity::quiz_responses::{
    ActiveModel as ResponseActiveModel, Column as ResponseColumn, Entity as QuizResponses,
};
use crate::errors::{LearnifyError, Result};
use crate::models::quizzes::{
    entities::{AttemptStatus, QuizAttempt, QuizResponse},
    requests::{AttemptScoreUpdate, ManualGradeRequest, UpsertResponseData},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建作答记录（in_progress）
    pub async fn create_quiz_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
        attempt_number: i32,
    ) -> Result<QuizAttempt> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            attempt_number: Set(attempt_number),
            status: Set(AttemptStatus::InProgress.to_string()),
            score: Set(0.0),
            is_passed: Set(false),
            start_time: Set(now),
            end_time: Set(None),
            time_spent: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "该次作答已存在"))?;

        Ok(result.into_quiz_attempt())
    }

    /// 通过 ID 获取作答
    pub async fn get_quiz_attempt_by_id_impl(
        &self,
        attempt_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz_attempt()))
    }

    /// 统计学生在某测验的作答次数
    pub async fn count_quiz_attempts_impl(&self, quiz_id: i64, student_id: i64) -> Result<i64> {
        let count = QuizAttempts::find()
            .filter(Column::QuizId.eq(quiz_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("统计作答次数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 列出多个测验下已完成的作答
    pub async fn list_completed_attempts_by_quiz_ids_impl(
        &self,
        quiz_ids: &[i64],
    ) -> Result<Vec<QuizAttempt>> {
        if quiz_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = QuizAttempts::find()
            .filter(Column::QuizId.is_in(quiz_ids.to_vec()))
            .filter(Column::Status.eq(AttemptStatus::Completed.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_quiz_attempt()).collect())
    }

    /// 写入评分结果（首次完成时带状态与计时字段）
    pub async fn save_attempt_score_impl(
        &self,
        attempt_id: i64,
        update: AttemptScoreUpdate,
    ) -> Result<Option<QuizAttempt>> {
        let existing = self.get_quiz_attempt_by_id_impl(attempt_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(attempt_id),
            score: Set(update.score),
            is_passed: Set(update.is_passed),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(Some(end_time.timestamp()));
        }
        if let Some(time_spent) = update.time_spent {
            model.time_spent = Set(time_spent);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("保存作答分数失败: {e}")))?;

        self.get_quiz_attempt_by_id_impl(attempt_id).await
    }

    /// 更新作答状态
    pub async fn update_attempt_status_impl(
        &self,
        attempt_id: i64,
        status: AttemptStatus,
    ) -> Result<Option<QuizAttempt>> {
        let existing = self.get_quiz_attempt_by_id_impl(attempt_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(attempt_id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新作答状态失败: {e}")))?;

        self.get_quiz_attempt_by_id_impl(attempt_id).await
    }

    /// 按 (quiz_attempt_id, question_id) 幂等保存作答记录
    ///
    /// 已存在时更新作答内容与评分字段，而不是新建一条。
    pub async fn upsert_quiz_response_impl(
        &self,
        data: UpsertResponseData,
    ) -> Result<QuizResponse> {
        let now = chrono::Utc::now().timestamp();

        let existing = QuizResponses::find()
            .filter(ResponseColumn::QuizAttemptId.eq(data.quiz_attempt_id))
            .filter(ResponseColumn::QuestionId.eq(data.question_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作答记录失败: {e}")))?;

        let result = match existing {
            Some(found) => {
                let model = ResponseActiveModel {
                    id: Set(found.id),
                    selected_option_id: Set(data.selected_option_id),
                    text_response: Set(data.text_response),
                    is_correct: Set(data.is_correct),
                    points_awarded: Set(data.points_awarded),
                    max_points: Set(data.max_points),
                    updated_at: Set(now),
                    ..Default::default()
                };

                model.update(&self.db).await.map_err(|e| {
                    LearnifyError::database_operation(format!("更新作答记录失败: {e}"))
                })?
            }
            None => {
                let model = ResponseActiveModel {
                    quiz_attempt_id: Set(data.quiz_attempt_id),
                    question_id: Set(data.question_id),
                    selected_option_id: Set(data.selected_option_id),
                    text_response: Set(data.text_response),
                    is_correct: Set(data.is_correct),
                    points_awarded: Set(data.points_awarded),
                    max_points: Set(data.max_points),
                    graded_by: Set(None),
                    graded_at: Set(None),
                    feedback: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| Self::map_insert_err(e, "该题已有作答记录"))?
            }
        };

        Ok(result.into_quiz_response())
    }

    /// 获取某次作答中某题的记录
    pub async fn get_quiz_response_impl(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<QuizResponse>> {
        let result = QuizResponses::find()
            .filter(ResponseColumn::QuizAttemptId.eq(attempt_id))
            .filter(ResponseColumn::QuestionId.eq(question_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz_response()))
    }

    /// 列出某次作答的全部记录
    pub async fn list_responses_by_attempt_impl(
        &self,
        attempt_id: i64,
    ) -> Result<Vec<QuizResponse>> {
        let result = QuizResponses::find()
            .filter(ResponseColumn::QuizAttemptId.eq(attempt_id))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_quiz_response()).collect())
    }

    /// 文本题人工评分
    pub async fn update_response_manual_grade_impl(
        &self,
        response_id: i64,
        grader_id: i64,
        grade: ManualGradeRequest,
    ) -> Result<Option<QuizResponse>> {
        let existing = QuizResponses::find_by_id(response_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作答记录失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ResponseActiveModel {
            id: Set(response_id),
            is_correct: Set(Some(grade.is_correct)),
            points_awarded: Set(grade.points_awarded),
            graded_by: Set(Some(grader_id)),
            graded_at: Set(Some(now)),
            feedback: Set(grade.feedback),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("人工评分失败: {e}")))?;

        Ok(Some(result.into_quiz_response()))
    }
}
