//! 测验/题目/选项存储操作

use super::SeaOrmStorage;
use crate::entity::question_options::{
    ActiveModel as OptionActiveModel, Column as OptionColumn, Entity as QuestionOptions,
};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{LearnifyError, Result};
use crate::models::quizzes::{
    entities::{Question, QuestionOption, Quiz},
    requests::{CreateQuestionOptionRequest, CreateQuestionRequest, CreateQuizRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建测验
    pub async fn create_quiz_impl(&self, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            lesson_id: Set(req.lesson_id),
            title: Set(req.title),
            description: Set(req.description.unwrap_or_default()),
            time_limit: Set(req.time_limit),
            passing_score: Set(req.passing_score),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            is_published: Set(req.is_published),
            total_points: Set(0.0),
            shuffle_questions: Set(req.shuffle_questions),
            show_results: Set(req.show_results),
            attempts_allowed: Set(req.attempts_allowed),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建测验失败: {e}")))?;

        Ok(result.into_quiz())
    }

    /// 通过 ID 获取测验
    pub async fn get_quiz_by_id_impl(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    /// 列出课程下的测验
    pub async fn list_quizzes_by_course_impl(&self, course_id: i64) -> Result<Vec<Quiz>> {
        let result = Quizzes::find()
            .filter(Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询测验列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_quiz()).collect())
    }

    /// 覆盖写 total_points 派生值
    pub async fn update_quiz_total_points_impl(
        &self,
        quiz_id: i64,
        total_points: f64,
    ) -> Result<bool> {
        let existing = self.get_quiz_by_id_impl(quiz_id).await?;
        if existing.is_none() {
            return Ok(false);
        }

        let model = ActiveModel {
            id: Set(quiz_id),
            total_points: Set(total_points),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新测验总分失败: {e}")))?;

        Ok(true)
    }

    /// 删除测验
    pub async fn delete_quiz_impl(&self, quiz_id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(quiz_id)
            .exec(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建题目
    pub async fn create_question_impl(&self, req: CreateQuestionRequest) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();

        let model = QuestionActiveModel {
            quiz_id: Set(req.quiz_id),
            text: Set(req.text),
            question_type: Set(req.question_type.to_string()),
            points: Set(req.points),
            sort_order: Set(req.sort_order),
            explanation: Set(req.explanation.unwrap_or_default()),
            sample_answer: Set(req.sample_answer),
            correct_answer: Set(req.correct_answer),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 按展示顺序列出测验题目
    pub async fn list_questions_by_quiz_impl(&self, quiz_id: i64) -> Result<Vec<Question>> {
        let result = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_question()).collect())
    }

    /// 删除题目
    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建选项
    pub async fn create_question_option_impl(
        &self,
        req: CreateQuestionOptionRequest,
    ) -> Result<QuestionOption> {
        let now = chrono::Utc::now().timestamp();

        let model = OptionActiveModel {
            question_id: Set(req.question_id),
            text: Set(req.text),
            is_correct: Set(req.is_correct),
            sort_order: Set(req.sort_order),
            explanation: Set(req.explanation),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建选项失败: {e}")))?;

        Ok(result.into_question_option())
    }

    /// 通过 ID 获取选项
    pub async fn get_question_option_by_id_impl(
        &self,
        option_id: i64,
    ) -> Result<Option<QuestionOption>> {
        let result = QuestionOptions::find_by_id(option_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询选项失败: {e}")))?;

        Ok(result.map(|m| m.into_question_option()))
    }

    /// 按展示顺序列出题目选项
    pub async fn list_options_by_question_impl(
        &self,
        question_id: i64,
    ) -> Result<Vec<QuestionOption>> {
        let result = QuestionOptions::find()
            .filter(OptionColumn::QuestionId.eq(question_id))
            .order_by_asc(OptionColumn::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询选项列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_question_option()).collect())
    }
}
