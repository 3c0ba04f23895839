//! 课时存储操作

use super::SeaOrmStorage;
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{LearnifyError, Result};
use crate::models::lessons::{
    entities::{Lesson, LessonType},
    requests::{CreateLessonRequest, UpdateLessonRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课时
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            module_id: Set(req.module_id),
            title: Set(req.title),
            content: Set(req.content),
            sort_order: Set(req.sort_order),
            lesson_type: Set(req.lesson_type.to_string()),
            duration: Set(req.duration),
            is_published: Set(req.is_published),
            video_url: Set(req.video_url),
            file_url: Set(req.file_url),
            quiz_id: Set(req.quiz_id),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_lesson())
    }

    /// 通过 ID 获取课时
    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 获取 type=assignment 的课时
    pub async fn get_assignment_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .filter(Column::LessonType.eq(LessonType::Assignment.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作业课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 按展示顺序列出章节课时
    pub async fn list_lessons_by_module_impl(&self, module_id: i64) -> Result<Vec<Lesson>> {
        let result = Lessons::find()
            .filter(Column::ModuleId.eq(module_id))
            .order_by_asc(Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_lesson()).collect())
    }

    /// 列出多个章节下的 assignment 课时
    pub async fn list_assignments_by_module_ids_impl(
        &self,
        module_ids: &[i64],
    ) -> Result<Vec<Lesson>> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Lessons::find()
            .filter(Column::ModuleId.is_in(module_ids.to_vec()))
            .filter(Column::LessonType.eq(LessonType::Assignment.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_lesson()).collect())
    }

    /// 更新课时
    pub async fn update_lesson_impl(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        let existing = self.get_lesson_by_id_impl(lesson_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(lesson_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(sort_order) = update.sort_order {
            model.sort_order = Set(sort_order);
        }
        if let Some(duration) = update.duration {
            model.duration = Set(duration);
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }
        if let Some(video_url) = update.video_url {
            model.video_url = Set(Some(video_url));
        }
        if let Some(file_url) = update.file_url {
            model.file_url = Set(Some(file_url));
        }
        if let Some(quiz_id) = update.quiz_id {
            model.quiz_id = Set(Some(quiz_id));
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新课时失败: {e}")))?;

        self.get_lesson_by_id_impl(lesson_id).await
    }

    /// 删除课时
    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(lesson_id)
            .exec(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除课时失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
