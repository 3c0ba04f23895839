pub mod manage;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::lessons::{
    entities::Lesson,
    requests::{CreateLessonRequest, UpdateLessonRequest},
};
use crate::storage::Storage;

pub struct LessonService {
    storage: Arc<dyn Storage>,
}

impl LessonService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 创建课时（按类型校验必填字段）
    pub async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson> {
        manage::create_lesson(&self.storage, req).await
    }

    /// 获取课时
    pub async fn get_lesson(&self, lesson_id: i64) -> Result<Lesson> {
        manage::get_lesson(&self.storage, lesson_id).await
    }

    /// 按展示顺序列出章节课时
    pub async fn list_lessons(&self, module_id: i64) -> Result<Vec<Lesson>> {
        manage::list_lessons(&self.storage, module_id).await
    }

    /// 更新课时（合并后仍需满足类型必填字段）
    pub async fn update_lesson(
        &self,
        lesson_id: i64,
        req: UpdateLessonRequest,
    ) -> Result<Lesson> {
        manage::update_lesson(&self.storage, lesson_id, req).await
    }

    /// 删除课时
    pub async fn delete_lesson(&self, lesson_id: i64) -> Result<()> {
        manage::delete_lesson(&self.storage, lesson_id).await
    }
}
