//! 章节存储操作

use super::SeaOrmStorage;
use crate::entity::modules::{ActiveModel, Column, Entity as Modules};
use crate::errors::{LearnifyError, Result};
use crate::models::modules::{
    entities::Module,
    requests::{CreateModuleRequest, UpdateModuleRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建章节
    pub async fn create_module_impl(&self, req: CreateModuleRequest) -> Result<Module> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description.unwrap_or_default()),
            sort_order: Set(req.sort_order),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建章节失败: {e}")))?;

        Ok(result.into_module())
    }

    /// 通过 ID 获取章节
    pub async fn get_module_by_id_impl(&self, module_id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(module_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询章节失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    /// 按展示顺序列出课程章节
    pub async fn list_modules_by_course_impl(&self, course_id: i64) -> Result<Vec<Module>> {
        let result = Modules::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询章节列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_module()).collect())
    }

    /// 更新章节
    pub async fn update_module_impl(
        &self,
        module_id: i64,
        update: UpdateModuleRequest,
    ) -> Result<Option<Module>> {
        let existing = self.get_module_by_id_impl(module_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(module_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(sort_order) = update.sort_order {
            model.sort_order = Set(sort_order);
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新章节失败: {e}")))?;

        self.get_module_by_id_impl(module_id).await
    }

    /// 删除章节
    pub async fn delete_module_impl(&self, module_id: i64) -> Result<bool> {
        let result = Modules::delete_by_id(module_id)
            .exec(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除章节失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
