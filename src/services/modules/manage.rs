//! 章节增删改查

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::modules::{
    entities::Module,
    requests::{CreateModuleRequest, UpdateModuleRequest},
};
use crate::storage::Storage;

/// 创建章节
pub async fn create_module(
    storage: &Arc<dyn Storage>,
    req: CreateModuleRequest,
) -> Result<Module> {
    if req.title.trim().is_empty() {
        return Err(LearnifyError::validation("章节标题不能为空"));
    }

    // 课程必须存在
    storage
        .get_course_by_id(req.course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {} 不存在", req.course_id)))?;

    storage.create_module(req).await
}

/// 获取章节
pub async fn get_module(storage: &Arc<dyn Storage>, module_id: i64) -> Result<Module> {
    storage
        .get_module_by_id(module_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("章节 {module_id} 不存在")))
}

/// 按展示顺序列出课程章节
pub async fn list_modules(storage: &Arc<dyn Storage>, course_id: i64) -> Result<Vec<Module>> {
    storage.list_modules_by_course(course_id).await
}

/// 更新章节
pub async fn update_module(
    storage: &Arc<dyn Storage>,
    module_id: i64,
    req: UpdateModuleRequest,
) -> Result<Module> {
    storage
        .update_module(module_id, req)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("章节 {module_id} 不存在")))
}

/// 删除章节
pub async fn delete_module(storage: &Arc<dyn Storage>, module_id: i64) -> Result<()> {
    let deleted = storage.delete_module(module_id).await?;
    if !deleted {
        return Err(LearnifyError::not_found(format!("章节 {module_id} 不存在")));
    }
    Ok(())
}
