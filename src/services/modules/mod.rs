pub mod manage;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::modules::{
    entities::Module,
    requests::{CreateModuleRequest, UpdateModuleRequest},
};
use crate::storage::Storage;

pub struct ModuleService {
    storage: Arc<dyn Storage>,
}

impl ModuleService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 创建章节
    pub async fn create_module(&self, req: CreateModuleRequest) -> Result<Module> {
        manage::create_module(&self.storage, req).await
    }

    /// 获取章节
    pub async fn get_module(&self, module_id: i64) -> Result<Module> {
        manage::get_module(&self.storage, module_id).await
    }

    /// 按展示顺序列出课程章节
    pub async fn list_modules(&self, course_id: i64) -> Result<Vec<Module>> {
        manage::list_modules(&self.storage, course_id).await
    }

    /// 更新章节
    pub async fn update_module(
        &self,
        module_id: i64,
        req: UpdateModuleRequest,
    ) -> Result<Module> {
        manage::update_module(&self.storage, module_id, req).await
    }

    /// 删除章节
    pub async fn delete_module(&self, module_id: i64) -> Result<()> {
        manage::delete_module(&self.storage, module_id).await
    }
}
