//! 测试用存储构造

use std::sync::Arc;

use super::{Storage, sea_orm_storage::SeaOrmStorage};

/// 独立的内存 SQLite 存储，迁移已执行
///
/// 连接池限制为单连接，保证所有操作落在同一个内存数据库上。
pub async fn memory_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::new_with_url(":memory:", 1, 5)
        .await
        .expect("in-memory storage should initialize");
    Arc::new(storage)
}
