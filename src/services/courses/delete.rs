//! 课程删除

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::storage::Storage;

/// 删除课程
///
/// 统计快照与课程在同一个事务里删除，不会留下孤儿快照。
pub async fn delete_course(storage: &Arc<dyn Storage>, course_id: i64) -> Result<()> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))?;

    let deleted = storage.delete_course_with_analytics(course_id).await?;
    if !deleted {
        return Err(LearnifyError::not_found(format!("课程 {course_id} 不存在")));
    }

    tracing::info!("Course {} deleted", course_id);

    Ok(())
}
