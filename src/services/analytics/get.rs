//! 课程统计快照读取

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::analytics::entities::CourseAnalytics;
use crate::storage::Storage;

/// 懒加载读取：快照不存在时创建空快照
///
/// 返回的可能是陈旧数据，刷新由显式 recalculate 触发。
pub async fn get_or_create(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<CourseAnalytics> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))?;

    if let Some(analytics) = storage.get_analytics_by_course(course_id).await? {
        return Ok(analytics);
    }

    storage.create_analytics(course_id).await
}
