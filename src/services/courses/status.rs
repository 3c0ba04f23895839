//! 课程状态变更

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::courses::entities::{Course, CourseStatus};
use crate::storage::Storage;

/// 变更课程状态（draft/published/archived 自由切换）
pub async fn change_status(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    status: CourseStatus,
) -> Result<Course> {
    storage
        .update_course_status(course_id, status)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))
}
