//! 课程查询

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::courses::entities::Course;
use crate::storage::Storage;

/// 通过 ID 获取课程
pub async fn get_course(storage: &Arc<dyn Storage>, course_id: i64) -> Result<Course> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))
}

/// 通过 slug 获取课程
pub async fn get_course_by_slug(storage: &Arc<dyn Storage>, slug: &str) -> Result<Course> {
    storage
        .get_course_by_slug(slug)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {slug} 不存在")))
}
