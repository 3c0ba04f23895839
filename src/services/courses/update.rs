//! 课程更新

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::courses::{entities::Course, requests::UpdateCourseRequest};
use crate::storage::Storage;
use crate::utils::slug::slugify;

/// 更新课程
///
/// 标题变化时重新派生 slug，其余字段按提供的内容覆盖。
pub async fn update_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    req: UpdateCourseRequest,
) -> Result<Course> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))?;

    let slug = match &req.title {
        Some(title) => {
            let slug = slugify(title);
            if slug.is_empty() {
                return Err(LearnifyError::validation("课程标题无法生成有效的 slug"));
            }
            Some(slug)
        }
        None => None,
    };

    storage
        .update_course(course_id, slug, req)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))
}
