//! 课程创建

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use crate::storage::Storage;
use crate::utils::slug::slugify;

/// 创建课程
///
/// slug 在写入前从标题显式派生；统计快照随课程一起懒创建。
pub async fn create_course(
    storage: &Arc<dyn Storage>,
    instructor_id: i64,
    req: CreateCourseRequest,
) -> Result<Course> {
    if req.title.trim().is_empty() {
        return Err(LearnifyError::validation("课程标题不能为空"));
    }
    if req.description.trim().is_empty() {
        return Err(LearnifyError::validation("课程描述不能为空"));
    }

    let slug = slugify(&req.title);
    if slug.is_empty() {
        return Err(LearnifyError::validation("课程标题无法生成有效的 slug"));
    }

    let course = storage.create_course(instructor_id, &slug, req).await?;

    // 为新课程创建初始统计快照
    storage.create_analytics(course.id).await?;

    tracing::info!("Course {} ({}) created", course.id, course.slug);

    Ok(course)
}
