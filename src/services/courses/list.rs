//! 课程列表

use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::{
    entities::Course, requests::CourseListQuery, responses::CourseListResponse,
};
use crate::storage::Storage;

/// 列出课程（状态/讲师/搜索过滤 + 分页）
pub async fn list_courses(
    storage: &Arc<dyn Storage>,
    query: CourseListQuery,
) -> Result<CourseListResponse> {
    storage.list_courses_with_pagination(query).await
}

/// 列出讲师的课程
pub async fn list_instructor_courses(
    storage: &Arc<dyn Storage>,
    instructor_id: i64,
) -> Result<Vec<Course>> {
    storage.list_instructor_courses(instructor_id).await
}
