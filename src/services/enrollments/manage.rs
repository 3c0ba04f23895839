//! 选课与进度维护

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::enrollments::{
    entities::Enrollment,
    requests::{EnrollRequest, UpdateProgressRequest},
};
use crate::storage::Storage;

/// 学生选课
///
/// 同一学生对同一课程只能有一条选课记录，冲突以 Conflict 返回。
pub async fn enroll(storage: &Arc<dyn Storage>, req: EnrollRequest) -> Result<Enrollment> {
    storage
        .get_course_by_id(req.course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {} 不存在", req.course_id)))?;

    storage
        .get_user_by_id(req.student_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("用户 {} 不存在", req.student_id)))?;

    storage.create_enrollment(req).await
}

/// 获取选课记录
pub async fn get_enrollment(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    course_id: i64,
) -> Result<Enrollment> {
    storage
        .get_enrollment(student_id, course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found("选课记录不存在"))
}

/// 更新学习进度
pub async fn update_progress(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    course_id: i64,
    req: UpdateProgressRequest,
) -> Result<Enrollment> {
    if let Some(progress) = req.progress {
        if !(0.0..=100.0).contains(&progress) {
            return Err(LearnifyError::validation("进度必须在 0-100 之间"));
        }
    }

    let enrollment = storage
        .get_enrollment(student_id, course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found("选课记录不存在"))?;

    storage
        .update_enrollment(enrollment.id, req)
        .await?
        .ok_or_else(|| LearnifyError::not_found("选课记录不存在"))
}
