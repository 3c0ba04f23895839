pub mod manage;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::enrollments::{
    entities::Enrollment,
    requests::{EnrollRequest, UpdateProgressRequest},
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Arc<dyn Storage>,
}

impl EnrollmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 学生选课
    pub async fn enroll(&self, req: EnrollRequest) -> Result<Enrollment> {
        manage::enroll(&self.storage, req).await
    }

    /// 获取选课记录
    pub async fn get_enrollment(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        manage::get_enrollment(&self.storage, student_id, course_id).await
    }

    /// 更新学习进度（整体进度 + 章节明细）
    pub async fn update_progress(
        &self,
        student_id: i64,
        course_id: i64,
        req: UpdateProgressRequest,
    ) -> Result<Enrollment> {
        manage::update_progress(&self.storage, student_id, course_id, req).await
    }
}
