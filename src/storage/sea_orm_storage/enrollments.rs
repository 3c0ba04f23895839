//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{LearnifyError, Result};
use crate::models::enrollments::{
    entities::{Enrollment, EnrollmentStatus},
    requests::{EnrollRequest, UpdateProgressRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 选课
    pub async fn create_enrollment_impl(&self, req: EnrollRequest) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            status: Set(EnrollmentStatus::Active.to_string()),
            progress: Set(0.0),
            module_progress: Set(None),
            enrolled_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "该学生已选修此课程"))?;

        Ok(result.into_enrollment())
    }

    /// 获取某学生在某课程的选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询选课失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 课程内全部选课记录（不过滤状态）
    pub async fn list_enrollments_by_course_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 按状态过滤课程选课记录
    pub async fn list_enrollments_by_course_and_statuses_impl(
        &self,
        course_id: i64,
        statuses: &[EnrollmentStatus],
    ) -> Result<Vec<Enrollment>> {
        let status_values: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();

        let result = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.is_in(status_values))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 更新选课进度/状态
    pub async fn update_enrollment_impl(
        &self,
        enrollment_id: i64,
        update: UpdateProgressRequest,
    ) -> Result<Option<Enrollment>> {
        let existing = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询选课失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(enrollment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(progress) = update.progress {
            model.progress = Set(progress);
        }
        if let Some(module_progress) = update.module_progress {
            model.module_progress = Set(Some(serde_json::to_string(&module_progress)?));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新选课失败: {e}")))?;

        Ok(Some(result.into_enrollment()))
    }
}
