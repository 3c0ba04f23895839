pub mod course_grade;
pub mod item;
pub mod manage;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::grades::{
    entities::{Grade, GradedItem},
    requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    responses::{CourseGradeSummary, GradeListResponse},
};
use crate::storage::Storage;

pub struct GradeService {
    storage: Arc<dyn Storage>,
}

impl GradeService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 创建成绩（percentage 在写入前派生）
    pub async fn create_grade(&self, grader_id: i64, req: CreateGradeRequest) -> Result<Grade> {
        manage::create_grade(&self.storage, grader_id, req).await
    }

    /// 获取成绩
    pub async fn get_grade(&self, grade_id: i64) -> Result<Grade> {
        manage::get_grade(&self.storage, grade_id).await
    }

    /// 更新成绩（分数变化时重新派生 percentage）
    pub async fn update_grade(&self, grade_id: i64, req: UpdateGradeRequest) -> Result<Grade> {
        manage::update_grade(&self.storage, grade_id, req).await
    }

    /// 列出成绩
    pub async fn list_grades(&self, query: GradeListQuery) -> Result<GradeListResponse> {
        self.storage.list_grades_with_pagination(query).await
    }

    /// 计算某学生的课程总评（简单平均 + 加权平均）
    pub async fn calculate_course_grade(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<CourseGradeSummary> {
        course_grade::calculate_course_grade(&self.storage, course_id, student_id).await
    }

    /// 解析成绩指向的被评分项
    pub async fn get_graded_item(&self, grade_id: i64) -> Result<Option<GradedItem>> {
        item::get_graded_item(&self.storage, grade_id).await
    }
}
