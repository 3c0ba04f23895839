//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{LearnifyError, Result};
use crate::models::{
    PaginationInfo,
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建成绩（percentage 由调用方在写入前派生）
    pub async fn create_grade_impl(
        &self,
        grader_id: i64,
        percentage: f64,
        req: CreateGradeRequest,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            item_id: Set(req.item_id),
            item_type: Set(req.item_type.to_string()),
            score: Set(req.score),
            max_score: Set(req.max_score),
            percentage: Set(percentage),
            feedback: Set(req.feedback),
            graded_by: Set(grader_id),
            graded_at: Set(now),
            weight: Set(req.weight),
            category: Set(req.category),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 批量获取成绩
    pub async fn list_grades_by_ids_impl(&self, grade_ids: &[i64]) -> Result<Vec<Grade>> {
        if grade_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Grades::find()
            .filter(Column::Id.is_in(grade_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 课程内已发布的成绩
    pub async fn list_published_grades_by_course_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<Grade>> {
        let result = Grades::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::IsPublished.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 某学生在课程内已发布的成绩
    pub async fn list_published_grades_for_student_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Vec<Grade>> {
        let result = Grades::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsPublished.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 列出成绩（分页）
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Grades::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(item_type) = query.item_type {
            select = select.filter(Column::ItemType.eq(item_type.to_string()));
        }
        if let Some(is_published) = query.is_published {
            select = select.filter(Column::IsPublished.eq(is_published));
        }

        // 排序
        select = select.order_by_desc(Column::GradedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新成绩（分数变化时 percentage 由调用方重新派生）
    pub async fn update_grade_impl(
        &self,
        grade_id: i64,
        percentage: Option<f64>,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let existing = self.get_grade_by_id_impl(grade_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(grade_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(score) = update.score {
            model.score = Set(score);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(percentage) = percentage {
            model.percentage = Set(percentage);
        }
        if let Some(feedback) = update.feedback {
            model.feedback = Set(Some(feedback));
        }
        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }
        if let Some(category) = update.category {
            model.category = Set(category);
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_grade_by_id_impl(grade_id).await
    }
}
