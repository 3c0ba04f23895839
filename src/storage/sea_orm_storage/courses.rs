//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::course_analytics::{
    Column as AnalyticsColumn, Entity as CourseAnalyticsEntity,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{LearnifyError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        slug: &str,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            instructor_id: Set(instructor_id),
            title: Set(req.title),
            description: Set(req.description),
            slug: Set(slug.to_string()),
            cover_image: Set(req.cover_image.unwrap_or_default()),
            status: Set(req.status.to_string()),
            start_date: Set(req.start_date.timestamp()),
            end_date: Set(req.end_date.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "同名课程已存在"))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过 slug 获取课程
    pub async fn get_course_by_slug_impl(&self, slug: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出课程（分页）
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = Courses::find();

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 讲师筛选
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        // 标题/描述模糊搜索
        if let Some(search) = query.search.filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(pattern.clone()))
                    .add(Column::Description.like(pattern)),
            );
        }

        // 排序（默认按创建时间倒序）
        let ascending = query.order.as_deref() == Some("asc");
        let sort_column = match query.sort.as_deref() {
            Some("title") => Column::Title,
            Some("start_date") => Column::StartDate,
            Some("updated_at") => Column::UpdatedAt,
            _ => Column::CreatedAt,
        };
        select = if ascending {
            select.order_by_asc(sort_column)
        } else {
            select.order_by_desc(sort_column)
        };

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出讲师的课程（按创建时间倒序）
    pub async fn list_instructor_courses_impl(&self, instructor_id: i64) -> Result<Vec<Course>> {
        let result = Courses::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询讲师课程失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        slug: Option<String>,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(slug) = slug {
            model.slug = Set(slug);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(cover_image) = update.cover_image {
            model.cover_image = Set(cover_image);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date.timestamp());
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date.timestamp()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "同名课程已存在"))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 更新课程状态
    pub async fn update_course_status_impl(
        &self,
        course_id: i64,
        status: CourseStatus,
    ) -> Result<Option<Course>> {
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(course_id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新课程状态失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程及其统计快照（事务，保证两者同时消失）
    pub async fn delete_course_with_analytics_impl(&self, course_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LearnifyError::database_operation(format!("开启事务失败: {e}")))?;

        CourseAnalyticsEntity::delete_many()
            .filter(AnalyticsColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除课程统计失败: {e}")))?;

        let result = Courses::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LearnifyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
