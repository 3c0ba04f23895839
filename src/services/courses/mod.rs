pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::{
    entities::{Course, CourseStatus},
    requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    responses::CourseListResponse,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Arc<dyn Storage>,
}

impl CourseService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 创建课程（slug 由标题派生，同时懒创建统计快照）
    pub async fn create_course(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        create::create_course(&self.storage, instructor_id, req).await
    }

    /// 通过 ID 获取课程
    pub async fn get_course(&self, course_id: i64) -> Result<Course> {
        get::get_course(&self.storage, course_id).await
    }

    /// 通过 slug 获取课程
    pub async fn get_course_by_slug(&self, slug: &str) -> Result<Course> {
        get::get_course_by_slug(&self.storage, slug).await
    }

    /// 列出课程
    pub async fn list_courses(&self, query: CourseListQuery) -> Result<CourseListResponse> {
        list::list_courses(&self.storage, query).await
    }

    /// 列出讲师的课程
    pub async fn list_instructor_courses(&self, instructor_id: i64) -> Result<Vec<Course>> {
        list::list_instructor_courses(&self.storage, instructor_id).await
    }

    /// 更新课程（标题变化时重新派生 slug）
    pub async fn update_course(
        &self,
        course_id: i64,
        req: UpdateCourseRequest,
    ) -> Result<Course> {
        update::update_course(&self.storage, course_id, req).await
    }

    /// 变更课程状态
    pub async fn change_status(&self, course_id: i64, status: CourseStatus) -> Result<Course> {
        status::change_status(&self.storage, course_id, status).await
    }

    /// 删除课程（统计快照一并删除，事务保证原子性）
    pub async fn delete_course(&self, course_id: i64) -> Result<()> {
        delete::delete_course(&self.storage, course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LearnifyError;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::test_utils::memory_storage;

    async fn seed_instructor(storage: &Arc<dyn Storage>) -> i64 {
        storage
            .create_user(CreateUserRequest {
                firstname: "讲师".to_string(),
                lastname: "测试".to_string(),
                email: "instructor@learnify.app".to_string(),
                password: "$argon2id$fake$hash".to_string(),
                role: UserRole::Instructor,
                phone_number: None,
            })
            .await
            .unwrap()
            .id
    }

    fn create_request(title: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            title: title.to_string(),
            description: "课程描述".to_string(),
            cover_image: None,
            status: CourseStatus::Draft,
            start_date: chrono::Utc::now(),
            end_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_course_derives_slug_and_analytics() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let instructor = seed_instructor(&storage).await;

        let course = service
            .create_course(instructor, create_request("Introduction to Rust"))
            .await
            .unwrap();

        assert_eq!(course.slug, "introduction-to-rust");
        assert_eq!(course.status, CourseStatus::Draft);

        // 统计快照随课程创建
        let analytics = storage
            .get_analytics_by_course(course.id)
            .await
            .unwrap()
            .expect("analytics should exist");
        assert_eq!(analytics.total_students, 0);

        // slug 查询可用
        let by_slug = service
            .get_course_by_slug("introduction-to-rust")
            .await
            .unwrap();
        assert_eq!(by_slug.id, course.id);
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts_on_slug() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let instructor = seed_instructor(&storage).await;

        service
            .create_course(instructor, create_request("Same Title"))
            .await
            .unwrap();
        let result = service
            .create_course(instructor, create_request("Same Title"))
            .await;

        assert!(matches!(result, Err(LearnifyError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_title_reslugs() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let instructor = seed_instructor(&storage).await;

        let course = service
            .create_course(instructor, create_request("Old Title"))
            .await
            .unwrap();

        let updated = service
            .update_course(
                course.id,
                UpdateCourseRequest {
                    title: Some("New Title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "new-title");
    }

    #[tokio::test]
    async fn test_change_status() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let instructor = seed_instructor(&storage).await;

        let course = service
            .create_course(instructor, create_request("Status Course"))
            .await
            .unwrap();

        let published = service
            .change_status(course.id, CourseStatus::Published)
            .await
            .unwrap();
        assert_eq!(published.status, CourseStatus::Published);

        let archived = service
            .change_status(course.id, CourseStatus::Archived)
            .await
            .unwrap();
        assert_eq!(archived.status, CourseStatus::Archived);
    }

    #[tokio::test]
    async fn test_delete_course_removes_analytics() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());
        let instructor = seed_instructor(&storage).await;

        let course = service
            .create_course(instructor, create_request("Doomed Course"))
            .await
            .unwrap();

        service.delete_course(course.id).await.unwrap();

        assert!(
            storage
                .get_course_by_id(course.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .get_analytics_by_course(course.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_course_not_found() {
        let storage = memory_storage().await;
        let service = CourseService::new(storage.clone());

        let result = service.delete_course(404).await;
        assert!(matches!(result, Err(LearnifyError::NotFound(_))));
    }
}
