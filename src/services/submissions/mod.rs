pub mod create;
pub mod grade;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::{
    entities::Submission,
    requests::{CreateSubmissionRequest, GradeSubmissionRequest},
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 学生提交作业
    pub async fn create_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        create::create_submission(&self.storage, student_id, req).await
    }

    /// 获取提交
    pub async fn get_submission(&self, submission_id: i64) -> Result<Submission> {
        list::get_submission(&self.storage, submission_id).await
    }

    /// 为提交评分（创建成绩并回链）
    pub async fn grade_submission(
        &self,
        submission_id: i64,
        grader_id: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Submission> {
        grade::grade_submission(&self.storage, submission_id, grader_id, req).await
    }

    /// 列出某作业的全部提交
    pub async fn list_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.storage
            .list_submissions_by_assignment(assignment_id)
            .await
    }

    /// 列出课程内的全部提交（跨章节聚合）
    pub async fn list_by_course(&self, course_id: i64) -> Result<Vec<Submission>> {
        list::list_by_course(&self.storage, course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LearnifyError;
    use crate::models::courses::{entities::CourseStatus, requests::CreateCourseRequest};
    use crate::models::lessons::{entities::LessonType, requests::CreateLessonRequest};
    use crate::models::modules::requests::CreateModuleRequest;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::test_utils::memory_storage;

    async fn seed_user(storage: &Arc<dyn Storage>, email: &str) -> i64 {
        storage
            .create_user(CreateUserRequest {
                firstname: "测试".to_string(),
                lastname: "用户".to_string(),
                email: email.to_string(),
                password: "$argon2id$fake$hash".to_string(),
                role: UserRole::Student,
                phone_number: None,
            })
            .await
            .unwrap()
            .id
    }

    /// 搭一个带 assignment 课时的课程，返回 (course_id, assignment_id)
    async fn seed_assignment(
        storage: &Arc<dyn Storage>,
        due_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> (i64, i64) {
        let instructor = seed_user(storage, "teacher@learnify.app").await;
        let course = storage
            .create_course(
                instructor,
                "submission-course",
                CreateCourseRequest {
                    title: "提交测试课程".to_string(),
                    description: "测试".to_string(),
                    cover_image: None,
                    status: CourseStatus::Published,
                    start_date: chrono::Utc::now(),
                    end_date: None,
                },
            )
            .await
            .unwrap();
        let module = storage
            .create_module(CreateModuleRequest {
                course_id: course.id,
                title: "章节".to_string(),
                description: None,
                sort_order: 1,
                is_published: true,
            })
            .await
            .unwrap();
        let assignment = storage
            .create_lesson(CreateLessonRequest {
                module_id: module.id,
                title: "作业".to_string(),
                content: "作业说明".to_string(),
                sort_order: 1,
                lesson_type: LessonType::Assignment,
                duration: 0,
                is_published: true,
                video_url: None,
                file_url: None,
                quiz_id: None,
                due_date,
            })
            .await
            .unwrap();

        (course.id, assignment.id)
    }

    #[tokio::test]
    async fn test_submission_requires_content() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let (_, assignment_id) = seed_assignment(&storage, None).await;
        let student = seed_user(&storage, "student@learnify.app").await;

        let result = service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: None,
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(LearnifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submission_rejects_non_assignment_lesson() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let (_, assignment_id) = seed_assignment(&storage, None).await;
        let student = seed_user(&storage, "student@learnify.app").await;

        // 指向 text 课时的提交被拒绝
        let text_lesson = storage
            .create_lesson(CreateLessonRequest {
                module_id: storage
                    .get_lesson_by_id(assignment_id)
                    .await
                    .unwrap()
                    .unwrap()
                    .module_id,
                title: "阅读材料".to_string(),
                content: "正文".to_string(),
                sort_order: 2,
                lesson_type: LessonType::Text,
                duration: 10,
                is_published: true,
                video_url: None,
                file_url: None,
                quiz_id: None,
                due_date: None,
            })
            .await
            .unwrap();

        let result = service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id: text_lesson.id,
                    submission_text: Some("内容".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(LearnifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_submission_conflict() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let (_, assignment_id) = seed_assignment(&storage, None).await;
        let student = seed_user(&storage, "student@learnify.app").await;

        service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: Some("第一次".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();

        let result = service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: Some("第二次".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(LearnifyError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_late_submission_detected() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let past_due = chrono::Utc::now() - chrono::Duration::days(1);
        let (_, assignment_id) = seed_assignment(&storage, Some(past_due)).await;
        let student = seed_user(&storage, "late@learnify.app").await;

        let submission = service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: Some("迟到了".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();

        assert!(submission.is_late);
    }

    #[tokio::test]
    async fn test_no_due_date_never_late() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let (_, assignment_id) = seed_assignment(&storage, None).await;
        let student = seed_user(&storage, "ontime@learnify.app").await;

        let submission = service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: Some("按时提交".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();

        assert!(!submission.is_late);
    }

    #[tokio::test]
    async fn test_grade_submission_links_grade() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let (course_id, assignment_id) = seed_assignment(&storage, None).await;
        let student = seed_user(&storage, "student@learnify.app").await;
        let grader = seed_user(&storage, "grader@learnify.app").await;

        let submission = service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: Some("作业内容".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();

        let graded = service
            .grade_submission(
                submission.id,
                grader,
                GradeSubmissionRequest {
                    score: 75.0,
                    max_score: 100.0,
                    feedback: Some("还不错".to_string()),
                    is_published: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(graded.status, SubmissionStatus::Graded);
        let grade_id = graded.grade_id.expect("grade should be linked");

        // Grade 的 percentage 在写入前派生
        let grade = storage.get_grade_by_id(grade_id).await.unwrap().unwrap();
        assert_eq!(grade.percentage, 75.0);
        assert_eq!(grade.course_id, course_id);
    }

    #[tokio::test]
    async fn test_list_by_course_walks_modules() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone());
        let (course_id, assignment_id) = seed_assignment(&storage, None).await;
        let student = seed_user(&storage, "student@learnify.app").await;

        service
            .create_submission(
                student,
                CreateSubmissionRequest {
                    assignment_id,
                    submission_text: Some("内容".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();

        let submissions = service.list_by_course(course_id).await.unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].assignment_id, assignment_id);
    }
}
