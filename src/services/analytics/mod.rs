pub mod get;
pub mod recalculate;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::analytics::entities::CourseAnalytics;
use crate::storage::Storage;

pub struct AnalyticsService {
    storage: Arc<dyn Storage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 懒加载读取：快照不存在时创建空快照
    pub async fn get_or_create(&self, course_id: i64) -> Result<CourseAnalytics> {
        get::get_or_create(&self.storage, course_id).await
    }

    /// 全量重算课程统计快照
    pub async fn recalculate(&self, course_id: i64) -> Result<CourseAnalytics> {
        recalculate::recalculate(&self.storage, course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LearnifyError;
    use crate::models::courses::{entities::CourseStatus, requests::CreateCourseRequest};
    use crate::models::enrollments::{
        entities::{EnrollmentStatus, ModuleProgress},
        requests::{EnrollRequest, UpdateProgressRequest},
    };
    use crate::models::grades::{entities::GradeItemType, requests::CreateGradeRequest};
    use crate::models::lessons::{entities::LessonType, requests::CreateLessonRequest};
    use crate::models::modules::requests::CreateModuleRequest;
    use crate::models::quizzes::{
        entities::AttemptStatus,
        requests::{AttemptScoreUpdate, CreateQuizRequest},
    };
    use crate::models::submissions::requests::CreateSubmissionRequest;
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

    async fn seed_course(storage: &Arc<dyn Storage>, slug: &str) -> i64 {
        let instructor = seed_user(storage, &format!("{slug}-teacher@learnify.app")).await;
        storage
            .create_course(
                instructor,
                slug,
                CreateCourseRequest {
                    title: format!("课程 {slug}"),
                    description: "测试课程".to_string(),
                    cover_image: None,
                    status: CourseStatus::Published,
                    start_date: chrono::Utc::now(),
                    end_date: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    async fn enroll_with_progress(
        storage: &Arc<dyn Storage>,
        course_id: i64,
        email: &str,
        progress: f64,
        module_progress: Vec<ModuleProgress>,
    ) -> i64 {
        let student = seed_user(storage, email).await;
        let enrollment = storage
            .create_enrollment(EnrollRequest {
                student_id: student,
                course_id,
            })
            .await
            .unwrap();
        storage
            .update_enrollment(
                enrollment.id,
                UpdateProgressRequest {
                    progress: Some(progress),
                    module_progress: Some(module_progress),
                    status: None,
                },
            )
            .await
            .unwrap();
        student
    }

    #[tokio::test]
    async fn test_missing_course_aborts_without_write() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());

        let result = service.recalculate(404).await;
        assert!(matches!(result, Err(LearnifyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_course_all_zero_without_raising() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "empty-course").await;

        let snapshot = service.recalculate(course_id).await.unwrap();
        assert_eq!(snapshot.total_students, 0);
        assert_eq!(snapshot.average_completion, 0.0);
        assert_eq!(snapshot.average_score, 0.0);
        assert!(snapshot.module_completion_rates.is_empty());
        assert_eq!(snapshot.quiz_attempt_stats.total_attempts, 0);
        assert_eq!(snapshot.assignment_stats.total_submitted, 0);
    }

    #[tokio::test]
    async fn test_average_completion_from_enrollments() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "completion-course").await;

        enroll_with_progress(&storage, course_id, "a@learnify.app", 40.0, Vec::new()).await;
        enroll_with_progress(&storage, course_id, "b@learnify.app", 60.0, Vec::new()).await;

        let snapshot = service.recalculate(course_id).await.unwrap();
        assert_eq!(snapshot.total_students, 2);
        assert_eq!(snapshot.average_completion, 50.0);
    }

    #[tokio::test]
    async fn test_dropped_enrollments_not_counted() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "dropped-course").await;

        enroll_with_progress(&storage, course_id, "a@learnify.app", 80.0, Vec::new()).await;
        let dropped = seed_user(&storage, "dropped@learnify.app").await;
        let enrollment = storage
            .create_enrollment(EnrollRequest {
                student_id: dropped,
                course_id,
            })
            .await
            .unwrap();
        storage
            .update_enrollment(
                enrollment.id,
                UpdateProgressRequest {
                    progress: Some(10.0),
                    module_progress: None,
                    status: Some(EnrollmentStatus::Dropped),
                },
            )
            .await
            .unwrap();

        let snapshot = service.recalculate(course_id).await.unwrap();
        assert_eq!(snapshot.total_students, 1);
        assert_eq!(snapshot.average_completion, 80.0);
    }

    #[tokio::test]
    async fn test_module_completion_rates_per_module() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "module-course").await;

        let module = storage
            .create_module(CreateModuleRequest {
                course_id,
                title: "第一章".to_string(),
                description: None,
                sort_order: 1,
                is_published: true,
            })
            .await
            .unwrap();

        enroll_with_progress(
            &storage,
            course_id,
            "a@learnify.app",
            50.0,
            vec![ModuleProgress {
                module_id: module.id,
                completion_percentage: 80.0,
            }],
        )
        .await;
        enroll_with_progress(
            &storage,
            course_id,
            "b@learnify.app",
            50.0,
            vec![ModuleProgress {
                module_id: module.id,
                completion_percentage: 40.0,
            }],
        )
        .await;
        // 没有该章节进度的选课不计入
        enroll_with_progress(&storage, course_id, "c@learnify.app", 50.0, Vec::new()).await;

        let snapshot = service.recalculate(course_id).await.unwrap();
        assert_eq!(snapshot.module_completion_rates.len(), 1);
        assert_eq!(snapshot.module_completion_rates[0].module_id, module.id);
        assert_eq!(snapshot.module_completion_rates[0].completion_rate, 60.0);
    }

    #[tokio::test]
    async fn test_quiz_stats_from_completed_attempts() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "quiz-stats-course").await;

        let quiz = storage
            .create_quiz(CreateQuizRequest {
                course_id,
                lesson_id: None,
                title: "统计测验".to_string(),
                description: None,
                time_limit: 30,
                passing_score: 70.0,
                due_date: None,
                is_published: true,
                shuffle_questions: false,
                show_results: true,
                attempts_allowed: 0,
            })
            .await
            .unwrap();

        let passed_student = seed_user(&storage, "pass@learnify.app").await;
        let failed_student = seed_user(&storage, "fail@learnify.app").await;

        for (student, score, is_passed) in
            [(passed_student, 90.0, true), (failed_student, 50.0, false)]
        {
            let attempt = storage
                .create_quiz_attempt(quiz.id, student, 1)
                .await
                .unwrap();
            storage
                .save_attempt_score(
                    attempt.id,
                    AttemptScoreUpdate {
                        score,
                        is_passed,
                        status: Some(AttemptStatus::Completed),
                        end_time: Some(chrono::Utc::now()),
                        time_spent: Some(120),
                    },
                )
                .await
                .unwrap();
        }

        // 未完成的作答不计入
        let in_progress = seed_user(&storage, "slow@learnify.app").await;
        storage
            .create_quiz_attempt(quiz.id, in_progress, 1)
            .await
            .unwrap();

        let snapshot = service.recalculate(course_id).await.unwrap();
        assert_eq!(snapshot.quiz_attempt_stats.total_attempts, 2);
        assert_eq!(snapshot.quiz_attempt_stats.average_score, 70.0);
        assert_eq!(snapshot.quiz_attempt_stats.pass_rate, 50.0);
    }

    #[tokio::test]
    async fn test_assignment_stats_with_graded_submissions() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "assignment-course").await;

        let module = storage
            .create_module(CreateModuleRequest {
                course_id,
                title: "作业章节".to_string(),
                description: None,
                sort_order: 1,
                is_published: true,
            })
            .await
            .unwrap();

        // 已过期的作业，之后的提交都是迟交
        let assignment = storage
            .create_lesson(CreateLessonRequest {
                module_id: module.id,
                title: "课后作业".to_string(),
                content: "写一篇总结".to_string(),
                sort_order: 1,
                lesson_type: LessonType::Assignment,
                duration: 0,
                is_published: true,
                video_url: None,
                file_url: None,
                quiz_id: None,
                due_date: Some(chrono::Utc::now() - chrono::Duration::days(1)),
            })
            .await
            .unwrap();

        let graded_student = seed_user(&storage, "graded@learnify.app").await;
        let ungraded_student = seed_user(&storage, "ungraded@learnify.app").await;

        let graded_submission = storage
            .create_submission(
                graded_student,
                true,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    submission_text: Some("提交内容".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();
        storage
            .create_submission(
                ungraded_student,
                false,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    submission_text: Some("另一份提交".to_string()),
                    file_url: None,
                    attachments: Vec::new(),
                },
            )
            .await
            .unwrap();

        let grade = storage
            .create_grade(
                1,
                75.0,
                CreateGradeRequest {
                    student_id: graded_student,
                    course_id,
                    item_id: assignment.id,
                    item_type: GradeItemType::Assignment,
                    score: 75.0,
                    max_score: 100.0,
                    feedback: None,
                    weight: 1.0,
                    category: "assignment".to_string(),
                    is_published: true,
                },
            )
            .await
            .unwrap();
        storage
            .link_submission_grade(graded_submission.id, grade.id)
            .await
            .unwrap();

        let snapshot = service.recalculate(course_id).await.unwrap();
        assert_eq!(snapshot.assignment_stats.total_submitted, 2);
        assert_eq!(snapshot.assignment_stats.late_submissions, 1);
        // 只有已评分的提交计入均分
        assert_eq!(snapshot.assignment_stats.average_score, 75.0);
        // 已发布成绩同时计入课程整体均分
        assert_eq!(snapshot.average_score, 75.0);
    }

    #[tokio::test]
    async fn test_snapshot_fully_overwritten_on_recalculate() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "overwrite-course").await;

        enroll_with_progress(&storage, course_id, "a@learnify.app", 30.0, Vec::new()).await;
        let first = service.recalculate(course_id).await.unwrap();
        assert_eq!(first.total_students, 1);
        assert_eq!(first.average_completion, 30.0);

        enroll_with_progress(&storage, course_id, "b@learnify.app", 90.0, Vec::new()).await;
        let second = service.recalculate(course_id).await.unwrap();
        assert_eq!(second.total_students, 2);
        assert_eq!(second.average_completion, 60.0);

        // 持久化的是整条覆盖后的快照
        let persisted = storage
            .get_analytics_by_course(course_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.total_students, 2);
        assert_eq!(persisted.average_completion, 60.0);
    }

    #[tokio::test]
    async fn test_get_or_create_is_lazy() {
        let storage = memory_storage().await;
        let service = AnalyticsService::new(storage.clone());
        let course_id = seed_course(&storage, "lazy-course").await;

        assert!(
            storage
                .get_analytics_by_course(course_id)
                .await
                .unwrap()
                .is_none()
        );

        let snapshot = service.get_or_create(course_id).await.unwrap();
        assert_eq!(snapshot.course_id, course_id);
        assert_eq!(snapshot.total_students, 0);

        // 第二次读取返回同一条
        let again = service.get_or_create(course_id).await.unwrap();
        assert_eq!(again.course_id, course_id);
    }
}
