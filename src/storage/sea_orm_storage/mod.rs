//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod analytics;
mod courses;
mod enrollments;
mod grades;
mod lessons;
mod modules;
mod quiz_attempts;
mod quizzes;
mod submissions;
mod users;
mod verification_codes;

use crate::config::AppConfig;
use crate::errors::{LearnifyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例（读取全局配置）
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;
        Self::new_with_url(&db_url, config.database.pool_size, config.database.timeout).await
    }

    /// 使用指定连接 URL 创建存储实例（测试中直连内存 SQLite）
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LearnifyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LearnifyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LearnifyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LearnifyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 把唯一约束冲突映射为 Conflict，其余数据库错误统一包装
    pub(crate) fn map_insert_err(err: sea_orm::DbErr, conflict_msg: &str) -> LearnifyError {
        if matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ) {
            LearnifyError::conflict(conflict_msg)
        } else {
            LearnifyError::database_operation(err.to_string())
        }
    }
}

// Storage trait 实现
use crate::models::{
    analytics::entities::CourseAnalytics,
    auth::entities::{CodeType, VerificationCode},
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::{EnrollRequest, UpdateProgressRequest},
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, UpdateLessonRequest},
    },
    modules::{
        entities::Module,
        requests::{CreateModuleRequest, UpdateModuleRequest},
    },
    quizzes::{
        entities::{AttemptStatus, Question, QuestionOption, Quiz, QuizAttempt, QuizResponse},
        requests::{
            AttemptScoreUpdate, CreateQuestionOptionRequest, CreateQuestionRequest,
            CreateQuizRequest, ManualGradeRequest, UpsertResponseData,
        },
    },
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn set_reset_password_token(
        &self,
        user_id: i64,
        token_hash: Option<String>,
        expires_at: Option<i64>,
    ) -> Result<bool> {
        self.set_reset_password_token_impl(user_id, token_hash, expires_at)
            .await
    }

    async fn get_user_by_reset_token(&self, token_hash: &str) -> Result<Option<User>> {
        self.get_user_by_reset_token_impl(token_hash).await
    }

    // 验证码模块
    async fn replace_verification_code(
        &self,
        user_id: i64,
        code_type: CodeType,
        code: &str,
        expires_at: i64,
        max_attempts: i32,
    ) -> Result<VerificationCode> {
        self.replace_verification_code_impl(user_id, code_type, code, expires_at, max_attempts)
            .await
    }

    async fn get_active_verification_code(
        &self,
        user_id: i64,
        code_type: CodeType,
    ) -> Result<Option<VerificationCode>> {
        self.get_active_verification_code_impl(user_id, code_type)
            .await
    }

    async fn mark_verification_code_used(&self, id: i64) -> Result<bool> {
        self.mark_verification_code_used_impl(id).await
    }

    async fn increment_verification_attempts(&self, id: i64) -> Result<bool> {
        self.increment_verification_attempts_impl(id).await
    }

    async fn cleanup_expired_codes(&self) -> Result<u64> {
        self.cleanup_expired_codes_impl().await
    }

    // 课程模块
    async fn create_course(
        &self,
        instructor_id: i64,
        slug: &str,
        course: CreateCourseRequest,
    ) -> Result<Course> {
        self.create_course_impl(instructor_id, slug, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>> {
        self.get_course_by_slug_impl(slug).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_instructor_courses(&self, instructor_id: i64) -> Result<Vec<Course>> {
        self.list_instructor_courses_impl(instructor_id).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        slug: Option<String>,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, slug, update).await
    }

    async fn update_course_status(
        &self,
        course_id: i64,
        status: CourseStatus,
    ) -> Result<Option<Course>> {
        self.update_course_status_impl(course_id, status).await
    }

    async fn delete_course_with_analytics(&self, course_id: i64) -> Result<bool> {
        self.delete_course_with_analytics_impl(course_id).await
    }

    // 章节模块
    async fn create_module(&self, module: CreateModuleRequest) -> Result<Module> {
        self.create_module_impl(module).await
    }

    async fn get_module_by_id(&self, module_id: i64) -> Result<Option<Module>> {
        self.get_module_by_id_impl(module_id).await
    }

    async fn list_modules_by_course(&self, course_id: i64) -> Result<Vec<Module>> {
        self.list_modules_by_course_impl(course_id).await
    }

    async fn update_module(
        &self,
        module_id: i64,
        update: UpdateModuleRequest,
    ) -> Result<Option<Module>> {
        self.update_module_impl(module_id, update).await
    }

    async fn delete_module(&self, module_id: i64) -> Result<bool> {
        self.delete_module_impl(module_id).await
    }

    // 课时模块
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn get_assignment_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_assignment_by_id_impl(lesson_id).await
    }

    async fn list_lessons_by_module(&self, module_id: i64) -> Result<Vec<Lesson>> {
        self.list_lessons_by_module_impl(module_id).await
    }

    async fn list_assignments_by_module_ids(&self, module_ids: &[i64]) -> Result<Vec<Lesson>> {
        self.list_assignments_by_module_ids_impl(module_ids).await
    }

    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(lesson_id, update).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    // 测验模块
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(quiz).await
    }

    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(quiz_id).await
    }

    async fn list_quizzes_by_course(&self, course_id: i64) -> Result<Vec<Quiz>> {
        self.list_quizzes_by_course_impl(course_id).await
    }

    async fn update_quiz_total_points(&self, quiz_id: i64, total_points: f64) -> Result<bool> {
        self.update_quiz_total_points_impl(quiz_id, total_points)
            .await
    }

    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool> {
        self.delete_quiz_impl(quiz_id).await
    }

    // 题目与选项模块
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<Question> {
        self.create_question_impl(question).await
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(question_id).await
    }

    async fn list_questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>> {
        self.list_questions_by_quiz_impl(quiz_id).await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.delete_question_impl(question_id).await
    }

    async fn create_question_option(
        &self,
        option: CreateQuestionOptionRequest,
    ) -> Result<QuestionOption> {
        self.create_question_option_impl(option).await
    }

    async fn get_question_option_by_id(&self, option_id: i64) -> Result<Option<QuestionOption>> {
        self.get_question_option_by_id_impl(option_id).await
    }

    async fn list_options_by_question(&self, question_id: i64) -> Result<Vec<QuestionOption>> {
        self.list_options_by_question_impl(question_id).await
    }

    // 作答模块
    async fn create_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        attempt_number: i32,
    ) -> Result<QuizAttempt> {
        self.create_quiz_attempt_impl(quiz_id, student_id, attempt_number)
            .await
    }

    async fn get_quiz_attempt_by_id(&self, attempt_id: i64) -> Result<Option<QuizAttempt>> {
        self.get_quiz_attempt_by_id_impl(attempt_id).await
    }

    async fn count_quiz_attempts(&self, quiz_id: i64, student_id: i64) -> Result<i64> {
        self.count_quiz_attempts_impl(quiz_id, student_id).await
    }

    async fn list_completed_attempts_by_quiz_ids(
        &self,
        quiz_ids: &[i64],
    ) -> Result<Vec<QuizAttempt>> {
        self.list_completed_attempts_by_quiz_ids_impl(quiz_ids)
            .await
    }

    async fn save_attempt_score(
        &self,
        attempt_id: i64,
        update: AttemptScoreUpdate,
    ) -> Result<Option<QuizAttempt>> {
        self.save_attempt_score_impl(attempt_id, update).await
    }

    async fn update_attempt_status(
        &self,
        attempt_id: i64,
        status: AttemptStatus,
    ) -> Result<Option<QuizAttempt>> {
        self.update_attempt_status_impl(attempt_id, status).await
    }

    async fn upsert_quiz_response(&self, data: UpsertResponseData) -> Result<QuizResponse> {
        self.upsert_quiz_response_impl(data).await
    }

    async fn get_quiz_response(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<QuizResponse>> {
        self.get_quiz_response_impl(attempt_id, question_id).await
    }

    async fn list_responses_by_attempt(&self, attempt_id: i64) -> Result<Vec<QuizResponse>> {
        self.list_responses_by_attempt_impl(attempt_id).await
    }

    async fn update_response_manual_grade(
        &self,
        response_id: i64,
        grader_id: i64,
        grade: ManualGradeRequest,
    ) -> Result<Option<QuizResponse>> {
        self.update_response_manual_grade_impl(response_id, grader_id, grade)
            .await
    }

    // 成绩模块
    async fn create_grade(
        &self,
        grader_id: i64,
        percentage: f64,
        grade: CreateGradeRequest,
    ) -> Result<Grade> {
        self.create_grade_impl(grader_id, percentage, grade).await
    }

    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(grade_id).await
    }

    async fn list_grades_by_ids(&self, grade_ids: &[i64]) -> Result<Vec<Grade>> {
        self.list_grades_by_ids_impl(grade_ids).await
    }

    async fn list_published_grades_by_course(&self, course_id: i64) -> Result<Vec<Grade>> {
        self.list_published_grades_by_course_impl(course_id).await
    }

    async fn list_published_grades_for_student(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Vec<Grade>> {
        self.list_published_grades_for_student_impl(course_id, student_id)
            .await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(
        &self,
        grade_id: i64,
        percentage: Option<f64>,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(grade_id, percentage, update).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        is_late: bool,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, is_late, submission)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_student_and_assignment(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_student_and_assignment_impl(student_id, assignment_id)
            .await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn list_submissions_by_assignment_ids(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_ids_impl(assignment_ids)
            .await
    }

    async fn link_submission_grade(
        &self,
        submission_id: i64,
        grade_id: i64,
    ) -> Result<Option<Submission>> {
        self.link_submission_grade_impl(submission_id, grade_id)
            .await
    }

    // 选课模块
    async fn create_enrollment(&self, enrollment: EnrollRequest) -> Result<Enrollment> {
        self.create_enrollment_impl(enrollment).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    async fn list_enrollments_by_course(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_course_impl(course_id).await
    }

    async fn list_enrollments_by_course_and_statuses(
        &self,
        course_id: i64,
        statuses: &[EnrollmentStatus],
    ) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_course_and_statuses_impl(course_id, statuses)
            .await
    }

    async fn update_enrollment(
        &self,
        enrollment_id: i64,
        update: UpdateProgressRequest,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_impl(enrollment_id, update).await
    }

    // 统计模块
    async fn get_analytics_by_course(&self, course_id: i64) -> Result<Option<CourseAnalytics>> {
        self.get_analytics_by_course_impl(course_id).await
    }

    async fn create_analytics(&self, course_id: i64) -> Result<CourseAnalytics> {
        self.create_analytics_impl(course_id).await
    }

    async fn save_analytics(&self, snapshot: &CourseAnalytics) -> Result<CourseAnalytics> {
        self.save_analytics_impl(snapshot).await
    }
}
