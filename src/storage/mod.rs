use std::sync::Arc;

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
    submissions::{
        entities::Submission,
        requests::CreateSubmissionRequest,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[cfg(test)]
pub mod test_utils;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段应当已是哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 写入/清除密码重置令牌（哈希）
    async fn set_reset_password_token(
        &self,
        user_id: i64,
        token_hash: Option<String>,
        expires_at: Option<i64>,
    ) -> Result<bool>;
    // 按未过期的重置令牌哈希查找用户
    async fn get_user_by_reset_token(&self, token_hash: &str) -> Result<Option<User>>;

    /// 验证码方法
    // 替换验证码：删除该用户同类型的旧码后创建新码
    async fn replace_verification_code(
        &self,
        user_id: i64,
        code_type: CodeType,
        code: &str,
        expires_at: i64,
        max_attempts: i32,
    ) -> Result<VerificationCode>;
    // 获取未使用的最新验证码
    async fn get_active_verification_code(
        &self,
        user_id: i64,
        code_type: CodeType,
    ) -> Result<Option<VerificationCode>>;
    // 标记验证码已使用
    async fn mark_verification_code_used(&self, id: i64) -> Result<bool>;
    // 尝试次数 +1
    async fn increment_verification_attempts(&self, id: i64) -> Result<bool>;
    // 清理过期验证码
    async fn cleanup_expired_codes(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程（slug 由调用方从标题派生）
    async fn create_course(
        &self,
        instructor_id: i64,
        slug: &str,
        course: CreateCourseRequest,
    ) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过 slug 获取课程信息
    async fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 列出讲师的课程
    async fn list_instructor_courses(&self, instructor_id: i64) -> Result<Vec<Course>>;
    // 更新课程信息（标题变化时调用方传入新 slug）
    async fn update_course(
        &self,
        course_id: i64,
        slug: Option<String>,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 更新课程状态
    async fn update_course_status(
        &self,
        course_id: i64,
        status: CourseStatus,
    ) -> Result<Option<Course>>;
    // 删除课程及其统计快照（事务）
    async fn delete_course_with_analytics(&self, course_id: i64) -> Result<bool>;

    /// 章节管理方法
    async fn create_module(&self, module: CreateModuleRequest) -> Result<Module>;
    async fn get_module_by_id(&self, module_id: i64) -> Result<Option<Module>>;
    // 按 sort_order 列出课程章节
    async fn list_modules_by_course(&self, course_id: i64) -> Result<Vec<Module>>;
    async fn update_module(
        &self,
        module_id: i64,
        update: UpdateModuleRequest,
    ) -> Result<Option<Module>>;
    async fn delete_module(&self, module_id: i64) -> Result<bool>;

    /// 课时管理方法
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // 获取 type=assignment 的课时
    async fn get_assignment_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // 按 sort_order 列出章节课时
    async fn list_lessons_by_module(&self, module_id: i64) -> Result<Vec<Lesson>>;
    // 列出多个章节下的 assignment 课时
    async fn list_assignments_by_module_ids(&self, module_ids: &[i64]) -> Result<Vec<Lesson>>;
    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;

    /// 测验管理方法
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz>;
    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>>;
    async fn list_quizzes_by_course(&self, course_id: i64) -> Result<Vec<Quiz>>;
    // 覆盖写 total_points 派生值
    async fn update_quiz_total_points(&self, quiz_id: i64, total_points: f64) -> Result<bool>;
    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool>;

    /// 题目与选项方法
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<Question>;
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    // 按 sort_order 列出测验题目
    async fn list_questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>>;
    async fn delete_question(&self, question_id: i64) -> Result<bool>;
    async fn create_question_option(
        &self,
        option: CreateQuestionOptionRequest,
    ) -> Result<QuestionOption>;
    async fn get_question_option_by_id(&self, option_id: i64) -> Result<Option<QuestionOption>>;
    async fn list_options_by_question(&self, question_id: i64) -> Result<Vec<QuestionOption>>;

    /// 测验作答方法
    // 创建作答记录，(quiz_id, student_id, attempt_number) 冲突时返回 Conflict
    async fn create_quiz_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        attempt_number: i32,
    ) -> Result<QuizAttempt>;
    async fn get_quiz_attempt_by_id(&self, attempt_id: i64) -> Result<Option<QuizAttempt>>;
    // 统计学生在某测验的作答次数
    async fn count_quiz_attempts(&self, quiz_id: i64, student_id: i64) -> Result<i64>;
    // 列出多个测验下已完成的作答
    async fn list_completed_attempts_by_quiz_ids(
        &self,
        quiz_ids: &[i64],
    ) -> Result<Vec<QuizAttempt>>;
    // 写入评分结果（及完成时的状态/计时字段）
    async fn save_attempt_score(
        &self,
        attempt_id: i64,
        update: AttemptScoreUpdate,
    ) -> Result<Option<QuizAttempt>>;
    // 更新作答状态（用于放弃作答）
    async fn update_attempt_status(
        &self,
        attempt_id: i64,
        status: AttemptStatus,
    ) -> Result<Option<QuizAttempt>>;

    /// 作答记录方法
    // 按 (quiz_attempt_id, question_id) 幂等保存：已存在则更新
    async fn upsert_quiz_response(&self, data: UpsertResponseData) -> Result<QuizResponse>;
    async fn get_quiz_response(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<QuizResponse>>;
    async fn list_responses_by_attempt(&self, attempt_id: i64) -> Result<Vec<QuizResponse>>;
    // 文本题人工评分
    async fn update_response_manual_grade(
        &self,
        response_id: i64,
        grader_id: i64,
        grade: ManualGradeRequest,
    ) -> Result<Option<QuizResponse>>;

    /// 成绩管理方法
    // 创建成绩（percentage 由调用方在写入前派生）
    async fn create_grade(
        &self,
        grader_id: i64,
        percentage: f64,
        grade: CreateGradeRequest,
    ) -> Result<Grade>;
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    async fn list_grades_by_ids(&self, grade_ids: &[i64]) -> Result<Vec<Grade>>;
    // 课程内已发布的成绩
    async fn list_published_grades_by_course(&self, course_id: i64) -> Result<Vec<Grade>>;
    // 某学生在课程内已发布的成绩
    async fn list_published_grades_for_student(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Vec<Grade>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    // 更新成绩（分数变化时 percentage 由调用方重新派生）
    async fn update_grade(
        &self,
        grade_id: i64,
        percentage: Option<f64>,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>>;

    /// 作业提交方法
    // 创建提交，(student_id, assignment_id) 冲突时返回 Conflict
    async fn create_submission(
        &self,
        student_id: i64,
        is_late: bool,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    async fn get_submission_by_student_and_assignment(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>>;
    async fn list_submissions_by_assignment(&self, assignment_id: i64)
    -> Result<Vec<Submission>>;
    async fn list_submissions_by_assignment_ids(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    // 关联成绩并把状态置为 graded
    async fn link_submission_grade(
        &self,
        submission_id: i64,
        grade_id: i64,
    ) -> Result<Option<Submission>>;

    /// 选课方法
    // 选课，(student_id, course_id) 冲突时返回 Conflict
    async fn create_enrollment(&self, enrollment: EnrollRequest) -> Result<Enrollment>;
    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>>;
    // 课程内全部选课记录（不过滤状态）
    async fn list_enrollments_by_course(&self, course_id: i64) -> Result<Vec<Enrollment>>;
    // 按状态过滤课程选课记录
    async fn list_enrollments_by_course_and_statuses(
        &self,
        course_id: i64,
        statuses: &[EnrollmentStatus],
    ) -> Result<Vec<Enrollment>>;
    async fn update_enrollment(
        &self,
        enrollment_id: i64,
        update: UpdateProgressRequest,
    ) -> Result<Option<Enrollment>>;

    /// 课程统计方法
    async fn get_analytics_by_course(&self, course_id: i64) -> Result<Option<CourseAnalytics>>;
    // 创建空快照；已存在时返回已有记录
    async fn create_analytics(&self, course_id: i64) -> Result<CourseAnalytics>;
    // 覆盖式保存快照（upsert）
    async fn save_analytics(&self, snapshot: &CourseAnalytics) -> Result<CourseAnalytics>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
