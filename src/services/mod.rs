pub mod analytics;
pub mod auth;
pub mod courses;
pub mod email;
pub mod enrollments;
pub mod grades;
pub mod lessons;
pub mod modules;
pub mod quizzes;
pub mod submissions;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use email::EmailService;
pub use enrollments::EnrollmentService;
pub use grades::GradeService;
pub use lessons::LessonService;
pub use modules::ModuleService;
pub use quizzes::QuizService;
pub use submissions::SubmissionService;
