//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod course_analytics;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod lessons;
pub mod modules;
pub mod question_options;
pub mod questions;
pub mod quiz_attempts;
pub mod quiz_responses;
pub mod quizzes;
pub mod submissions;
pub mod users;
pub mod verification_codes;
