//! 数据模型定义
//!
//! 按业务域组织：entities 为业务实体，requests 为写入/查询参数，
//! responses 为对外返回结构。

pub mod analytics;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod lessons;
pub mod modules;
pub mod quizzes;
pub mod submissions;
pub mod users;

pub use common::pagination::PaginationInfo;
