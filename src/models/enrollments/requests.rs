use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::ModuleProgress;

// 选课请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/enrollment.ts")]
pub struct EnrollRequest {
    pub student_id: i64,
    pub course_id: i64,
}

// 更新进度请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/enrollment.ts")]
pub struct UpdateProgressRequest {
    pub progress: Option<f64>,
    pub module_progress: Option<Vec<ModuleProgress>>,
    pub status: Option<super::entities::EnrollmentStatus>,
}
