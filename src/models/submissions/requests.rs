use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Attachment;

// 创建提交请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

// 为提交评分的请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub max_score: f64,
    pub feedback: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}
