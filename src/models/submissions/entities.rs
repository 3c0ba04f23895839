use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Submitted,
    Graded,
    Returned,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
            SubmissionStatus::Returned => write!(f, "returned"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            "returned" => Ok(SubmissionStatus::Returned),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 附件元数据，JSON 形态与客户端约定为 camelCase
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct Attachment {
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub url: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

// 作业提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    // 引用 type=assignment 的课时，(student_id, assignment_id) 唯一
    pub assignment_id: i64,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
    pub attachments: Vec<Attachment>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub status: SubmissionStatus,
    // 提交时间晚于作业截止时间则为 true
    pub is_late: bool,
    pub grade_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 提交内容校验：正文、文件 URL、附件至少要有一个
    pub fn has_content(
        submission_text: &Option<String>,
        file_url: &Option<String>,
        attachments: &[Attachment],
    ) -> bool {
        submission_text.as_deref().is_some_and(|t| !t.is_empty())
            || file_url.as_deref().is_some_and(|u| !u.is_empty())
            || !attachments.is_empty()
    }
}
