use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 对外 JSON 形态固定为 camelCase，与客户端既有约定保持一致。

// 单个章节的完成率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/analytics.ts")]
pub struct ModuleCompletionRate {
    pub module_id: i64,
    pub completion_rate: f64,
}

// 测验作答统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/analytics.ts")]
pub struct QuizAttemptStats {
    pub total_attempts: i64,
    pub average_score: f64,
    pub pass_rate: f64,
}

// 作业提交统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/analytics.ts")]
pub struct AssignmentStats {
    pub total_submitted: i64,
    pub average_score: f64,
    pub late_submissions: i64,
}

// 课程统计快照
//
// 每门课程唯一一条，重算时整条覆盖；随时可从选课/成绩/作答/提交数据重建。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/analytics.ts")]
pub struct CourseAnalytics {
    pub course_id: i64,
    pub total_students: i64,
    pub average_completion: f64,
    pub average_score: f64,
    pub module_completion_rates: Vec<ModuleCompletionRate>,
    pub quiz_attempt_stats: QuizAttemptStats,
    pub assignment_stats: AssignmentStats,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl CourseAnalytics {
    /// 新课程的空快照
    pub fn empty(course_id: i64, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            course_id,
            total_students: 0,
            average_completion: 0.0,
            average_score: 0.0,
            module_completion_rates: Vec::new(),
            quiz_attempt_stats: QuizAttemptStats::default(),
            assignment_stats: AssignmentStats::default(),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = CourseAnalytics {
            course_id: 3,
            total_students: 2,
            average_completion: 50.0,
            average_score: 75.0,
            module_completion_rates: vec![ModuleCompletionRate {
                module_id: 9,
                completion_rate: 40.0,
            }],
            quiz_attempt_stats: QuizAttemptStats {
                total_attempts: 4,
                average_score: 82.5,
                pass_rate: 75.0,
            },
            assignment_stats: AssignmentStats {
                total_submitted: 5,
                average_score: 68.0,
                late_submissions: 1,
            },
            last_updated: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["courseId"], 3);
        assert_eq!(json["totalStudents"], 2);
        assert_eq!(json["averageCompletion"], 50.0);
        assert_eq!(json["moduleCompletionRates"][0]["moduleId"], 9);
        assert_eq!(json["moduleCompletionRates"][0]["completionRate"], 40.0);
        assert_eq!(json["quizAttemptStats"]["totalAttempts"], 4);
        assert_eq!(json["quizAttemptStats"]["passRate"], 75.0);
        assert_eq!(json["assignmentStats"]["totalSubmitted"], 5);
        assert_eq!(json["assignmentStats"]["lateSubmissions"], 1);
        assert!(json.get("lastUpdated").is_some());
    }
}
