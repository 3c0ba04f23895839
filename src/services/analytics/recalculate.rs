//! 课程统计全量重算
//!
//! 每次重算都完整扫描选课/成绩/作答/提交数据，算完后整条覆盖快照。
//! 中途任何读取失败都会中止且不落库，上一份快照保持有效。

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::analytics::entities::{
    AssignmentStats, CourseAnalytics, ModuleCompletionRate, QuizAttemptStats,
};
use crate::models::enrollments::entities::{Enrollment, EnrollmentStatus};
use crate::models::grades::entities::Grade;
use crate::models::quizzes::entities::QuizAttempt;
use crate::models::submissions::entities::Submission;
use crate::storage::Storage;

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// 选课指标：人数与平均完成度（active/completed 口径）
fn enrollment_metrics(enrollments: &[Enrollment]) -> (i64, f64) {
    let total = enrollments.len();
    let average = mean(enrollments.iter().map(|e| e.progress), total);
    (total as i64, average)
}

/// 成绩指标：已发布成绩的平均百分比
fn grade_metrics(grades: &[Grade]) -> f64 {
    mean(grades.iter().map(|g| g.percentage), grades.len())
}

/// 单个章节的完成率：有该章节进度明细的选课记录的均值
fn module_completion_rate(module_id: i64, enrollments: &[Enrollment]) -> f64 {
    let progresses: Vec<f64> = enrollments
        .iter()
        .filter_map(|e| e.module_progress_for(module_id))
        .map(|mp| mp.completion_percentage)
        .collect();

    mean(progresses.iter().copied(), progresses.len())
}

/// 测验统计：已完成作答的次数、均分、通过率
fn quiz_stats(attempts: &[QuizAttempt]) -> QuizAttemptStats {
    if attempts.is_empty() {
        return QuizAttemptStats::default();
    }

    let total = attempts.len();
    let average_score = mean(attempts.iter().map(|a| a.score), total);
    let passed = attempts.iter().filter(|a| a.is_passed).count();

    QuizAttemptStats {
        total_attempts: total as i64,
        average_score,
        pass_rate: (passed as f64 / total as f64) * 100.0,
    }
}

/// 作业统计：提交数、迟交数、已评分提交的平均百分比
fn assignment_stats(submissions: &[Submission], graded: &[Grade]) -> AssignmentStats {
    AssignmentStats {
        total_submitted: submissions.len() as i64,
        average_score: mean(graded.iter().map(|g| g.percentage), graded.len()),
        late_submissions: submissions.iter().filter(|s| s.is_late).count() as i64,
    }
}

/// 全量重算课程统计快照
///
/// 无增量路径：每次调用都重新读取全部相关集合。并发重算同一课程时
/// 后写者胜出（快照整条覆盖，不会出现部分更新）。
pub async fn recalculate(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<CourseAnalytics> {
    // 1. 课程必须存在，缺失时在任何写入之前中止
    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found(format!("课程 {course_id} 不存在")))?;

    // 2. 选课指标（只统计 active/completed）
    let counted_enrollments = storage
        .list_enrollments_by_course_and_statuses(
            course.id,
            &[EnrollmentStatus::Active, EnrollmentStatus::Completed],
        )
        .await?;
    let (total_students, average_completion) = enrollment_metrics(&counted_enrollments);

    // 3. 成绩指标（已发布口径）
    let published_grades = storage.list_published_grades_by_course(course.id).await?;
    let average_score = grade_metrics(&published_grades);

    // 4. 按章节的完成率（不过滤选课状态，与整体口径不同）
    let modules = storage.list_modules_by_course(course.id).await?;
    let all_enrollments = storage.list_enrollments_by_course(course.id).await?;

    let module_completion_rates: Vec<ModuleCompletionRate> = modules
        .iter()
        .map(|module| ModuleCompletionRate {
            module_id: module.id,
            completion_rate: module_completion_rate(module.id, &all_enrollments),
        })
        .collect();

    // 5. 测验统计
    let quizzes = storage.list_quizzes_by_course(course.id).await?;
    let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();
    let completed_attempts = storage
        .list_completed_attempts_by_quiz_ids(&quiz_ids)
        .await?;
    let quiz_attempt_stats = quiz_stats(&completed_attempts);

    // 6. 作业统计（只有已评分的提交计入均分）
    let module_ids: Vec<i64> = modules.iter().map(|m| m.id).collect();
    let assignments = storage.list_assignments_by_module_ids(&module_ids).await?;
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let submissions = storage
        .list_submissions_by_assignment_ids(&assignment_ids)
        .await?;

    let graded_ids: Vec<i64> = submissions.iter().filter_map(|s| s.grade_id).collect();
    let assignment_grades = storage.list_grades_by_ids(&graded_ids).await?;
    let assignment_stats = assignment_stats(&submissions, &assignment_grades);

    // 7. 盖时间戳，整条覆盖保存
    let snapshot = CourseAnalytics {
        course_id: course.id,
        total_students,
        average_completion,
        average_score,
        module_completion_rates,
        quiz_attempt_stats,
        assignment_stats,
        last_updated: chrono::Utc::now(),
    };

    // 8. 返回保存后的快照
    storage.save_analytics(&snapshot).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enrollments::entities::ModuleProgress;
    use crate::models::grades::entities::GradeItemType;
    use crate::models::quizzes::entities::AttemptStatus;
    use crate::models::submissions::entities::SubmissionStatus;
    use chrono::Utc;

    fn enrollment(progress: f64, module_progress: Vec<ModuleProgress>) -> Enrollment {
        Enrollment {
            id: 1,
            student_id: 1,
            course_id: 1,
            status: EnrollmentStatus::Active,
            progress,
            module_progress,
            enrolled_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn grade(percentage: f64) -> Grade {
        Grade {
            id: 1,
            student_id: 1,
            course_id: 1,
            item_id: 1,
            item_type: GradeItemType::Quiz,
            score: 0.0,
            max_score: 100.0,
            percentage,
            feedback: None,
            graded_by: 1,
            graded_at: Utc::now(),
            weight: 1.0,
            category: "uncategorized".to_string(),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn attempt(score: f64, is_passed: bool) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            quiz_id: 1,
            student_id: 1,
            attempt_number: 1,
            status: AttemptStatus::Completed,
            score,
            is_passed,
            start_time: Utc::now(),
            end_time: Some(Utc::now()),
            time_spent: 60,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn submission(is_late: bool, grade_id: Option<i64>) -> Submission {
        Submission {
            id: 1,
            student_id: 1,
            assignment_id: 1,
            submission_text: Some("答案".to_string()),
            file_url: None,
            attachments: Vec::new(),
            submitted_at: Utc::now(),
            status: SubmissionStatus::Submitted,
            is_late,
            grade_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_enrollment_metrics_average() {
        let enrollments = [
            enrollment(40.0, Vec::new()),
            enrollment(60.0, Vec::new()),
        ];
        let (total, average) = enrollment_metrics(&enrollments);
        assert_eq!(total, 2);
        assert_eq!(average, 50.0);
    }

    #[test]
    fn test_enrollment_metrics_empty() {
        let (total, average) = enrollment_metrics(&[]);
        assert_eq!(total, 0);
        assert_eq!(average, 0.0);
    }

    #[test]
    fn test_grade_metrics() {
        assert_eq!(grade_metrics(&[grade(80.0), grade(60.0)]), 70.0);
        assert_eq!(grade_metrics(&[]), 0.0);
    }

    #[test]
    fn test_module_completion_rate_only_counts_matching() {
        let enrollments = [
            enrollment(
                0.0,
                vec![ModuleProgress {
                    module_id: 7,
                    completion_percentage: 80.0,
                }],
            ),
            enrollment(
                0.0,
                vec![ModuleProgress {
                    module_id: 7,
                    completion_percentage: 40.0,
                }],
            ),
            // 没有 7 号章节进度的选课不计入
            enrollment(0.0, Vec::new()),
        ];
        assert_eq!(module_completion_rate(7, &enrollments), 60.0);
        assert_eq!(module_completion_rate(8, &enrollments), 0.0);
    }

    #[test]
    fn test_quiz_stats() {
        let attempts = [
            attempt(90.0, true),
            attempt(80.0, true),
            attempt(40.0, false),
            attempt(50.0, false),
        ];
        let stats = quiz_stats(&attempts);
        assert_eq!(stats.total_attempts, 4);
        assert_eq!(stats.average_score, 65.0);
        assert_eq!(stats.pass_rate, 50.0);
    }

    #[test]
    fn test_quiz_stats_empty() {
        let stats = quiz_stats(&[]);
        assert_eq!(stats.total_attempts, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.pass_rate, 0.0);
    }

    #[test]
    fn test_assignment_stats_only_graded_contribute() {
        let submissions = [
            submission(true, Some(1)),
            submission(false, None),
            submission(false, Some(2)),
        ];
        let graded = [grade(70.0), grade(90.0)];
        let stats = assignment_stats(&submissions, &graded);
        assert_eq!(stats.total_submitted, 3);
        assert_eq!(stats.late_submissions, 1);
        assert_eq!(stats.average_score, 80.0);
    }
}
