//! 课程总评计算

use std::sync::Arc;

use crate::errors::Result;
use crate::models::grades::{entities::Grade, responses::CourseGradeSummary};
use crate::storage::Storage;

/// 从已发布成绩计算课程总评
///
/// 简单平均按总得分/总满分；加权平均按 (得分率 × 权重) / 总权重。
/// 满分为 0 的成绩不参与加权，避免除零。
pub(crate) fn summarize(grades: &[Grade]) -> CourseGradeSummary {
    if grades.is_empty() {
        return CourseGradeSummary {
            total_grade: 0.0,
            weighted_grade: 0.0,
        };
    }

    let mut total_points = 0.0;
    let mut max_possible_points = 0.0;
    let mut weighted_points = 0.0;
    let mut total_weight = 0.0;

    for grade in grades {
        total_points += grade.score;
        max_possible_points += grade.max_score;

        if grade.max_score > 0.0 {
            weighted_points += (grade.score / grade.max_score) * grade.weight;
            total_weight += grade.weight;
        }
    }

    let total_grade = if max_possible_points > 0.0 {
        (total_points / max_possible_points) * 100.0
    } else {
        0.0
    };
    let weighted_grade = if total_weight > 0.0 {
        (weighted_points / total_weight) * 100.0
    } else {
        0.0
    };

    CourseGradeSummary {
        total_grade,
        weighted_grade,
    }
}

/// 计算某学生在某课程的总评（只统计已发布成绩）
pub async fn calculate_course_grade(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    student_id: i64,
) -> Result<CourseGradeSummary> {
    let grades = storage
        .list_published_grades_for_student(course_id, student_id)
        .await?;

    Ok(summarize(&grades))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::GradeItemType;
    use chrono::Utc;

    fn grade(score: f64, max_score: f64, weight: f64) -> Grade {
        Grade {
            id: 1,
            student_id: 1,
            course_id: 1,
            item_id: 1,
            item_type: GradeItemType::Quiz,
            score,
            max_score,
            percentage: 0.0,
            feedback: None,
            graded_by: 1,
            graded_at: Utc::now(),
            weight,
            category: "uncategorized".to_string(),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_grades() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_grade, 0.0);
        assert_eq!(summary.weighted_grade, 0.0);
    }

    #[test]
    fn test_simple_average() {
        // 80/100 + 10/20 -> 90/120 = 75%
        let summary = summarize(&[grade(80.0, 100.0, 1.0), grade(10.0, 20.0, 1.0)]);
        assert_eq!(summary.total_grade, 75.0);
    }

    #[test]
    fn test_weighted_average() {
        // 得分率 0.8（权重 3）和 0.5（权重 1）-> (2.4 + 0.5) / 4 = 72.5%
        let summary = summarize(&[grade(80.0, 100.0, 3.0), grade(10.0, 20.0, 1.0)]);
        assert_eq!(summary.weighted_grade, 72.5);
    }
}
