//! 课程统计快照实体
//!
//! 每门课程一条记录，重算时整条覆盖，可随时从源数据重建。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub course_id: i64,
    pub total_students: i64,
    pub average_completion: f64,
    pub average_score: f64,
    // 按章节的完成率，JSON 数组
    #[sea_orm(column_type = "Text", nullable)]
    pub module_completion_rates: Option<String>,
    pub quiz_total_attempts: i64,
    pub quiz_average_score: f64,
    pub quiz_pass_rate: f64,
    pub assignment_total_submitted: i64,
    pub assignment_average_score: f64,
    pub assignment_late_submissions: i64,
    pub last_updated: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course_analytics(self) -> crate::models::analytics::entities::CourseAnalytics {
        use crate::models::analytics::entities::{
            AssignmentStats, CourseAnalytics, QuizAttemptStats,
        };
        use chrono::{DateTime, Utc};

        let module_completion_rates = self
            .module_completion_rates
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        CourseAnalytics {
            course_id: self.course_id,
            total_students: self.total_students,
            average_completion: self.average_completion,
            average_score: self.average_score,
            module_completion_rates,
            quiz_attempt_stats: QuizAttemptStats {
                total_attempts: self.quiz_total_attempts,
                average_score: self.quiz_average_score,
                pass_rate: self.quiz_pass_rate,
            },
            assignment_stats: AssignmentStats {
                total_submitted: self.assignment_total_submitted,
                average_score: self.assignment_average_score,
                late_submissions: self.assignment_late_submissions,
            },
            last_updated: DateTime::<Utc>::from_timestamp(self.last_updated, 0)
                .unwrap_or_default(),
        }
    }
}
