//! 课程统计快照存储操作

use super::SeaOrmStorage;
use crate::entity::course_analytics::{ActiveModel, Column, Entity as CourseAnalyticsEntity};
use crate::errors::{LearnifyError, Result};
use crate::models::analytics::entities::CourseAnalytics;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 获取课程统计快照
    pub async fn get_analytics_by_course_impl(
        &self,
        course_id: i64,
    ) -> Result<Option<CourseAnalytics>> {
        let result = CourseAnalyticsEntity::find()
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程统计失败: {e}")))?;

        Ok(result.map(|m| m.into_course_analytics()))
    }

    /// 创建空快照；并发竞争导致唯一冲突时返回已有记录
    pub async fn create_analytics_impl(&self, course_id: i64) -> Result<CourseAnalytics> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            total_students: Set(0),
            average_completion: Set(0.0),
            average_score: Set(0.0),
            module_completion_rates: Set(None),
            quiz_total_attempts: Set(0),
            quiz_average_score: Set(0.0),
            quiz_pass_rate: Set(0.0),
            assignment_total_submitted: Set(0),
            assignment_average_score: Set(0.0),
            assignment_late_submissions: Set(0),
            last_updated: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_course_analytics()),
            Err(e) => {
                if matches!(
                    e.sql_err(),
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                ) {
                    // 竞争创建，返回已有记录
                    self.get_analytics_by_course_impl(course_id)
                        .await?
                        .ok_or_else(|| {
                            LearnifyError::database_operation("课程统计创建后丢失".to_string())
                        })
                } else {
                    Err(LearnifyError::database_operation(format!(
                        "创建课程统计失败: {e}"
                    )))
                }
            }
        }
    }

    /// 覆盖式保存快照（upsert）
    ///
    /// 每个字段整条覆盖，并发重算时后写者胜出，不会出现半新半旧的文档。
    pub async fn save_analytics_impl(
        &self,
        snapshot: &CourseAnalytics,
    ) -> Result<CourseAnalytics> {
        let now = chrono::Utc::now().timestamp();

        let module_rates = if snapshot.module_completion_rates.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&snapshot.module_completion_rates)?)
        };

        let existing = CourseAnalyticsEntity::find()
            .filter(Column::CourseId.eq(snapshot.course_id))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询课程统计失败: {e}")))?;

        let mut model = ActiveModel {
            course_id: Set(snapshot.course_id),
            total_students: Set(snapshot.total_students),
            average_completion: Set(snapshot.average_completion),
            average_score: Set(snapshot.average_score),
            module_completion_rates: Set(module_rates),
            quiz_total_attempts: Set(snapshot.quiz_attempt_stats.total_attempts),
            quiz_average_score: Set(snapshot.quiz_attempt_stats.average_score),
            quiz_pass_rate: Set(snapshot.quiz_attempt_stats.pass_rate),
            assignment_total_submitted: Set(snapshot.assignment_stats.total_submitted),
            assignment_average_score: Set(snapshot.assignment_stats.average_score),
            assignment_late_submissions: Set(snapshot.assignment_stats.late_submissions),
            last_updated: Set(snapshot.last_updated.timestamp()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = match existing {
            Some(found) => {
                model.id = Set(found.id);
                model.update(&self.db).await.map_err(|e| {
                    LearnifyError::database_operation(format!("保存课程统计失败: {e}"))
                })?
            }
            None => {
                model.created_at = Set(now);
                model.insert(&self.db).await.map_err(|e| {
                    LearnifyError::database_operation(format!("保存课程统计失败: {e}"))
                })?
            }
        };

        Ok(result.into_course_analytics())
    }
}
