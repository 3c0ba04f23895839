//! 作答记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_attempt_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_response: Option<String>,
    pub is_correct: Option<bool>,
    pub points_awarded: f64,
    pub max_points: f64,
    pub graded_by: Option<i64>,
    pub graded_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_attempts::Entity",
        from = "Column::QuizAttemptId",
        to = "super::quiz_attempts::Column::Id"
    )]
    Attempt,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::quiz_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_quiz_response(self) -> crate::models::quizzes::entities::QuizResponse {
        use crate::models::quizzes::entities::QuizResponse;
        use chrono::{DateTime, Utc};

        QuizResponse {
            id: self.id,
            quiz_attempt_id: self.quiz_attempt_id,
            question_id: self.question_id,
            selected_option_id: self.selected_option_id,
            text_response: self.text_response,
            is_correct: self.is_correct,
            points_awarded: self.points_awarded,
            max_points: self.max_points,
            graded_by: self.graded_by,
            graded_at: self
                .graded_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            feedback: self.feedback,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
