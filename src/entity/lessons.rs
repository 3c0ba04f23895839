//! 课时实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub sort_order: i32,
    #[sea_orm(column_name = "type")]
    pub lesson_type: String,
    pub duration: i32,
    pub is_published: bool,
    pub video_url: Option<String>,
    pub file_url: Option<String>,
    pub quiz_id: Option<i64>,
    pub due_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::modules::Entity",
        from = "Column::ModuleId",
        to = "super::modules::Column::Id"
    )]
    Module,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_lesson(self) -> crate::models::lessons::entities::Lesson {
        use crate::models::lessons::entities::{Lesson, LessonType};
        use chrono::{DateTime, Utc};

        Lesson {
            id: self.id,
            module_id: self.module_id,
            title: self.title,
            content: self.content,
            sort_order: self.sort_order,
            lesson_type: self
                .lesson_type
                .parse::<LessonType>()
                .unwrap_or(LessonType::Text),
            duration: self.duration,
            is_published: self.is_published,
            video_url: self.video_url,
            file_url: self.file_url,
            quiz_id: self.quiz_id,
            due_date: self
                .due_date
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
