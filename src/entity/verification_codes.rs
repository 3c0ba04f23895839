//! 验证码实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(column_name = "type")]
    pub code_type: String,
    pub code: String,
    pub expires_at: i64,
    pub is_used: bool,
    pub attempts: i32,
    pub max_attempts: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_verification_code(self) -> crate::models::auth::entities::VerificationCode {
        use crate::models::auth::entities::{CodeType, VerificationCode};
        use chrono::{DateTime, Utc};

        VerificationCode {
            id: self.id,
            user_id: self.user_id,
            code_type: self.code_type.parse::<CodeType>().unwrap_or(CodeType::Email),
            code: self.code,
            expires_at: DateTime::<Utc>::from_timestamp(self.expires_at, 0).unwrap_or_default(),
            is_used: self.is_used,
            attempts: self.attempts,
            max_attempts: self.max_attempts,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
