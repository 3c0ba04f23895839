//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{LearnifyError, Result};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户（password 字段应当已是哈希值）
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            firstname: Set(req.firstname),
            lastname: Set(req.lastname),
            email: Set(req.email.to_lowercase()),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            email_verified: Set(false),
            phone_number: Set(req.phone_number),
            phone_verified: Set(false),
            is_verified: Set(false),
            reset_password_token: Set(None),
            reset_password_expires: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| Self::map_insert_err(e, "邮箱已被其他用户使用"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(firstname) = update.firstname {
            model.firstname = Set(firstname);
        }
        if let Some(lastname) = update.lastname {
            model.lastname = Set(lastname);
        }
        if let Some(phone_number) = update.phone_number {
            model.phone_number = Set(Some(phone_number));
        }
        if let Some(email_verified) = update.email_verified {
            model.email_verified = Set(email_verified);
        }
        if let Some(phone_verified) = update.phone_verified {
            model.phone_verified = Set(phone_verified);
        }
        if let Some(is_verified) = update.is_verified {
            model.is_verified = Set(is_verified);
        }
        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 写入/清除密码重置令牌
    pub async fn set_reset_password_token_impl(
        &self,
        user_id: i64,
        token_hash: Option<String>,
        expires_at: Option<i64>,
    ) -> Result<bool> {
        let existing = self.get_user_by_id_impl(user_id).await?;
        if existing.is_none() {
            return Ok(false);
        }

        let model = ActiveModel {
            id: Set(user_id),
            reset_password_token: Set(token_hash),
            reset_password_expires: Set(expires_at),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新重置令牌失败: {e}")))?;

        Ok(true)
    }

    /// 按未过期的重置令牌哈希查找用户
    pub async fn get_user_by_reset_token_impl(&self, token_hash: &str) -> Result<Option<User>> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::find()
            .filter(Column::ResetPasswordToken.eq(token_hash))
            .filter(Column::ResetPasswordExpires.gt(now))
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询重置令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }
}
