//! 验证码存储操作

use super::SeaOrmStorage;
use crate::entity::verification_codes::{ActiveModel, Column, Entity as VerificationCodes};
use crate::errors::{LearnifyError, Result};
use crate::models::auth::entities::{CodeType, VerificationCode};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 替换验证码：删除该用户同类型的旧码后创建新码
    pub async fn replace_verification_code_impl(
        &self,
        user_id: i64,
        code_type: CodeType,
        code: &str,
        expires_at: i64,
        max_attempts: i32,
    ) -> Result<VerificationCode> {
        VerificationCodes::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CodeType.eq(code_type.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("删除旧验证码失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            code_type: Set(code_type.to_string()),
            code: Set(code.to_string()),
            expires_at: Set(expires_at),
            is_used: Set(false),
            attempts: Set(0),
            max_attempts: Set(max_attempts),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("创建验证码失败: {e}")))?;

        Ok(result.into_verification_code())
    }

    /// 获取未使用的最新验证码
    pub async fn get_active_verification_code_impl(
        &self,
        user_id: i64,
        code_type: CodeType,
    ) -> Result<Option<VerificationCode>> {
        let result = VerificationCodes::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CodeType.eq(code_type.to_string()))
            .filter(Column::IsUsed.eq(false))
            .order_by_desc(Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询验证码失败: {e}")))?;

        Ok(result.map(|m| m.into_verification_code()))
    }

    /// 标记验证码已使用
    pub async fn mark_verification_code_used_impl(&self, id: i64) -> Result<bool> {
        let existing = VerificationCodes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询验证码失败: {e}")))?;

        if existing.is_none() {
            return Ok(false);
        }

        let model = ActiveModel {
            id: Set(id),
            is_used: Set(true),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新验证码失败: {e}")))?;

        Ok(true)
    }

    /// 尝试次数 +1
    pub async fn increment_verification_attempts_impl(&self, id: i64) -> Result<bool> {
        let existing = VerificationCodes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("查询验证码失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let model = ActiveModel {
            id: Set(id),
            attempts: Set(existing.attempts + 1),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("更新验证码失败: {e}")))?;

        Ok(true)
    }

    /// 清理过期验证码
    pub async fn cleanup_expired_codes_impl(&self) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let result = VerificationCodes::delete_many()
            .filter(Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(|e| LearnifyError::database_operation(format!("清理过期验证码失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
