//! 邮箱验证

use std::sync::Arc;

use crate::errors::{LearnifyError, Result};
use crate::models::auth::entities::{CodeType, CodeValidation};
use crate::models::auth::responses::VerifyEmailResponse;
use crate::models::users::requests::UpdateUserRequest;
use crate::storage::Storage;

use super::register::send_email_verification_code;

/// 重新发送邮箱验证码
pub async fn request_email_verification(
    storage: &Arc<dyn Storage>,
    user_id: i64,
) -> Result<()> {
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| LearnifyError::not_found("用户不存在"))?;

    if user.email_verified {
        return Err(LearnifyError::validation("邮箱已完成验证"));
    }

    send_email_verification_code(storage, user.id, &user.email).await
}

/// 校验邮箱验证码
///
/// 验证通过后标记验证码已使用、置位 email_verified，并在手机号
/// 同样验证完成（或未填写）时派生 is_verified。
pub async fn verify_email(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    code: &str,
) -> Result<VerifyEmailResponse> {
    if code.is_empty() {
        return Err(LearnifyError::validation("验证码不能为空"));
    }

    let record = storage
        .get_active_verification_code(user_id, CodeType::Email)
        .await?
        .ok_or_else(|| LearnifyError::validation("验证码不存在，请重新获取"))?;

    match record.validate_code(code) {
        CodeValidation::Valid => {}
        CodeValidation::Expired => {
            return Err(LearnifyError::validation("验证码已过期，请重新获取"));
        }
        CodeValidation::Used => {
            return Err(LearnifyError::validation("验证码已被使用，请重新获取"));
        }
        CodeValidation::MaxAttempts => {
            return Err(LearnifyError::validation("尝试次数过多，请重新获取验证码"));
        }
        CodeValidation::Mismatch => {
            // 失败计数落库后再拒绝
            storage.increment_verification_attempts(record.id).await?;
            return Err(LearnifyError::validation(format!(
                "验证码错误，剩余尝试次数 {}",
                record.attempts_left() - 1
            )));
        }
    }

    storage.mark_verification_code_used(record.id).await?;

    // 更新邮箱验证状态
    let user = storage
        .update_user(
            user_id,
            UpdateUserRequest {
                email_verified: Some(true),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| LearnifyError::not_found("用户不存在"))?;

    // 邮箱 + 手机号都验证完成（或手机号未填写）时视为完全验证
    let fully_verified = user.derive_is_verified();
    if fully_verified && !user.is_verified {
        storage
            .update_user(
                user_id,
                UpdateUserRequest {
                    is_verified: Some(true),
                    ..Default::default()
                },
            )
            .await?;
    }

    Ok(VerifyEmailResponse {
        email_verified: true,
        is_verified: fully_verified,
    })
}
