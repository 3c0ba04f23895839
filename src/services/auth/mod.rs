pub mod login;
pub mod password_reset;
pub mod register;
pub mod token;
pub mod verify_email;

use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::Result;
use crate::models::auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    requests::ResetPasswordRequest, responses::VerifyEmailResponse,
};
use crate::storage::Storage;

pub struct AuthService {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    /// 注册新用户并发送邮箱验证码
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse> {
        register::register(&self.storage, req).await
    }

    /// 邮箱 + 密码登录
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        login::login(&self.storage, req).await
    }

    /// 用 refresh token 换新的 access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        token::refresh(&self.cache, refresh_token).await
    }

    /// 登出：吊销 refresh token
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        token::logout(&self.cache, refresh_token).await
    }

    /// 重新发送邮箱验证码
    pub async fn request_email_verification(&self, user_id: i64) -> Result<()> {
        verify_email::request_email_verification(&self.storage, user_id).await
    }

    /// 校验邮箱验证码
    pub async fn verify_email(&self, user_id: i64, code: &str) -> Result<VerifyEmailResponse> {
        verify_email::verify_email(&self.storage, user_id, code).await
    }

    /// 发起密码重置（无论邮箱是否存在都返回成功）
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        password_reset::forgot_password(&self.storage, email).await
    }

    /// 校验重置令牌是否有效
    pub async fn verify_reset_token(&self, token: &str) -> Result<bool> {
        password_reset::verify_reset_token(&self.storage, token).await
    }

    /// 用重置令牌设置新密码，返回用户邮箱
    pub async fn reset_password(&self, req: ResetPasswordRequest) -> Result<String> {
        password_reset::reset_password(&self.storage, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::errors::LearnifyError;
    use crate::models::auth::entities::CodeType;
    use crate::storage::test_utils::memory_storage;
    use crate::utils::code::generate_reset_token;

    async fn auth_service() -> (AuthService, Arc<dyn Storage>) {
        let storage = memory_storage().await;
        let cache: Arc<dyn crate::cache::ObjectCache> =
            Arc::new(MokaCacheWrapper::new().expect("moka cache"));
        (AuthService::new(storage.clone(), cache), storage)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: email.to_string(),
            password: "SecurePass123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (service, _storage) = auth_service().await;

        let registered = service
            .register(register_request("ada@learnify.app"))
            .await
            .unwrap();
        assert_eq!(registered.user.email, "ada@learnify.app");
        assert!(!registered.user.email_verified);
        assert!(!registered.tokens.access_token.is_empty());

        let logged_in = service
            .login(LoginRequest {
                email: "ada@learnify.app".to_string(),
                password: "SecurePass123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflict() {
        let (service, _storage) = auth_service().await;

        service
            .register(register_request("dup@learnify.app"))
            .await
            .unwrap();
        let result = service.register(register_request("dup@learnify.app")).await;

        assert!(matches!(result, Err(LearnifyError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let (service, _storage) = auth_service().await;

        let mut req = register_request("weak@learnify.app");
        req.password = "abc".to_string();

        let result = service.register(req).await;
        assert!(matches!(result, Err(LearnifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _storage) = auth_service().await;
        service
            .register(register_request("who@learnify.app"))
            .await
            .unwrap();

        let result = service
            .login(LoginRequest {
                email: "who@learnify.app".to_string(),
                password: "WrongPass999".to_string(),
            })
            .await;
        assert!(matches!(result, Err(LearnifyError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_verify_email_flow() {
        let (service, storage) = auth_service().await;
        let registered = service
            .register(register_request("verify@learnify.app"))
            .await
            .unwrap();
        let user_id = registered.user.id;

        // 注册时验证码已入库
        let record = storage
            .get_active_verification_code(user_id, CodeType::Email)
            .await
            .unwrap()
            .expect("verification code should exist");

        // 错误的码先消耗一次尝试
        let wrong = service.verify_email(user_id, "000000").await;
        assert!(matches!(wrong, Err(LearnifyError::Validation(_))));

        let response = service.verify_email(user_id, &record.code).await.unwrap();
        assert!(response.email_verified);
        // 手机号未填写，邮箱验证完成即完全验证
        assert!(response.is_verified);

        let user = storage.get_user_by_id(user_id).await.unwrap().unwrap();
        assert!(user.email_verified);
        assert!(user.is_verified);
    }

    #[tokio::test]
    async fn test_verified_code_single_use() {
        let (service, storage) = auth_service().await;
        let registered = service
            .register(register_request("once@learnify.app"))
            .await
            .unwrap();
        let user_id = registered.user.id;

        let record = storage
            .get_active_verification_code(user_id, CodeType::Email)
            .await
            .unwrap()
            .unwrap();

        service.verify_email(user_id, &record.code).await.unwrap();

        // 同一验证码不能再次使用
        let again = service.verify_email(user_id, &record.code).await;
        assert!(matches!(again, Err(LearnifyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_refresh_and_logout() {
        let (service, _storage) = auth_service().await;
        let registered = service
            .register(register_request("token@learnify.app"))
            .await
            .unwrap();
        let refresh_token = registered.tokens.refresh_token;

        // 正常刷新
        let access = service.refresh(&refresh_token).await.unwrap();
        assert!(!access.is_empty());

        // 登出后同一 refresh token 被吊销
        service.logout(&refresh_token).await.unwrap();
        let result = service.refresh(&refresh_token).await;
        assert!(matches!(result, Err(LearnifyError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_forgot_password_silent_for_unknown_email() {
        let (service, _storage) = auth_service().await;
        // 未注册邮箱同样返回成功
        assert!(service.forgot_password("nobody@learnify.app").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_flow() {
        let (service, storage) = auth_service().await;
        let registered = service
            .register(register_request("reset@learnify.app"))
            .await
            .unwrap();
        let user_id = registered.user.id;

        // 模拟 forgot_password 生成的令牌（明文只出现在邮件里）
        let (token, token_hash) = generate_reset_token();
        let expires_at = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();
        storage
            .set_reset_password_token(user_id, Some(token_hash), Some(expires_at))
            .await
            .unwrap();

        assert!(service.verify_reset_token(&token).await.unwrap());

        let email = service
            .reset_password(ResetPasswordRequest {
                token: token.clone(),
                password: "BrandNewPass1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(email, "reset@learnify.app");

        // 令牌一次性使用
        assert!(!service.verify_reset_token(&token).await.unwrap());

        // 新密码生效
        let logged_in = service
            .login(LoginRequest {
                email: "reset@learnify.app".to_string(),
                password: "BrandNewPass1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, user_id);
    }
}
