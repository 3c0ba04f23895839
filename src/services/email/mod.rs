//! SMTP 邮件服务
//!
//! 使用 lettre 发送验证码与密码重置邮件。SMTP 账号未配置时
//! 调用方应跳过发送（见 AuthService），避免开发环境被外部依赖卡住。

use lettre::{
    AsyncTransport, Tokio1Executor,
    message::{Message, MultiPart, SinglePart, header},
    transport::smtp::{AsyncSmtpTransport, authentication::Credentials},
};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::errors::{LearnifyError, Result};

// 全局 SMTP 客户端，首次发送时按配置初始化
static SMTP_CLIENT: Lazy<AsyncSmtpTransport<Tokio1Executor>> = Lazy::new(|| {
    let config = AppConfig::get();
    let mail = &config.mail;

    AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.smtp_host)
        .expect("Failed to create SMTP transport")
        .port(mail.smtp_port)
        .credentials(Credentials::new(
            mail.username.clone(),
            mail.password.clone(),
        ))
        .build()
});

pub struct EmailService;

impl EmailService {
    /// SMTP 是否已配置
    pub fn is_configured() -> bool {
        !AppConfig::get().mail.username.is_empty()
    }

    fn from_mailbox() -> String {
        let mail = &AppConfig::get().mail;
        format!("{} <{}>", mail.from_name, mail.username)
    }

    async fn send(message: Message) -> Result<()> {
        SMTP_CLIENT
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| LearnifyError::email_delivery(format!("邮件发送失败: {e}")))
    }

    /// 发送邮箱验证码
    pub async fn send_verification_code(to_email: &str, code: &str) -> Result<()> {
        let config = AppConfig::get();
        let expiry_minutes = config.verification.code_expiry_minutes;

        let message = Message::builder()
            .from(
                Self::from_mailbox()
                    .parse()
                    .map_err(|e| LearnifyError::email_delivery(format!("发件人地址无效: {e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| LearnifyError::email_delivery(format!("收件人地址无效: {e}")))?)
            .subject("Email Verification Code")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(format!(
                                "Your verification code is: {code}. \
                                 This code will expire in {expiry_minutes} minutes."
                            )),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
                                  <h2>Email Verification</h2>
                                  <p>Thank you for registering. To verify your email address, please use the following code:</p>
                                  <div style="background-color: #f4f4f4; padding: 10px; font-size: 24px; text-align: center; letter-spacing: 5px; font-weight: bold;">
                                    {code}
                                  </div>
                                  <p>This code will expire in {expiry_minutes} minutes.</p>
                                </div>"#
                            )),
                    ),
            )
            .map_err(|e| LearnifyError::email_delivery(format!("构建邮件失败: {e}")))?;

        Self::send(message).await
    }

    /// 发送密码重置链接
    pub async fn send_password_reset(to_email: &str, reset_token: &str) -> Result<()> {
        let config = AppConfig::get();
        let reset_url = format!(
            "{}/reset-password/{}",
            config.app.frontend_url, reset_token
        );
        let expiry_hours = config.verification.reset_token_expiry_hours;

        let message = Message::builder()
            .from(
                Self::from_mailbox()
                    .parse()
                    .map_err(|e| LearnifyError::email_delivery(format!("发件人地址无效: {e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| LearnifyError::email_delivery(format!("收件人地址无效: {e}")))?)
            .subject("Password Reset Request")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(format!(
                                "You are receiving this email because you (or someone else) \
                                 has requested to reset your password.\n\n\
                                 Please click on the following link to reset your password:\n\
                                 {reset_url}\n\n\
                                 If you didn't request this, please ignore this email and \
                                 your password will remain unchanged.\n\n\
                                 This link is valid for {expiry_hours} hour(s) only."
                            )),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
                                  <h2>Password Reset Request</h2>
                                  <p>You are receiving this email because you (or someone else) has requested to reset your password.</p>
                                  <p>Please click on the following link to reset your password:</p>
                                  <a href="{reset_url}" style="display: inline-block; padding: 10px 20px; background-color: #007bff; color: #fff; text-decoration: none; border-radius: 5px;">Reset Password</a>
                                  <p>If you didn't request this, please ignore this email and your password will remain unchanged.</p>
                                  <p>This link is valid for {expiry_hours} hour(s) only.</p>
                                </div>"#
                            )),
                    ),
            )
            .map_err(|e| LearnifyError::email_delivery(format!("构建邮件失败: {e}")))?;

        Self::send(message).await
    }

    /// 发送密码已修改通知
    pub async fn send_password_changed(to_email: &str) -> Result<()> {
        let message = Message::builder()
            .from(
                Self::from_mailbox()
                    .parse()
                    .map_err(|e| LearnifyError::email_delivery(format!("发件人地址无效: {e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| LearnifyError::email_delivery(format!("收件人地址无效: {e}")))?)
            .subject("Your Password Has Been Changed")
            .singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(
                        "Your password has been successfully changed.\n\n\
                         If you did not make this change, please contact support immediately."
                            .to_string(),
                    ),
            )
            .map_err(|e| LearnifyError::email_delivery(format!("构建邮件失败: {e}")))?;

        Self::send(message).await
    }
}
