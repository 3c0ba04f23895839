use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 验证码类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub enum CodeType {
    Email,
    Phone,
}

impl std::fmt::Display for CodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeType::Email => write!(f, "email"),
            CodeType::Phone => write!(f, "phone"),
        }
    }
}

impl std::str::FromStr for CodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(CodeType::Email),
            "phone" => Ok(CodeType::Phone),
            _ => Err(format!("Invalid code type: {s}")),
        }
    }
}

/// 验证码校验结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeValidation {
    Valid,
    Expired,
    Used,
    MaxAttempts,
    // 码不匹配，尝试次数需要 +1 后落库
    Mismatch,
}

// 验证码实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCode {
    pub id: i64,
    pub user_id: i64,
    pub code_type: CodeType,
    #[serde(skip_serializing, default)]
    pub code: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub is_used: bool,
    pub attempts: i32,
    pub max_attempts: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl VerificationCode {
    /// 校验提交的验证码
    ///
    /// 顺序与有效性判定：过期 > 已使用 > 超出尝试次数 > 码不匹配。
    /// 返回 Mismatch 时调用方负责把尝试次数 +1 持久化。
    pub fn validate_code(&self, submitted_code: &str) -> CodeValidation {
        if chrono::Utc::now() > self.expires_at {
            return CodeValidation::Expired;
        }

        if self.is_used {
            return CodeValidation::Used;
        }

        if self.attempts >= self.max_attempts {
            return CodeValidation::MaxAttempts;
        }

        if self.code != submitted_code {
            return CodeValidation::Mismatch;
        }

        CodeValidation::Valid
    }

    pub fn attempts_left(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_code() -> VerificationCode {
        VerificationCode {
            id: 1,
            user_id: 1,
            code_type: CodeType::Email,
            code: "123456".to_string(),
            expires_at: Utc::now() + Duration::minutes(30),
            is_used: false,
            attempts: 0,
            max_attempts: 5,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_code() {
        assert_eq!(sample_code().validate_code("123456"), CodeValidation::Valid);
    }

    #[test]
    fn test_expired_code() {
        let mut code = sample_code();
        code.expires_at = Utc::now() - Duration::minutes(1);
        assert_eq!(code.validate_code("123456"), CodeValidation::Expired);
    }

    #[test]
    fn test_used_code() {
        let mut code = sample_code();
        code.is_used = true;
        assert_eq!(code.validate_code("123456"), CodeValidation::Used);
    }

    #[test]
    fn test_max_attempts() {
        let mut code = sample_code();
        code.attempts = 5;
        assert_eq!(code.validate_code("123456"), CodeValidation::MaxAttempts);
    }

    #[test]
    fn test_mismatch() {
        assert_eq!(
            sample_code().validate_code("654321"),
            CodeValidation::Mismatch
        );
    }
}
