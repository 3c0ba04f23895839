use rand::Rng;
use sha2::{Digest, Sha256};

/// 生成 6 位数字验证码
pub fn generate_verification_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(100000..1000000).to_string()
}

/// 生成密码重置令牌
///
/// 返回 (明文令牌, 哈希后令牌)。明文通过邮件发送给用户，
/// 数据库只保存 SHA-256 哈希。
pub fn generate_reset_token() -> (String, String) {
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes[..]);
    let token = hex::encode(bytes);
    let hashed = hash_reset_token(&token);
    (token, hashed)
}

/// 对重置令牌做 SHA-256 哈希（hex 编码）
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_code_shape() {
        for _ in 0..32 {
            let code = generate_verification_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_reset_token_hash_is_stable() {
        let (token, hashed) = generate_reset_token();
        assert_eq!(token.len(), 64);
        assert_eq!(hashed, hash_reset_token(&token));
        assert_ne!(token, hashed);
    }
}
