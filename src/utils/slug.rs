use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug regex"));
static EDGE_HYPHEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-+|-+$").expect("Invalid hyphen regex"));

/// 从标题生成 URL slug
///
/// 小写化后把所有非字母数字字符折叠为单个连字符，并去掉首尾连字符。
/// 在写入前显式调用，而不是挂在持久化层的钩子上。
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = NON_ALNUM_RE.replace_all(&lowered, "-");
    EDGE_HYPHEN_RE.replace_all(&hyphenated, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Introduction to Rust"), "introduction-to-rust");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(slugify("C++ & Systems: Part 2!"), "c-systems-part-2");
    }

    #[test]
    fn test_edge_hyphens_trimmed() {
        assert_eq!(slugify("  Hello World  "), "hello-world");
        assert_eq!(slugify("---"), "");
    }
}
