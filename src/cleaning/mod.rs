//! Text cleaning for model and service output.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:python)?\n(.*?)```").expect("Valid fenced code block regex")
});

/// Returns the trimmed body of the first fenced code block (plain or `python`),
/// or the input unchanged when there is none.
pub fn extract_code_block(text: &str) -> String {
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string())
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fence() {
        let text = "Here you go:\n```\ndef f():\n    return 1\n```\nEnjoy.";
        assert_eq!(extract_code_block(text), "def f():\n    return 1");
    }

    #[test]
    fn test_python_fence() {
        let text = "```python\nprint('hi')\n```";
        assert_eq!(extract_code_block(text), "print('hi')");
    }

    #[test]
    fn test_first_block_wins() {
        let text = "```\nfirst\n```\n```\nsecond\n```";
        assert_eq!(extract_code_block(text), "first");
    }

    #[test]
    fn test_other_language_tag_not_extracted() {
        // Only untagged and `python` fences are recognised.
        let text = "```rust\nfn main() {}\n```";
        assert_eq!(extract_code_block(text), text);
    }

    #[test]
    fn test_no_fence_returns_input() {
        assert_eq!(extract_code_block("def f(): pass"), "def f(): pass");
    }

    #[test]
    fn test_unterminated_fence_returns_input() {
        let text = "```\ndef f(): pass";
        assert_eq!(extract_code_block(text), text);
    }
}
