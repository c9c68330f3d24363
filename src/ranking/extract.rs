use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::FALLBACK_FUNCTION_NAME;

use super::types::SkipReason;

static DEF_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"def\s+(\w+)").expect("Valid function name regex"));

/// Name of the first `def NAME` in `primary`, or `"function"` if there is none.
pub fn derive_function_name(primary: &str) -> String {
    DEF_NAME
        .captures(primary)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_FUNCTION_NAME.to_string())
}

/// Extracts the block of `def function_name(...):` from `raw_text`.
///
/// The block is the signature line plus every following line that begins with
/// whitespace, so it ends at the first unindented line. Fragments shorter than
/// `min_len` chars are rejected.
pub fn extract_fragment(
    raw_text: &str,
    function_name: &str,
    min_len: usize,
) -> Result<String, SkipReason> {
    let pattern = format!(
        r"def {}\(.*?\):\n(?:\s+.*\n)*",
        regex::escape(function_name)
    );
    let no_match = || SkipReason::NoFunctionMatch {
        function_name: function_name.to_string(),
    };
    let re = Regex::new(&pattern).map_err(|_| no_match())?;

    let fragment = re.find(raw_text).ok_or_else(no_match)?.as_str();

    let len = fragment.chars().count();
    if len < min_len {
        return Err(SkipReason::FragmentTooShort { len, min: min_len });
    }

    Ok(fragment.to_string())
}
