//! Removal of Markdown code fences wrapped around model output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches ```` ``` ```` optionally followed by a `markdown` language tag.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```(?:markdown)?").expect("code fence pattern is valid"));

/// Strip every code fence from `text` and trim the result.
///
/// Models often wrap a Markdown answer in a fenced block even when asked not
/// to; the fences would otherwise leak into the first and last section.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}
