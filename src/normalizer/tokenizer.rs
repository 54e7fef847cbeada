use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid pattern"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid pattern"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("valid pattern"));

/// Lowercases the text, turns every run of non-word characters (newlines included)
/// into a single space, strips ASCII digits and collapses the spaces left behind.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let separated = NON_WORD.replace_all(&lowered, " ");
    let without_digits = DIGITS.replace_all(&separated, "");
    SPACES.replace_all(&without_digits, " ").into_owned()
}

/// Splits normalized text on single spaces.
///
/// Leading and trailing separators yield empty tokens; callers filter them.
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text).split(' ').map(str::to_string).collect()
}

/// Decodes UTF-8, dropping invalid byte sequences instead of substituting them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
