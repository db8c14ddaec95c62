use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ASCII whitespace plus the sentence punctuation the corpus uses as word breaks.
    static ref SEPARATORS: Regex = Regex::new(r"[\t\n\x0B\x0C\r ,.;!?]+").expect("valid regex");
}

/// Split `text` into lowercase tokens. Position `i` of the result is the token's position.
pub fn tokenize(text: &str) -> Vec<String> {
    SEPARATORS
        .split(text)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Like [`tokenize`], but drops double quotes first. Series and episode titles
/// are quoted in the corpus and the quotes must not stick to the first and last word.
pub fn tokenize_title(text: &str) -> Vec<String> {
    tokenize(&text.replace('"', ""))
}
