// src/pattern.rs

use once_cell::sync::Lazy;
use regex::Regex;

// ----- SENTENCE RULES -----
/// One optional leading space (dropped), then either a run of non-terminator
/// characters with its trailing terminators, or a lone newline.
pub const SENTENCE_PATTERN_STR: &str = r" ?([^.!?\n]+[.?!]*|\n)";

// ----- TOKEN RULES -----
/// Word characters and apostrophes, or a single `? . \n , !`.
pub const TOKEN_PATTERN_STR: &str = r"[\w']+|\?|\.|\n|,|!";

// ----- MASKING -----
pub const MASK_CHAR: char = '#';
pub const WORD_SEPARATOR: &str = " ";

pub static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(SENTENCE_PATTERN_STR)
        .unwrap_or_else(|e| panic!("Sentence pattern compile error for '{}': {}", SENTENCE_PATTERN_STR, e))
});

pub static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(TOKEN_PATTERN_STR)
        .unwrap_or_else(|e| panic!("Token pattern compile error for '{}': {}", TOKEN_PATTERN_STR, e))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(SENTENCE_RE.is_match("Hello."));
        assert!(TOKEN_RE.is_match("don't"));
    }

    #[test]
    fn terminators_match_sentence_class() {
        for t in ['.', '!', '?'] {
            let text = format!("abc{}", t);
            let caps = SENTENCE_RE.captures(&text).unwrap();
            assert_eq!(&caps[1], text);
        }
    }
}
