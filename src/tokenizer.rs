//! Lexical sentence splitting and tokenization.
//!
//! Both steps are fixed regex rules from [`crate::pattern`]; nothing here is
//! grammar aware.

use crate::pattern::{SENTENCE_RE, TOKEN_RE};

/// Splits raw text into sentences.
///
/// Each sentence is a run of non-terminator characters plus its trailing
/// `.`/`!`/`?` characters, or a lone newline. A single leading space before
/// a sentence is dropped. Text without terminal punctuation is one sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenizes one sentence into word runs (letters, digits, `_`, `'`) and the
/// single punctuation tokens `? . \n , !`. Other characters, including
/// spaces, produce no token.
pub fn tokenize(sentence: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(sentence)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenizes every sentence independently, keeping the per-sentence grouping.
pub fn tokenize_sentences<S: AsRef<str>>(sentences: &[S]) -> Vec<Vec<String>> {
    sentences.iter().map(|s| tokenize(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators_and_drops_leading_space() {
        let sentences =
            split_sentences("Why did the chicken cross the road? To get to the other side!");
        assert_eq!(
            sentences,
            vec!["Why did the chicken cross the road?", "To get to the other side!"]
        );
    }

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
    }

    #[test]
    fn newline_is_its_own_sentence() {
        assert_eq!(
            split_sentences("First line\nSecond line."),
            vec!["First line", "\n", "Second line."]
        );
    }

    #[test]
    fn runs_of_terminators_stay_with_the_sentence() {
        assert_eq!(split_sentences("What?! Really..."), vec!["What?!", "Really..."]);
    }

    #[test]
    fn only_one_leading_space_is_consumed() {
        assert_eq!(split_sentences("A.  B."), vec!["A.", " B."]);
    }

    #[test]
    fn tokenizes_words_and_punctuation() {
        assert_eq!(
            tokenize("I don't know, do you?"),
            vec!["I", "don't", "know", ",", "do", "you", "?"]
        );
    }

    #[test]
    fn other_symbols_are_dropped() {
        assert_eq!(tokenize("cost: $5 (cheap)"), vec!["cost", "5", "cheap"]);
    }

    #[test]
    fn each_punctuation_mark_is_a_separate_token() {
        assert_eq!(tokenize("wait..."), vec!["wait", ".", ".", "."]);
        assert_eq!(tokenize("\n"), vec!["\n"]);
    }

    #[test]
    fn keeps_per_sentence_grouping() {
        let sentences = split_sentences("Hi there. Bye!");
        let tokens = tokenize_sentences(&sentences);
        assert_eq!(tokens.len(), sentences.len());
        assert_eq!(tokens[0], vec!["Hi", "there", "."]);
        assert_eq!(tokens[1], vec!["Bye", "!"]);
    }
}
