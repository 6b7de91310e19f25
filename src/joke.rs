//! One joke with its metadata and everything derived from its text.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{JokeError, Result};
use crate::profanity::{MaskConfig, ProfanityList};
use crate::tokenizer::{split_sentences, tokenize_sentences};

/// Number of positional fields in a raw row: author, link, text, score, time.
pub const FIELD_COUNT: usize = 5;

/// A raw input row before any derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJoke {
    pub author: String,
    pub link: String,
    pub text: String,
    pub score: String,
    pub time: String,
}

impl TryFrom<Vec<String>> for RawJoke {
    type Error = JokeError;

    fn try_from(fields: Vec<String>) -> Result<Self> {
        let [author, link, text, score, time]: [String; FIELD_COUNT] =
            fields.try_into().map_err(|fields: Vec<String>| JokeError::WrongArity {
                expected: FIELD_COUNT,
                found: fields.len(),
            })?;
        Ok(RawJoke {
            author,
            link,
            text,
            score,
            time,
        })
    }
}

/// Parses a score the way the dataset writes it: an optionally signed
/// integer, surrounding whitespace allowed.
pub fn parse_score(value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| JokeError::InvalidScore {
        value: value.to_string(),
    })
}

/// A fully derived, immutable joke record.
#[derive(Debug, Clone)]
pub struct JokeRecord {
    author: String,
    link: String,
    raw_text: String,
    score: i64,
    timestamp: String,
    sentences: Vec<String>,
    tokens: Vec<Vec<String>>,
    masked_tokens: Vec<Vec<String>>,
    profanity_count: usize,
}

/// Build-up and punch-line of a joke with more than one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub build_up: String,
    pub punch_line: String,
}

impl JokeRecord {
    pub fn new(raw: RawJoke, profanity: &ProfanityList) -> Result<Self> {
        Self::with_config(raw, profanity, &MaskConfig::default())
    }

    /// Splits, tokenizes and masks the raw text. Fails only on a bad score.
    pub fn with_config(raw: RawJoke, profanity: &ProfanityList, config: &MaskConfig) -> Result<Self> {
        let score = parse_score(&raw.score)?;
        let sentences = split_sentences(&raw.text);
        let tokens = tokenize_sentences(&sentences);
        let masked = profanity.mask_with(&tokens, config);

        Ok(JokeRecord {
            author: raw.author,
            link: raw.link,
            raw_text: raw.text,
            score,
            timestamp: raw.time,
            sentences,
            tokens,
            masked_tokens: masked.tokens,
            profanity_count: masked.occurrences,
        })
    }

    /// Builds a record straight from positional fields.
    pub fn from_fields(fields: Vec<String>, profanity: &ProfanityList) -> Result<Self> {
        Self::new(RawJoke::try_from(fields)?, profanity)
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn tokens(&self) -> &[Vec<String>] {
        &self.tokens
    }

    pub fn masked_tokens(&self) -> &[Vec<String>] {
        &self.masked_tokens
    }

    pub fn profanity_count(&self) -> usize {
        self.profanity_count
    }

    /// Compares by score, best first: a higher score orders as `Less`.
    pub fn cmp_by_score(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score)
    }

    /// Equal scores, regardless of text.
    pub fn same_score(&self, other: &Self) -> bool {
        self.score == other.score
    }

    /// Splits the masked joke into build-up and punch-line. `None` for
    /// single-sentence jokes.
    pub fn presentation(&self) -> Option<Presentation> {
        let (punch_line, build_up) = self.masked_tokens.split_last()?;
        if build_up.is_empty() {
            return None;
        }
        Some(Presentation {
            build_up: render(build_up),
            punch_line: render(std::slice::from_ref(punch_line)),
        })
    }
}

/// Flattens sentences of tokens into display text.
pub fn render(sentences: &[Vec<String>]) -> String {
    sentences
        .iter()
        .map(|tokens| tokens.join(" "))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for JokeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.masked_tokens))
    }
}
