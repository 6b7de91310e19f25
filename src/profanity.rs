//! Banned-phrase list and the token-level masker.
//!
//! Matching is literal and case-sensitive on the space-joined token text of
//! a sentence. A match is mapped back to token positions and only the tokens
//! it touches are replaced by `#` runs of the same length.

use std::fs;
use std::io::Read;
use std::path::Path;

use aho_corasick::AhoCorasick;
use tracing::{debug, warn};

use crate::error::{JokeError, Result};
use crate::pattern::{MASK_CHAR, WORD_SEPARATOR};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Phrase {
    text: String,
    /// Spaces before the first word of the phrase.
    leading_spaces: usize,
    word_count: usize,
}

impl Phrase {
    fn new(text: String) -> Option<Self> {
        let trimmed = text.trim_matches(' ');
        if trimmed.is_empty() {
            return None;
        }
        let leading_spaces = text.len() - text.trim_start_matches(' ').len();
        let word_count = trimmed.split(WORD_SEPARATOR).count();
        Some(Phrase {
            text,
            leading_spaces,
            word_count,
        })
    }
}

/// Knobs for [`ProfanityList::mask_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskConfig {
    /// Upper bound on matches per phrase per sentence. `None` uses the
    /// sentence's token count, which every terminating phrase stays within.
    pub max_rescans_per_phrase: Option<usize>,
}

/// Token lists after masking, plus how many match events were masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    pub tokens: Vec<Vec<String>>,
    pub occurrences: usize,
}

/// An ordered, read-only list of banned phrases.
///
/// Order matters: when phrases overlap, earlier phrases are masked first and
/// can hide later ones.
#[derive(Debug, Clone)]
pub struct ProfanityList {
    phrases: Vec<Phrase>,
    // Fast "anything here at all?" check over every phrase at once.
    matcher: Option<AhoCorasick>,
}

impl ProfanityList {
    /// Builds a list from phrases in order. Blank phrases are skipped since
    /// they would match every sentence.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<Phrase> = phrases
            .into_iter()
            .filter_map(|p| Phrase::new(p.into()))
            .collect();

        let matcher = if phrases.is_empty() {
            None
        } else {
            match AhoCorasick::new(phrases.iter().map(|p| p.text.as_str())) {
                Ok(ac) => Some(ac),
                Err(e) => {
                    warn!(error = %e, "profanity pre-check unavailable, scanning phrase by phrase");
                    None
                }
            }
        };

        ProfanityList { phrases, matcher }
    }

    /// Parses a newline-delimited list. A trailing `\r` is stripped from
    /// each line and blank lines are ignored.
    pub fn from_text(text: &str) -> Self {
        Self::from_phrases(text.split('\n').map(|line| line.trim_end_matches('\r')))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::from_text(&text))
    }

    /// Reads the list from `path`. A missing or unreadable file is an error:
    /// records cannot be built without a list.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| JokeError::ProfanityList {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_text(&text);
        debug!(path = %path.display(), phrases = list.len(), "loaded profanity list");
        Ok(list)
    }

    pub fn empty() -> Self {
        ProfanityList {
            phrases: Vec::new(),
            matcher: None,
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(|p| p.text.as_str())
    }

    /// True if any phrase occurs literally in `text`.
    pub fn is_present_in(&self, text: &str) -> bool {
        match &self.matcher {
            Some(ac) => ac.is_match(text),
            None => self.phrases.iter().any(|p| text.contains(p.text.as_str())),
        }
    }

    pub fn mask(&self, sentences: &[Vec<String>]) -> Masked {
        self.mask_with(sentences, &MaskConfig::default())
    }

    /// Masks every sentence and sums the match events.
    pub fn mask_with(&self, sentences: &[Vec<String>], config: &MaskConfig) -> Masked {
        let mut occurrences = 0;
        let tokens = sentences
            .iter()
            .map(|sentence| {
                let (masked, count) = self.mask_sentence(sentence, config);
                occurrences += count;
                masked
            })
            .collect();
        Masked {
            tokens,
            occurrences,
        }
    }

    /// Masks one sentence's tokens.
    ///
    /// For each phrase in list order, the working text is rescanned after
    /// every replacement, so a phrase can match several times and an earlier
    /// mask can hide or reveal later matches. The first masked token is the
    /// one containing the match offset.
    pub fn mask_sentence(&self, tokens: &[String], config: &MaskConfig) -> (Vec<String>, usize) {
        let mut tokens = tokens.to_vec();
        let mut text = tokens.join(WORD_SEPARATOR);
        if !self.is_present_in(&text) {
            return (tokens, 0);
        }

        let cap = config.max_rescans_per_phrase.unwrap_or(tokens.len());
        let mut occurrences = 0;

        for phrase in &self.phrases {
            let mut matches = 0;
            while let Some(offset) = text.find(phrase.text.as_str()) {
                if matches == cap {
                    warn!(phrase = %phrase.text, cap, "phrase still matches after rescan cap, skipping");
                    break;
                }
                matches += 1;

                // Tokens hold no spaces, so the separators before the first
                // word give its token index.
                let first_word = offset + phrase.leading_spaces;
                let start = text[..first_word].matches(WORD_SEPARATOR).count();
                let end = (start + phrase.word_count).min(tokens.len());
                debug!(phrase = %phrase.text, start, end, "masking tokens");

                for token in &mut tokens[start..end] {
                    *token = mask_token(token);
                }
                text = tokens.join(WORD_SEPARATOR);
            }
            occurrences += matches;
        }

        (tokens, occurrences)
    }
}

/// A `#` run with one mark per character of `token`.
pub fn mask_token(token: &str) -> String {
    std::iter::repeat(MASK_CHAR).take(token.chars().count()).collect()
}
