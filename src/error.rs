//! Error type shared by the whole crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building records and collections.
///
/// Splitting, tokenizing, masking and exporting are total over well-formed
/// input; every variant here comes from a file-shaped boundary or from a
/// malformed row.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JokeError {
    /// A row did not have exactly five fields.
    #[error("expected {expected} fields, found {found}")]
    WrongArity { expected: usize, found: usize },

    /// The score field is not an integer.
    #[error("score {value:?} is not an integer")]
    InvalidScore { value: String },

    /// A row-level failure, tagged with its 1-based position in the dataset.
    #[error("malformed row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<JokeError>,
    },

    /// The profanity list could not be read.
    #[error("cannot read profanity list {}: {source}", path.display())]
    ProfanityList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The nested-mapping dataset does not have the expected shape.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("cannot pick a joke from an empty collection")]
    EmptyCollection,
}

impl JokeError {
    pub(crate) fn at_row(self, row: usize) -> Self {
        JokeError::Row {
            row,
            source: Box::new(self),
        }
    }

    /// Row number of the offending record, if this error is tied to one.
    pub fn row(&self) -> Option<usize> {
        match self {
            JokeError::Row { row, .. } => Some(*row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JokeError>;
