//! Joke dataset post-processing.
//!
//! Raw rows `(author, link, text, score, time)` become [`JokeRecord`]s:
//! the text is split into sentences, tokenized, and profanity is masked at
//! token granularity. A [`JokeCollection`] holds a loaded dataset and
//! serializes it as an XML tree or a keyed JSON mapping.
//!
//! ```rust
//! use jokes::{JokeRecord, ProfanityList};
//!
//! let list = ProfanityList::from_phrases(["darn"]);
//! let joke = JokeRecord::from_fields(
//!     vec![
//!         "alice".into(),
//!         "http://x".into(),
//!         "This is darn funny.".into(),
//!         "42".into(),
//!         "2020-01-01".into(),
//!     ],
//!     &list,
//! )
//! .unwrap();
//! assert_eq!(joke.to_string(), "This is #### funny .");
//! assert_eq!(joke.profanity_count(), 1);
//! ```

pub mod collection;
pub mod error;
pub mod export;
pub mod joke;
pub mod pattern;
pub mod profanity;
pub mod tokenizer;

pub use collection::{DatasetFormat, JokeCollection};
pub use error::{JokeError, Result};
pub use export::{JokeMapping, XmlNode};
pub use joke::{JokeRecord, Presentation, RawJoke};
pub use profanity::{MaskConfig, Masked, ProfanityList};
pub use tokenizer::{split_sentences, tokenize, tokenize_sentences};
