//! Tree-node and keyed-mapping projections of a [`JokeRecord`].
//!
//! Both projections carry the same six fields. `text` is always the original
//! unmasked text; masking is disclosed only through `profanity_score`.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::joke::JokeRecord;

pub const JOKE_TAG: &str = "joke";
pub const JOKES_TAG: &str = "jokes";

const INDENT: &str = "  ";

/// A minimal element tree: a name, optional text and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn element(name: impl Into<String>, children: Vec<XmlNode>) -> Self {
        XmlNode {
            name: name.into(),
            text: None,
            children,
        }
    }

    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        XmlNode {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    /// Renders the tree as indented XML, one element per line.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        match (&self.text, self.children.is_empty()) {
            (None, true) => {
                let _ = writeln!(out, "{pad}<{}/>", self.name);
            }
            (text, true) => {
                let text = text.as_deref().unwrap_or_default();
                let _ = writeln!(out, "{pad}<{0}>{1}</{0}>", self.name, escape_text(text));
            }
            (text, false) => {
                let _ = write!(out, "{pad}<{}>", self.name);
                if let Some(text) = text {
                    out.push_str(&escape_text(text));
                }
                out.push('\n');
                for child in &self.children {
                    child.write_pretty(out, depth + 1);
                }
                let _ = writeln!(out, "{pad}</{}>", self.name);
            }
        }
    }
}

/// Escapes the characters that cannot appear raw in element text.
///
/// Characters XML 1.0 does not allow at all (C0 controls other than tab and
/// newline, U+FFFE, U+FFFF) become U+FFFD so the document stays parseable.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            c if !is_xml_char(c) => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(ch),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Keyed-mapping form of one joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeMapping {
    pub author: String,
    pub link: String,
    pub text: String,
    pub rating: i64,
    pub time: String,
    pub profanity_score: usize,
}

impl JokeRecord {
    /// `<joke>` node with `text, author, link, score, time, profanity_score`
    /// leaves, all string valued.
    pub fn to_node(&self) -> XmlNode {
        XmlNode::element(
            JOKE_TAG,
            vec![
                XmlNode::leaf("text", self.raw_text()),
                XmlNode::leaf("author", self.author()),
                XmlNode::leaf("link", self.link()),
                XmlNode::leaf("score", self.score().to_string()),
                XmlNode::leaf("time", self.timestamp()),
                XmlNode::leaf("profanity_score", self.profanity_count().to_string()),
            ],
        )
    }

    pub fn to_mapping(&self) -> JokeMapping {
        JokeMapping {
            author: self.author().to_string(),
            link: self.link().to_string(),
            text: self.raw_text().to_string(),
            rating: self.score(),
            time: self.timestamp().to_string(),
            profanity_score: self.profanity_count(),
        }
    }
}
