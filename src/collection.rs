//! Loading a dataset into records and the bulk operations over it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{JokeError, Result};
use crate::export::{XmlNode, JOKES_TAG};
use crate::joke::{JokeRecord, Presentation, FIELD_COUNT};
use crate::profanity::ProfanityList;

/// Key written by the mapping export that is derived, not part of a row.
const DERIVED_FIELD: &str = "profanity_score";

/// Shape of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated rows of `author, link, text, score, time`, no header.
    Rows,
    /// A JSON mapping of arbitrary keys to per-joke mappings.
    NestedMapping,
}

impl DatasetFormat {
    /// `.json` files are nested mappings, everything else is rows.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::NestedMapping,
            _ => DatasetFormat::Rows,
        }
    }
}

/// An ordered, load-once list of jokes.
#[derive(Debug, Clone, Default)]
pub struct JokeCollection {
    jokes: Vec<JokeRecord>,
}

impl JokeCollection {
    pub fn from_records(jokes: Vec<JokeRecord>) -> Self {
        JokeCollection { jokes }
    }

    /// Builds one record per row, in parallel, keeping row order.
    ///
    /// Any malformed row fails the whole load; the error carries the first
    /// offending row's 1-based number.
    pub fn from_rows<I>(rows: I, profanity: &ProfanityList) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let rows: Vec<Vec<String>> = rows.into_iter().collect();
        debug!(rows = rows.len(), "building joke records");

        let built: Vec<Result<JokeRecord>> = rows
            .into_par_iter()
            .enumerate()
            .map(|(i, row)| JokeRecord::from_fields(row, profanity).map_err(|e| e.at_row(i + 1)))
            .collect();
        let jokes = built.into_iter().collect::<Result<Vec<_>>>()?;

        Ok(JokeCollection { jokes })
    }

    /// Loads headerless comma-separated rows.
    ///
    /// Blank lines are skipped, so the row number in an error counts records
    /// (1-based), not physical lines of the input.
    pub fn from_csv_reader<R: Read>(reader: R, profanity: &ProfanityList) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| JokeError::from(e).at_row(i + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Self::from_rows(rows, profanity)
    }

    /// Loads a nested mapping, flattening each joke's values in their own
    /// order onto the five row positions.
    pub fn from_json_str(json: &str, profanity: &ProfanityList) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_rows(flatten_nested(&value)?, profanity)
    }

    pub fn from_json_reader<R: Read>(reader: R, profanity: &ProfanityList) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_rows(flatten_nested(&value)?, profanity)
    }

    /// Loads a dataset file, picking the shape from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P, profanity: &ProfanityList) -> Result<Self> {
        let path = path.as_ref();
        let format = DatasetFormat::from_path(path);
        let reader = BufReader::new(File::open(path)?);
        let collection = match format {
            DatasetFormat::Rows => Self::from_csv_reader(reader, profanity)?,
            DatasetFormat::NestedMapping => Self::from_json_reader(reader, profanity)?,
        };
        info!(path = %path.display(), ?format, jokes = collection.len(), "loaded jokes");
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JokeRecord> {
        self.jokes.get(index)
    }

    pub fn jokes(&self) -> &[JokeRecord] {
        &self.jokes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JokeRecord> {
        self.jokes.iter()
    }

    /// Picks one joke uniformly at random.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&JokeRecord> {
        self.jokes.choose(rng).ok_or(JokeError::EmptyCollection)
    }

    pub fn random_joke(&self) -> Result<&JokeRecord> {
        self.pick_random(&mut rand::thread_rng())
    }

    /// Jokes ordered best score first; ties keep load order.
    pub fn sorted_by_score(&self) -> Vec<&JokeRecord> {
        let mut sorted: Vec<&JokeRecord> = self.jokes.iter().collect();
        sorted.sort_by(|a, b| a.cmp_by_score(b));
        sorted
    }

    pub fn best(&self) -> Option<&JokeRecord> {
        self.jokes.iter().min_by(|a, b| a.cmp_by_score(b))
    }

    pub fn total_profanity(&self) -> usize {
        self.jokes.iter().map(JokeRecord::profanity_count).sum()
    }

    /// Build-up and punch-line of every multi-sentence joke, in load order.
    pub fn presentations(&self) -> Vec<Presentation> {
        self.jokes.iter().filter_map(JokeRecord::presentation).collect()
    }

    /// All `<joke>` nodes under one `<jokes>` root.
    pub fn to_tree(&self) -> XmlNode {
        XmlNode::element(JOKES_TAG, self.jokes.iter().map(JokeRecord::to_node).collect())
    }

    /// Per-joke mappings keyed `"1"`, `"2"`, ... in load order.
    pub fn to_mapping(&self) -> Result<Map<String, Value>> {
        let mut doc = Map::with_capacity(self.jokes.len());
        for (i, joke) in self.jokes.iter().enumerate() {
            doc.insert((i + 1).to_string(), serde_json::to_value(joke.to_mapping())?);
        }
        Ok(doc)
    }

    pub fn to_xml_string(&self) -> String {
        self.to_tree().to_xml_string()
    }

    /// Writes the mapping document as JSON indented by three spaces.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        Value::Object(self.to_mapping()?).serialize(&mut ser)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn save_xml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_xml_string())?;
        info!(path = %path.display(), jokes = self.len(), "saved XML");
        Ok(())
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), jokes = self.len(), "saved JSON");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a JokeCollection {
    type Item = &'a JokeRecord;
    type IntoIter = std::slice::Iter<'a, JokeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.jokes.iter()
    }
}

/// Flattens `{key: {field: value, ...}, ...}` into positional rows.
///
/// A trailing `profanity_score` entry (as written by the mapping export) is
/// dropped since it is recomputed.
fn flatten_nested(value: &Value) -> Result<Vec<Vec<String>>> {
    let outer = value.as_object().ok_or_else(|| {
        JokeError::InvalidDataset("top level must be a mapping of jokes".to_string())
    })?;

    outer
        .iter()
        .enumerate()
        .map(|(i, (key, joke))| -> Result<Vec<String>> {
            let fields = joke.as_object().ok_or_else(|| {
                JokeError::InvalidDataset(format!("entry {key:?} is not a mapping")).at_row(i + 1)
            })?;
            fields
                .iter()
                .enumerate()
                .filter(|(pos, (name, _))| !(*pos == FIELD_COUNT && name.as_str() == DERIVED_FIELD))
                .map(|(_, (name, v))| {
                    scalar_to_string(v).ok_or_else(|| {
                        JokeError::InvalidDataset(format!(
                            "entry {key:?} field {name:?} is not a string or number"
                        ))
                        .at_row(i + 1)
                    })
                })
                .collect()
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            // `9.0` is still an integer score
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some((f as i64).to_string())
            }
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}
