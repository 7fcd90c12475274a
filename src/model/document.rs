use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use plist::{Dictionary, Value};

use crate::error::ReportError;

/// A parsed property list whose top level is a dictionary.
///
/// Both XML and binary plists are accepted; the format is detected from the
/// file contents.
#[derive(Debug, Clone)]
pub struct Document {
    root: Dictionary,
}

impl Document {
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        let file = File::open(path).map_err(ReportError::Open)?;

        Self::from_reader(BufReader::new(file))
    }

    /// Parse a document from any seekable source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, ReportError> {
        let value = Value::from_reader(reader).map_err(ReportError::Malformed)?;
        let root = value.into_dictionary().ok_or(ReportError::NotADictionary)?;

        Ok(Self { root })
    }

    /// Walk nested dictionaries along `key_path` and return the string at the end.
    pub fn string_at(&self, key_path: &[&str]) -> Result<&str, ReportError> {
        let Some((leaf, parents)) = key_path.split_last() else {
            return Err(ReportError::MissingKey { key: String::new() });
        };

        let mut dict = &self.root;
        for (depth, key) in parents.iter().enumerate() {
            let shown = key_path[..=depth].join(".");
            dict = lookup(dict, key, &shown)?.as_dictionary().ok_or(
                ReportError::UnexpectedType {
                    key: shown,
                    expected: "dictionary",
                },
            )?;
        }

        let shown = key_path.join(".");
        lookup(dict, leaf, &shown)?
            .as_string()
            .ok_or(ReportError::UnexpectedType {
                key: shown,
                expected: "string",
            })
    }
}

fn lookup<'a>(dict: &'a Dictionary, key: &str, shown: &str) -> Result<&'a Value, ReportError> {
    dict.get(key).ok_or_else(|| ReportError::MissingKey {
        key: shown.to_string(),
    })
}
