use std::borrow::Cow;
use std::collections::HashMap;
use std::str::Utf8Error;

use colframe_columnar::ColumnType;
use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};

/// Which columns to keep, and how to type them.
///
/// ```json
/// { "required_columns": ["name", "score"], "column_types": { "score": "numeric" } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub required_columns: Vec<String>,
    /// Columns missing from this map load as [`ColumnType::Text`].
    #[serde(default)]
    pub column_types: HashMap<String, ColumnType>,
}

impl LoaderConfig {
    pub fn new<I, S>(required_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_columns: required_columns.into_iter().map(Into::into).collect(),
            column_types: HashMap::new(),
        }
    }

    pub fn with_column_type(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_types.insert(name.into(), column_type);
        self
    }
}

#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    /// How to decode raw CSV bytes into text fields.
    pub encoding: CsvTextEncoding,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            encoding: CsvTextEncoding::Utf8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvTextEncoding {
    /// Attempt to decode as UTF-8; if a field contains invalid UTF-8, fall back to Windows-1252.
    Auto,
    /// Decode as UTF-8 and reject invalid byte sequences.
    #[default]
    Utf8,
    /// Decode as Windows-1252 (aka CP-1252).
    Windows1252,
}

impl CsvTextEncoding {
    pub(crate) fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, Utf8Error> {
        match (self, std::str::from_utf8(bytes)) {
            (CsvTextEncoding::Utf8, decoded) => decoded.map(Cow::Borrowed),
            (CsvTextEncoding::Auto, Ok(s)) => Ok(Cow::Borrowed(s)),
            (CsvTextEncoding::Auto, Err(_)) | (CsvTextEncoding::Windows1252, _) => {
                Ok(WINDOWS_1252.decode_without_bom_handling(bytes).0)
            }
        }
    }
}
