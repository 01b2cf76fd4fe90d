use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use colframe_columnar::{ColumnType, DataFrame};

use crate::config::{CsvOptions, LoaderConfig};
use crate::error::LoadError;
use crate::materialize::Lanes;
use crate::resolve::resolve_header;
use crate::source::{CsvRecordSource, RecordSource};

/// Something that can produce a fully materialized [`DataFrame`].
pub trait DataFrameLoader: Sized {
    /// Replace the column type map. Columns without an entry load as text.
    fn set_column_types(self, types: HashMap<String, ColumnType>) -> Self;

    fn load(self) -> Result<DataFrame, LoadError>;
}

/// Loads the required columns of a header-delimited record stream into a [`DataFrame`].
///
/// Output columns follow the order in which they appear in the header, not the order
/// of `required_columns`. Required columns that the header lacks are dropped.
#[derive(Debug)]
pub struct CsvDataFrameLoader<S> {
    source: S,
    required_columns: HashSet<String>,
    column_types: HashMap<String, ColumnType>,
}

impl<S: RecordSource> CsvDataFrameLoader<S> {
    pub fn new<I, N>(source: S, required_columns: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            source,
            required_columns: required_columns.into_iter().map(Into::into).collect(),
            column_types: HashMap::new(),
        }
    }

    pub fn with_config(source: S, config: LoaderConfig) -> Self {
        Self::new(source, config.required_columns).set_column_types(config.column_types)
    }

    /// Set the type of a single column, leaving the rest of the map untouched.
    pub fn column_type(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_types.insert(name.into(), column_type);
        self
    }
}

impl<R: Read> CsvDataFrameLoader<CsvRecordSource<R>> {
    pub fn from_reader<I, N>(reader: R, required_columns: I, options: &CsvOptions) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::new(CsvRecordSource::new(reader, options), required_columns)
    }
}

impl CsvDataFrameLoader<CsvRecordSource<BufReader<File>>> {
    pub fn from_path<I, N>(path: impl AsRef<Path>, required_columns: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::from_path_with_options(path, required_columns, &CsvOptions::default())
    }

    pub fn from_path_with_options<I, N>(
        path: impl AsRef<Path>,
        required_columns: I,
        options: &CsvOptions,
    ) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), required_columns, options))
    }
}

impl<S: RecordSource> DataFrameLoader for CsvDataFrameLoader<S> {
    fn set_column_types(mut self, types: HashMap<String, ColumnType>) -> Self {
        self.column_types = types;
        self
    }

    fn load(mut self) -> Result<DataFrame, LoadError> {
        let header = self.source.next_header()?.ok_or(LoadError::EmptyInput)?;
        let projection = resolve_header(&header, &self.required_columns, &self.column_types)?;

        let mut lanes = Lanes::new(projection.lane_counts());
        // The header is record 1.
        let mut record_index: u64 = 1;
        while let Some(record) = self.source.next_record()? {
            record_index += 1;
            if record.len() != projection.routes.len() {
                return Err(LoadError::Parse {
                    row: record_index,
                    column: 0,
                    reason: format!(
                        "expected {} fields, found {}",
                        projection.routes.len(),
                        record.len()
                    ),
                });
            }
            lanes.push_record(&projection.routes, record);
        }

        log::debug!(
            "loaded {} records; {} numeric cells were not numbers",
            record_index - 1,
            lanes.invalid_numeric()
        );

        let frame = DataFrame::new(projection.schema, lanes.text, lanes.numeric)?;
        Ok(frame)
    }
}

/// Load `reader` as CSV using `config` to choose and type the columns.
pub fn load_csv<R: Read>(
    reader: R,
    config: &LoaderConfig,
    options: &CsvOptions,
) -> Result<DataFrame, LoadError> {
    CsvDataFrameLoader::with_config(CsvRecordSource::new(reader, options), config.clone()).load()
}
