//! Load header-delimited text (CSV) into a [`colframe_columnar::DataFrame`].
//!
//! A load runs in two phases:
//! - the header is resolved once against the required columns and the type map, producing the
//!   projected schema and a per-source-column routing table;
//! - every following record is pushed through the routing table into text or numeric lanes.
//!   Numeric cells that fail to parse are stored as `NaN` instead of failing the load.
//!
//! ```no_run
//! use colframe_columnar::ColumnType;
//! use colframe_ingest::{CsvDataFrameLoader, DataFrameLoader};
//!
//! let frame = CsvDataFrameLoader::from_path("metrics.csv", ["host", "latency"])?
//!     .column_type("latency", ColumnType::Numeric)
//!     .load()?;
//! assert_eq!(frame.num_columns(), 2);
//! # Ok::<(), colframe_ingest::LoadError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod materialize;
mod number;
mod resolve;
mod source;

pub use crate::config::{CsvOptions, CsvTextEncoding, LoaderConfig};
pub use crate::error::LoadError;
pub use crate::loader::{load_csv, CsvDataFrameLoader, DataFrameLoader};
pub use crate::source::{CsvRecordSource, MemoryRecordSource, RecordSource};
