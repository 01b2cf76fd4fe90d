//! Lane-partitioned columnar frames for colframe.
//!
//! A [`DataFrame`] owns an ordered [`Schema`] plus two groups of column storage:
//! - text lanes (`Vec<Vec<String>>`), one per [`ColumnType::Text`] column,
//! - numeric lanes (`Vec<Vec<f64>>`), one per [`ColumnType::Numeric`] column.
//!
//! The lane index of a column is its position among the schema columns of the
//! same type. Frames are immutable once constructed.

#![forbid(unsafe_code)]

mod frame;
mod schema;
mod types;

pub use crate::frame::{DataFrame, FrameError, Row, Rows};
pub use crate::schema::{ColumnSchema, LaneCounts, LaneRef, Schema};
pub use crate::types::{ColumnType, Value};
