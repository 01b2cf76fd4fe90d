use thiserror::Error;

use crate::schema::{LaneRef, Schema};
use crate::types::{ColumnType, Value};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("schema declares {expected} {column_type} lanes but {actual} were supplied")]
    LaneCountMismatch {
        column_type: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{column_type} lane {lane} has {actual} rows, expected {expected}")]
    LaneLengthMismatch {
        column_type: &'static str,
        lane: usize,
        expected: usize,
        actual: usize,
    },
}

/// Immutable columnar table with text and numeric lane groups.
#[derive(Clone, Debug, PartialEq)]
pub struct DataFrame {
    schema: Schema,
    text_lanes: Vec<Vec<String>>,
    numeric_lanes: Vec<Vec<f64>>,
    rows: usize,
}

impl DataFrame {
    /// Build a frame from a schema and its two lane groups.
    ///
    /// Text lane `i` holds the `i`-th text column of `schema` (likewise for numeric lanes),
    /// and every lane must have the same number of rows.
    pub fn new(
        schema: Schema,
        text_lanes: Vec<Vec<String>>,
        numeric_lanes: Vec<Vec<f64>>,
    ) -> Result<Self, FrameError> {
        let counts = schema.lane_counts();
        check_lane_count(ColumnType::Text, counts.text, text_lanes.len())?;
        check_lane_count(ColumnType::Numeric, counts.numeric, numeric_lanes.len())?;

        let rows = text_lanes
            .first()
            .map(Vec::len)
            .or_else(|| numeric_lanes.first().map(Vec::len))
            .unwrap_or(0);
        check_lane_lengths(ColumnType::Text, text_lanes.iter().map(Vec::len), rows)?;
        check_lane_lengths(ColumnType::Numeric, numeric_lanes.iter().map(Vec::len), rows)?;

        Ok(Self {
            schema,
            text_lanes,
            numeric_lanes,
            rows,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.schema.len()
    }

    pub fn text_lanes(&self) -> &[Vec<String>] {
        &self.text_lanes
    }

    pub fn numeric_lanes(&self) -> &[Vec<f64>] {
        &self.numeric_lanes
    }

    /// Values of the text column called `name`, if it exists and is textual.
    pub fn text_column(&self, name: &str) -> Option<&[String]> {
        match self.lane_by_name(name)? {
            LaneRef {
                column_type: ColumnType::Text,
                lane,
            } => self.text_lanes.get(lane).map(Vec::as_slice),
            _ => None,
        }
    }

    /// Values of the numeric column called `name`, if it exists and is numeric.
    pub fn numeric_column(&self, name: &str) -> Option<&[f64]> {
        match self.lane_by_name(name)? {
            LaneRef {
                column_type: ColumnType::Numeric,
                lane,
            } => self.numeric_lanes.get(lane).map(Vec::as_slice),
            _ => None,
        }
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<Value<'_>> {
        if row >= self.rows {
            return None;
        }
        let LaneRef { column_type, lane } = self.schema.lane_of(col)?;
        match column_type {
            ColumnType::Text => self
                .text_lanes
                .get(lane)
                .and_then(|l| l.get(row))
                .map(|s| Value::Text(s.as_str())),
            ColumnType::Numeric => self
                .numeric_lanes
                .get(lane)
                .and_then(|l| l.get(row))
                .map(|v| Value::Numeric(*v)),
        }
    }

    /// Reassemble row `row` in schema order.
    pub fn row(&self, row: usize) -> Option<Row<'_>> {
        (row < self.rows).then_some(Row { frame: self, row })
    }

    pub fn rows(&self) -> Rows<'_> {
        Rows {
            frame: self,
            next: 0,
        }
    }

    pub fn into_parts(self) -> (Schema, Vec<Vec<String>>, Vec<Vec<f64>>) {
        (self.schema, self.text_lanes, self.numeric_lanes)
    }

    fn lane_by_name(&self, name: &str) -> Option<LaneRef> {
        self.schema.lane_of(self.schema.column_index(name)?)
    }
}

fn check_lane_count(
    column_type: ColumnType,
    expected: usize,
    actual: usize,
) -> Result<(), FrameError> {
    if expected != actual {
        return Err(FrameError::LaneCountMismatch {
            column_type: column_type.as_str(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_lane_lengths(
    column_type: ColumnType,
    lengths: impl Iterator<Item = usize>,
    expected: usize,
) -> Result<(), FrameError> {
    for (lane, actual) in lengths.enumerate() {
        if actual != expected {
            return Err(FrameError::LaneLengthMismatch {
                column_type: column_type.as_str(),
                lane,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// A single row of a [`DataFrame`], read across lanes.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    frame: &'a DataFrame,
    row: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.row
    }

    pub fn len(&self) -> usize {
        self.frame.num_columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, col: usize) -> Option<Value<'a>> {
        self.frame.get_cell(self.row, col)
    }

    pub fn get_by_name(&self, name: &str) -> Option<Value<'a>> {
        self.get(self.frame.schema.column_index(name)?)
    }

    pub fn values(&self) -> Vec<Value<'a>> {
        (0..self.len()).filter_map(|col| self.get(col)).collect()
    }
}

pub struct Rows<'a> {
    frame: &'a DataFrame,
    next: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.frame.row(self.next)?;
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame.num_rows().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
