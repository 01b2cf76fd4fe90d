use serde::{Deserialize, Serialize};

use crate::types::ColumnType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub column_type: ColumnType,
}

/// Position of a column inside its type's lane group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LaneRef {
    pub column_type: ColumnType,
    pub lane: usize,
}

/// Number of lanes in each type group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaneCounts {
    pub text: usize,
    pub numeric: usize,
}

impl LaneCounts {
    pub fn get(&self, column_type: ColumnType) -> usize {
        match column_type {
            ColumnType::Text => self.text,
            ColumnType::Numeric => self.numeric,
        }
    }

    /// Claim the next lane of `column_type`, returning its index.
    pub fn claim(&mut self, column_type: ColumnType) -> usize {
        let counter = match column_type {
            ColumnType::Text => &mut self.text,
            ColumnType::Numeric => &mut self.numeric,
        };
        let lane = *counter;
        *counter += 1;
        lane
    }
}

/// Ordered column list of a frame.
///
/// Lane indices are assigned as columns are added: the n-th column of a given
/// type lives in lane `n` of that type's group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
    lanes: Vec<LaneRef>,
    counts: LaneCounts,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column_type: ColumnType, name: impl Into<String>) -> LaneRef {
        let lane = LaneRef {
            column_type,
            lane: self.counts.claim(column_type),
        };
        self.columns.push(ColumnSchema {
            name: name.into(),
            column_type,
        });
        self.lanes.push(lane);
        lane
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Index of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_type(&self, idx: usize) -> Option<ColumnType> {
        self.columns.get(idx).map(|c| c.column_type)
    }

    pub fn lane_of(&self, idx: usize) -> Option<LaneRef> {
        self.lanes.get(idx).copied()
    }

    pub fn lane_counts(&self) -> LaneCounts {
        self.counts
    }
}

impl FromIterator<ColumnSchema> for Schema {
    fn from_iter<I: IntoIterator<Item = ColumnSchema>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for column in iter {
            schema.add_column(column.column_type, column.name);
        }
        schema
    }
}
