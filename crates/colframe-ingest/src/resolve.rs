use std::collections::{HashMap, HashSet};

use colframe_columnar::{ColumnType, LaneCounts, LaneRef, Schema};

use crate::error::LoadError;

/// Where a source column's cells go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Route {
    Skip,
    Text(usize),
    Numeric(usize),
}

impl From<LaneRef> for Route {
    fn from(lane: LaneRef) -> Self {
        match lane.column_type {
            ColumnType::Text => Route::Text(lane.lane),
            ColumnType::Numeric => Route::Numeric(lane.lane),
        }
    }
}

/// Output of header resolution: the projected schema plus one route per header column.
#[derive(Debug)]
pub(crate) struct Projection {
    pub(crate) schema: Schema,
    pub(crate) routes: Vec<Route>,
}

impl Projection {
    pub(crate) fn lane_counts(&self) -> LaneCounts {
        self.schema.lane_counts()
    }
}

/// Project `header` onto the required columns, in header order.
pub(crate) fn resolve_header(
    header: &[String],
    required: &HashSet<String>,
    column_types: &HashMap<String, ColumnType>,
) -> Result<Projection, LoadError> {
    let mut schema = Schema::new();
    let mut schema_index_map: Vec<Option<usize>> = vec![None; header.len()];
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(required.len());

    for (c, name) in header.iter().enumerate() {
        let column_type = column_types.get(name).copied().unwrap_or_default();
        if !required.contains(name) {
            continue;
        }
        if let Some(&first) = seen.get(name.as_str()) {
            return Err(LoadError::DuplicateColumn {
                name: name.clone(),
                first,
                second: c,
            });
        }
        seen.insert(name.as_str(), c);
        schema_index_map[c] = Some(schema.len());
        schema.add_column(column_type, name.as_str());
    }

    let routes = schema_index_map
        .into_iter()
        .map(|idx| idx.and_then(|i| schema.lane_of(i)).map_or(Route::Skip, Route::from))
        .collect();

    if schema.len() < required.len() {
        let mut missing: Vec<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|name| !seen.contains_key(name))
            .collect();
        missing.sort_unstable();
        log::debug!("required columns not present in header: {missing:?}");
    }

    let counts = schema.lane_counts();
    log::debug!(
        "projected {} of {} header columns ({} text lanes, {} numeric lanes)",
        schema.len(),
        header.len(),
        counts.text,
        counts.numeric
    );

    Ok(Projection { schema, routes })
}
