use colframe_columnar::LaneCounts;

use crate::number::{parse_f64, NumberError};
use crate::resolve::Route;

/// Per-type lane buffers filled record by record.
///
/// Lane position `i` in every lane holds a value from record `i`.
#[derive(Debug)]
pub(crate) struct Lanes {
    pub(crate) text: Vec<Vec<String>>,
    pub(crate) numeric: Vec<Vec<f64>>,
    invalid_numeric: u64,
}

impl Lanes {
    pub(crate) fn new(counts: LaneCounts) -> Self {
        Self {
            text: vec![Vec::new(); counts.text],
            numeric: vec![Vec::new(); counts.numeric],
            invalid_numeric: 0,
        }
    }

    /// Append one record's projected cells. `record` has one field per route.
    pub(crate) fn push_record(&mut self, routes: &[Route], record: Vec<String>) {
        for (route, field) in routes.iter().zip(record) {
            match *route {
                Route::Skip => {}
                Route::Text(lane) => self.text[lane].push(field),
                Route::Numeric(lane) => {
                    let value = match coerce_numeric(&field) {
                        Ok(v) => v,
                        Err(e) => {
                            log::trace!("numeric lane {lane}: {field:?} is not a number ({e})");
                            self.invalid_numeric += 1;
                            f64::NAN
                        }
                    };
                    self.numeric[lane].push(value);
                }
            }
        }
    }

    /// Cells that failed numeric coercion and were stored as NaN.
    pub(crate) fn invalid_numeric(&self) -> u64 {
        self.invalid_numeric
    }
}

/// Coerce one raw field for a numeric lane; callers store `NaN` on `Err`.
pub(crate) fn coerce_numeric(raw: &str) -> Result<f64, NumberError> {
    parse_f64(raw)
}
