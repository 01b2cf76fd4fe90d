use std::io::Read;

use csv::ByteRecord;

use crate::config::{CsvOptions, CsvTextEncoding};
use crate::error::LoadError;

/// Tokenized view of a header-delimited text stream.
///
/// The header is pulled once with [`RecordSource::next_header`]; every later record must
/// have the same number of fields as the header. Errors are fatal to the load.
pub trait RecordSource {
    fn next_header(&mut self) -> Result<Option<Vec<String>>, LoadError>;

    /// Pull the next record, or `None` at end of stream.
    fn next_record(&mut self) -> Result<Option<Vec<String>>, LoadError>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn next_header(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        (**self).next_header()
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        (**self).next_record()
    }
}

// Excel-exported files often start with one.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// [`RecordSource`] backed by the `csv` crate.
#[derive(Debug)]
pub struct CsvRecordSource<R> {
    reader: csv::Reader<R>,
    record: ByteRecord,
    record_index: u64,
    encoding: CsvTextEncoding,
}

impl<R: Read> CsvRecordSource<R> {
    pub fn new(reader: R, options: &CsvOptions) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            // The header is read through `next_header` so row numbers stay 1-based over the file.
            .has_headers(false)
            // Records must match the header width; the reader reports the mismatch.
            .flexible(false)
            .from_reader(reader);

        Self {
            reader,
            record: ByteRecord::new(),
            record_index: 0,
            encoding: options.encoding,
        }
    }

    fn read_next(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        let next_row = self.record_index + 1;
        self.record.clear();
        let has_record = self
            .reader
            .read_byte_record(&mut self.record)
            .map_err(|e| csv_error(e, next_row))?;
        if !has_record {
            return Ok(None);
        }
        self.record_index = next_row;

        let encoding = self.encoding;
        let mut fields = Vec::with_capacity(self.record.len());
        for (idx, raw) in self.record.iter().enumerate() {
            let raw = match (next_row, idx) {
                (1, 0) => raw.strip_prefix(UTF8_BOM).unwrap_or(raw),
                _ => raw,
            };
            let field = encoding.decode(raw).map_err(|e| LoadError::Parse {
                row: next_row,
                column: idx as u64 + 1,
                reason: format!("invalid UTF-8: {e}"),
            })?;
            fields.push(field.into_owned());
        }
        Ok(Some(fields))
    }
}

impl<R: Read> RecordSource for CsvRecordSource<R> {
    fn next_header(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        self.read_next()
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        self.read_next()
    }
}

/// [`RecordSource`] over rows that were tokenized elsewhere. The first row is the header.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecordSource {
    rows: std::vec::IntoIter<Vec<String>>,
    width: Option<usize>,
    record_index: u64,
}

impl MemoryRecordSource {
    pub fn from_rows<I, Row, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
        Row: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self {
            rows: rows.into_iter(),
            width: None,
            record_index: 0,
        }
    }
}

impl RecordSource for MemoryRecordSource {
    fn next_header(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        let header = self.rows.next();
        if let Some(header) = &header {
            self.record_index += 1;
            self.width = Some(header.len());
        }
        Ok(header)
    }

    fn next_record(&mut self) -> Result<Option<Vec<String>>, LoadError> {
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };
        self.record_index += 1;
        match self.width {
            Some(width) if width != row.len() => Err(LoadError::Parse {
                row: self.record_index,
                column: 0,
                reason: format!("expected {width} fields, found {}", row.len()),
            }),
            _ => Ok(Some(row)),
        }
    }
}

fn csv_error(err: csv::Error, next_row: u64) -> LoadError {
    // `csv` counts records from 0.
    let row = err.position().map_or(next_row, |pos| pos.record() + 1);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Io(e),
        _ => LoadError::Parse {
            row,
            column: 0,
            reason,
        },
    }
}
