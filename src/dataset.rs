// CSV datasets.
// Reads and writes rows as header-keyed records and builds a columnar view of them.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use indexmap::IndexMap;

use crate::error::{MineError, Result};

/// One CSV row: field name to value, in header order.
pub type Record = IndexMap<String, String>;

/// Column name to one value per record (`None` where a record lacks the field).
pub type Columns = IndexMap<String, Vec<Option<String>>>;

/// CSV flavours, named after the dialects spreadsheet tools export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvDialect {
    /// Comma separated, CRLF line endings, minimal quoting.
    #[default]
    Excel,
    /// Tab separated, CRLF line endings.
    ExcelTab,
    /// Comma separated, LF line endings, every field quoted.
    Unix,
}

impl CsvDialect {
    fn delimiter(self) -> u8 {
        match self {
            CsvDialect::ExcelTab => b'\t',
            CsvDialect::Excel | CsvDialect::Unix => b',',
        }
    }

    fn reader(self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.delimiter(self.delimiter()).flexible(true);
        builder
    }

    fn writer(self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder.delimiter(self.delimiter());
        match self {
            CsvDialect::Excel | CsvDialect::ExcelTab => {
                builder.terminator(Terminator::CRLF);
            }
            CsvDialect::Unix => {
                builder
                    .terminator(Terminator::Any(b'\n'))
                    .quote_style(QuoteStyle::Always);
            }
        }
        builder
    }
}

/// Load a CSV file, keying each row by the header row.
pub fn load_csv(path: &Path, dialect: CsvDialect) -> Result<Vec<Record>> {
    read_csv(File::open(path)?, dialect)
}

/// Read CSV rows from any reader. Short rows yield records without the trailing fields.
pub fn read_csv<R: Read>(input: R, dialect: CsvDialect) -> Result<Vec<Record>> {
    let mut reader = dialect.reader().from_reader(input);
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|row| -> Result<Record> {
            let row = row?;
            Ok(headers
                .iter()
                .zip(row.iter())
                .map(|(field, value)| (field.to_string(), value.to_string()))
                .collect())
        })
        .collect()
}

/// Save records as an Excel-dialect CSV file.
///
/// Without an explicit header the first record's field order is used.
pub fn save_csv(path: &Path, records: &[Record], header: Option<&[String]>) -> Result<()> {
    write_csv(File::create(path)?, records, header, CsvDialect::Excel)
}

/// Write records to any writer. Fields missing from a record are written empty.
pub fn write_csv<W: Write>(
    output: W,
    records: &[Record],
    header: Option<&[String]>,
    dialect: CsvDialect,
) -> Result<()> {
    let header: Vec<String> = match header {
        Some(header) => header.to_vec(),
        None => records
            .first()
            .ok_or(MineError::EmptyDataset)?
            .keys()
            .cloned()
            .collect(),
    };

    let mut writer = dialect.writer().from_writer(output);
    writer.write_record(&header)?;

    for record in records {
        if let Some(extra) = record.keys().find(|key| !header.contains(key)) {
            return Err(MineError::UnknownField(extra.clone()));
        }
        writer.write_record(
            header
                .iter()
                .map(|field| record.get(field).map(String::as_str).unwrap_or("")),
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Columnar view of `records`. Columns are the union of all fields, in first-seen order.
pub fn to_columns(records: &[Record]) -> Columns {
    let mut columns = Columns::new();
    for record in records {
        for field in record.keys() {
            if !columns.contains_key(field) {
                columns.insert(field.clone(), Vec::with_capacity(records.len()));
            }
        }
    }

    for record in records {
        for (field, values) in columns.iter_mut() {
            values.push(record.get(field).cloned());
        }
    }
    columns
}
