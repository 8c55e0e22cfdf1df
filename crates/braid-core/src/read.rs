//! Reading delimited text into tables.
//!
//! The reader takes CSV by default; the delimiter, header handling, and
//! column naming are all configurable through [`ReadOptions`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, instrument};

use crate::data::row::Row;
use crate::data::values::Value;
use crate::error::BraidError;
use crate::table::{Table, TableSchema};

/// Reads a table from a comma-delimited file with a header row
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, BraidError> {
    ReadOptions::new().read_path(path)
}

/// Configuration for reading delimited text
#[derive(Debug, Clone)]
pub struct ReadOptions {
    delimiter: u8,
    has_headers: bool,
    column_names: Option<Vec<String>>,
    select: Option<Vec<String>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            column_names: None,
            select: None,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter (default `,`)
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the source starts with a header row (default true).
    ///
    /// Without a header row and without [`column_names`](Self::column_names),
    /// columns are named by their zero-based position.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Names the columns explicitly, overriding any header row
    pub fn column_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.column_names = Some(names.into_iter().map(|n| n.as_ref().to_string()).collect());
        self
    }

    /// Keeps only the named columns, in the given order
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.select = Some(columns.into_iter().map(|c| c.as_ref().to_string()).collect());
        self
    }

    /// Reads a table from a file, naming it after the file stem
    #[instrument(level = "debug", skip(self), fields(path = %path.as_ref().display()), err)]
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Table, BraidError> {
        let path = path.as_ref();
        let table = self.read_from(File::open(path)?)?;
        Ok(match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => table.with_name(stem),
            None => table,
        })
    }

    /// Reads a table from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Table, BraidError> {
        // ragged rows are surfaced as MalformedRow instead of a csv error
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut schema = match &self.column_names {
            Some(names) => Some(TableSchema::new(names)?),
            None if self.has_headers => {
                Some(TableSchema::new(reader.headers()?.iter())?)
            }
            None => None,
        };

        let mut rows = Vec::new();
        for (record_idx, result) in reader.records().enumerate() {
            let record = result?;
            let schema = schema.get_or_insert_with(|| {
                // headerless and unnamed: columns named by position
                TableSchema::new((0..record.len()).map(|idx| idx.to_string()))
                    .expect("positional names are unique")
            });
            if record.len() != schema.len() {
                return Err(BraidError::MalformedRow {
                    expected: schema.len(),
                    actual: record.len(),
                    record: record_idx + 1,
                });
            }
            rows.push(record.iter().map(parse_value).collect::<Row>());
        }

        let schema = match schema {
            Some(schema) => schema,
            // no rows and no names: an empty table with no columns
            None => TableSchema::new::<_, &str>([])?,
        };
        debug!("read {} rows over {} columns", rows.len(), schema.len());

        let table = Table::from_rows(schema, rows)?;
        match &self.select {
            Some(columns) => table.select(columns),
            None => Ok(table),
        }
    }
}

/// Types a raw field: empty fields are null, then integers, floats, and
/// booleans, falling back to a string
fn parse_value(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = field.parse::<i64>() {
        return Value::Integer(int);
    }
    if let Ok(float) = field.parse::<f64>() {
        return Value::Float(float);
    }
    match field {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => Value::String(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::data::values::Value;
    use crate::error::BraidError;
    use crate::read::{parse_value, ReadOptions};

    #[test]
    fn type_fields() {
        assert_eq!(parse_value(""), Value::Null);
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("4.5"), Value::Float(4.5));
        assert_eq!(parse_value("true"), Value::Boolean(true));
        assert_eq!(parse_value("green"), Value::String("green".to_string()));
    }

    #[test]
    fn read_with_header() {
        let table = ReadOptions::new()
            .read_from("color,num\ngreen,1\nyellow,2\n".as_bytes())
            .unwrap();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.schema().columns(), &["color", "num"]);
        assert_eq!(table.rows()[0][1], Value::Integer(1));
    }

    #[test]
    fn read_headerless_with_names() {
        let table = ReadOptions::new()
            .delimiter(b'|')
            .has_headers(false)
            .column_names(["movie_id", "title"])
            .read_from("1|Toy Story\n2|GoldenEye\n".as_bytes())
            .unwrap();
        assert_eq!(table.schema().columns(), &["movie_id", "title"]);
        assert_eq!(table.rows()[1][1], Value::from("GoldenEye"));
    }

    #[test]
    fn read_headerless_positional_names() {
        let table = ReadOptions::new()
            .has_headers(false)
            .read_from("1,2\n3,4\n".as_bytes())
            .unwrap();
        assert_eq!(table.schema().columns(), &["0", "1"]);
    }

    #[test]
    fn select_subset() {
        let table = ReadOptions::new()
            .select(["num"])
            .read_from("color,num\ngreen,1\n".as_bytes())
            .unwrap();
        assert_eq!(table.schema().columns(), &["num"]);
        assert_eq!(table.shape(), (1, 1));
    }

    #[test]
    fn ragged_row_is_malformed() {
        let err = ReadOptions::new()
            .read_from("color,num\ngreen,1\nyellow\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            BraidError::MalformedRow {
                expected: 2,
                actual: 1,
                record: 2
            }
        ));
    }

    #[test]
    fn empty_fields_are_null() {
        let table = ReadOptions::new()
            .read_from("color,num\ngreen,\n".as_bytes())
            .unwrap();
        assert_eq!(table.rows()[0][1], Value::Null);
    }
}
