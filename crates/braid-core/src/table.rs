//! In-memory tables

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::grid::config::HorizontalLine;
use tabled::settings::Style;
use tracing::trace;

use crate::data::row::Row;
use crate::data::values::Value;
use crate::error::BraidError;
use crate::key::KeyData;

/// A schema describes the columns of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<String>,
}

impl TableSchema {
    /// Creates a schema from an ordered list of column names.
    ///
    /// # Error
    /// Returns an error if any column name appears more than once
    pub fn new<I, S>(columns: I) -> Result<Self, BraidError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = columns
            .into_iter()
            .map(|col| col.as_ref().to_string())
            .collect::<Vec<_>>();
        if let Some(dupe) = columns
            .iter()
            .enumerate()
            .find(|(idx, col)| columns[..*idx].contains(*col))
        {
            return Err(BraidError::DuplicateColumn(dupe.1.clone()));
        }
        Ok(Self { columns })
    }

    /// Gets the column names, in display order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Gets the number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Gets the index of a column.
    ///
    /// Returns `None` if not present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col == name)
    }

    /// Checks if this schema contains a column by name
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|col| col == name)
    }

    /// Gets the key data for a given row over the named columns.
    ///
    /// # Error
    /// Returns an error if any named column is absent from this schema
    pub fn key_data(&self, keys: &[String], row: &Row) -> Result<KeyData, BraidError> {
        let indices = self.key_indices(keys, "<anonymous>")?;
        Ok(KeyData::project(row, &indices))
    }

    pub(crate) fn key_indices(
        &self,
        keys: &[String],
        table: &str,
    ) -> Result<Vec<usize>, BraidError> {
        keys.iter()
            .map(|key| {
                self.column_index(key).ok_or_else(|| BraidError::SchemaMismatch {
                    column: key.clone(),
                    table: table.to_string(),
                })
            })
            .collect()
    }
}

/// A fully materialized table: a schema plus an ordered sequence of rows.
///
/// Every row has exactly one value per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: Option<String>,
    schema: TableSchema,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a new, empty table with the given schema
    pub fn new(schema: TableSchema) -> Self {
        Self {
            name: None,
            schema,
            rows: vec![],
        }
    }

    /// Creates a table from a schema and a set of rows
    pub fn from_rows<I>(schema: TableSchema, rows: I) -> Result<Self, BraidError>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut table = Self::new(schema);
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    /// Names this table.
    ///
    /// The name is used to disambiguate clashing column names after a join.
    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.name = Some(name.as_ref().to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Appends a row to this table.
    ///
    /// # Error
    /// Returns an error if the row's length disagrees with the schema
    pub fn push(&mut self, row: Row) -> Result<(), BraidError> {
        if row.len() != self.schema.len() {
            trace!("row {row:?} does not match columns {:?}", self.schema.columns());
            return Err(BraidError::MalformedRow {
                expected: self.schema.len(),
                actual: row.len(),
                record: self.rows.len() + 1,
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Gets the rows of this table, in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Gets the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Gets `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.schema.len())
    }

    /// Iterates over the values of a single column.
    ///
    /// # Error
    /// Returns an error if no such column exists
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value>, BraidError> {
        let index = self
            .schema
            .column_index(name)
            .ok_or_else(|| BraidError::UnknownColumn(name.to_string()))?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }

    /// Projects this table onto the named columns, in the given order.
    ///
    /// # Error
    /// Returns an error if any named column is absent
    pub fn select<I, S>(&self, columns: I) -> Result<Table, BraidError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = columns
            .into_iter()
            .map(|col| col.as_ref().to_string())
            .collect::<Vec<_>>();
        let indices = names
            .iter()
            .map(|name| {
                self.schema
                    .column_index(name)
                    .ok_or_else(|| BraidError::UnknownColumn(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schema = TableSchema::new(&names)?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect::<Row>());
        let mut selected = Table::from_rows(schema, rows)?;
        selected.name = self.name.clone();
        Ok(selected)
    }

    /// Gets a copy of the first `n` rows
    pub fn head(&self, n: usize) -> Table {
        Self {
            name: self.name.clone(),
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::new();
        builder.push_record(self.schema.columns().iter().map(|col| col.as_str()));

        for row in &self.rows {
            builder.push_record(row.iter().map(|v| v.to_string()));
        }

        let table = builder
            .build()
            .with(Style::ascii().remove_horizontal().horizontals([(
                1,
                HorizontalLine::new(Some('-'), Some('+'), Some('+'), Some('+')).into(),
            )]))
            .to_string();
        write!(f, "{table}")
    }
}
