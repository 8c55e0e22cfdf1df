//! Merging two tables on shared key columns.
//!
//! A merge is an equi-join: rows pair up when their projections onto the key
//! columns are equal. The key columns default to every column name the two
//! tables share.

use indexmap::IndexMap;
use itertools::Itertools;
use strum::{Display, EnumString};
use tracing::{debug, instrument, trace, Level};

use crate::data::row::Row;
use crate::data::values::Value;
use crate::error::BraidError;
use crate::key::KeyData;
use crate::table::{Table, TableSchema};

/// Which unmatched rows are retained by a join
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum JoinKind {
    /// Only rows whose key appears in both tables
    Inner,
    /// Rows whose key appears in either table
    Outer,
    /// All rows of the left table
    Left,
    /// All rows of the right table
    Right,
}

/// Joins two tables on the columns they share.
///
/// See [`Join`] for explicit key selection and the ordering contract.
pub fn join(left: &Table, right: &Table, kind: JoinKind) -> Result<Table, BraidError> {
    Join::new(left, right).kind(kind).run()
}

/// A join of two tables, built up before running.
///
/// ```
/// use braid_core::data::row::Row;
/// use braid_core::join::{Join, JoinKind};
/// use braid_core::table::{Table, TableSchema};
///
/// # fn main() -> Result<(), braid_core::error::BraidError> {
/// let a = Table::from_rows(
///     TableSchema::new(["color", "num"])?,
///     [Row::from(["green", "1"]), Row::from(["yellow", "2"])],
/// )?;
/// let b = Table::from_rows(
///     TableSchema::new(["color", "size"])?,
///     [Row::from(["green", "S"]), Row::from(["pink", "L"])],
/// )?;
/// let merged = Join::new(&a, &b).on(["color"]).kind(JoinKind::Inner).run()?;
/// assert_eq!(merged.shape(), (1, 3));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Join<'t> {
    left: &'t Table,
    right: &'t Table,
    keys: Option<Vec<String>>,
    kind: JoinKind,
}

impl<'t> Join<'t> {
    /// Creates a new inner join of two tables, keyed on their common columns
    pub fn new(left: &'t Table, right: &'t Table) -> Self {
        Self {
            left,
            right,
            keys: None,
            kind: JoinKind::Inner,
        }
    }

    /// Joins on the given key columns instead of the common columns
    pub fn on<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keys = Some(keys.into_iter().map(|k| k.as_ref().to_string()).collect());
        self
    }

    /// Sets the join kind
    pub fn kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Runs the join.
    ///
    /// The output schema is the key columns once, then the left table's
    /// remaining columns, then the right table's. A non-key column name
    /// present on both sides is prefixed with its table's name.
    ///
    /// Output ordering is part of the contract: matched and left-only rows
    /// come out in left-table order, with every right match of one left row
    /// emitted together in right-table order; unmatched right rows (outer and
    /// right joins) are appended after, in right-table order.
    #[instrument(level = Level::TRACE, skip_all, fields(kind = %self.kind), err)]
    pub fn run(self) -> Result<Table, BraidError> {
        let Join {
            left,
            right,
            keys,
            kind,
        } = self;
        let left_name = left.name().unwrap_or("left");
        let right_name = right.name().unwrap_or("right");

        let keys = match keys {
            Some(keys) if keys.is_empty() => return Err(BraidError::EmptyKeySet),
            Some(keys) => keys,
            None => {
                let common = left
                    .schema()
                    .columns()
                    .iter()
                    .filter(|col| right.schema().contains_column(col))
                    .cloned()
                    .collect::<Vec<_>>();
                if common.is_empty() {
                    return Err(BraidError::EmptyKeySet);
                }
                common
            }
        };
        trace!("joining {left_name} with {right_name} on [{}]", keys.iter().join(", "));

        let left_key = left.schema().key_indices(&keys, left_name)?;
        let right_key = right.schema().key_indices(&keys, right_name)?;
        let left_rest = rest_indices(left.schema(), &left_key);
        let right_rest = rest_indices(right.schema(), &right_key);

        let schema = joined_schema(
            &keys,
            (left.schema(), &left_rest, left_name),
            (right.schema(), &right_rest, right_name),
        )?;

        // build side: group right rows by key projection. Duplicate keys are
        // legal and every row under a key must be matched
        let mut groups: IndexMap<KeyData, Vec<usize>> = IndexMap::new();
        for (idx, row) in right.rows().iter().enumerate() {
            groups
                .entry(KeyData::project(row, &right_key))
                .or_default()
                .push(idx);
        }
        debug!(
            "grouped {} right rows under {} distinct keys",
            right.len(),
            groups.len()
        );

        let mut matched_right = vec![false; right.len()];
        let mut rows = Vec::new();

        // probe side: scan left in order
        for left_row in left.rows() {
            match groups.get(&KeyData::project(left_row, &left_key)) {
                Some(indices) => {
                    for &idx in indices {
                        matched_right[idx] = true;
                        rows.push(combine(
                            left_row,
                            &left_key,
                            &left_rest,
                            Some((&right.rows()[idx], &right_rest)),
                            right_rest.len(),
                        ));
                    }
                }
                None if matches!(kind, JoinKind::Left | JoinKind::Outer) => {
                    rows.push(combine(
                        left_row,
                        &left_key,
                        &left_rest,
                        None,
                        right_rest.len(),
                    ));
                }
                None => {}
            }
        }

        if matches!(kind, JoinKind::Right | JoinKind::Outer) {
            for (idx, right_row) in right.rows().iter().enumerate() {
                if matched_right[idx] {
                    continue;
                }
                let values = right_key
                    .iter()
                    .map(|&key_idx| right_row[key_idx].clone())
                    .chain(left_rest.iter().map(|_| Value::Null))
                    .chain(right_rest.iter().map(|&rest_idx| right_row[rest_idx].clone()))
                    .collect::<Row>();
                rows.push(values);
            }
        }

        debug!("join produced {} rows over {} columns", rows.len(), schema.len());
        Table::from_rows(schema, rows)
    }
}

/// Column indices not used by the key, in schema order
fn rest_indices(schema: &TableSchema, key: &[usize]) -> Vec<usize> {
    (0..schema.len()).filter(|idx| !key.contains(idx)).collect()
}

/// Builds the output schema: shared keys once, then each side's remaining
/// columns, prefixing names that appear on both sides
fn joined_schema(
    keys: &[String],
    (left, left_rest, left_name): (&TableSchema, &[usize], &str),
    (right, right_rest, right_name): (&TableSchema, &[usize], &str),
) -> Result<TableSchema, BraidError> {
    let left_cols = left_rest
        .iter()
        .map(|&idx| left.columns()[idx].as_str())
        .collect::<Vec<_>>();
    let right_cols = right_rest
        .iter()
        .map(|&idx| right.columns()[idx].as_str())
        .collect::<Vec<_>>();

    let mut columns = keys.to_vec();
    for &col in &left_cols {
        if right_cols.contains(&col) {
            columns.push(format!("{left_name}.{col}"));
        } else {
            columns.push(col.to_string());
        }
    }
    for &col in &right_cols {
        if left_cols.contains(&col) {
            columns.push(format!("{right_name}.{col}"));
        } else {
            columns.push(col.to_string());
        }
    }
    TableSchema::new(columns)
}

/// Emits one output row: key values from the left row, the left row's other
/// columns, then the right row's other columns or nulls when unmatched
fn combine(
    left_row: &Row,
    left_key: &[usize],
    left_rest: &[usize],
    right: Option<(&Row, &[usize])>,
    right_width: usize,
) -> Row {
    let right_values: Box<dyn Iterator<Item = Value>> = match right {
        Some((right_row, right_rest)) => Box::new(
            right_rest
                .iter()
                .map(|&idx| right_row[idx].clone())
                .collect::<Vec<_>>()
                .into_iter(),
        ),
        None => Box::new(std::iter::repeat(Value::Null).take(right_width)),
    };

    left_key
        .iter()
        .chain(left_rest.iter())
        .map(|&idx| left_row[idx].clone())
        .chain(right_values)
        .collect()
}
