use crate::data::row::Row;
use std::cmp::Ordering;
use std::ops::Deref;

/// The projection of a row onto a set of key columns.
///
/// Keys are always order-able and hashable
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub struct KeyData(Row);

impl KeyData {
    /// Projects a row onto the columns at the given indices
    pub fn project(row: &Row, indices: &[usize]) -> Self {
        KeyData(indices.iter().map(|&idx| row[idx].clone()).collect())
    }
}

impl Ord for KeyData {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).expect("could not compare keys")
    }
}

impl Deref for KeyData {
    type Target = Row;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> From<T> for KeyData
where
    Row: From<T>,
{
    fn from(value: T) -> Self {
        KeyData(Row::from(value))
    }
}

impl AsRef<Row> for KeyData {
    fn as_ref(&self) -> &Row {
        &self.0
    }
}

impl IntoIterator for KeyData {
    type Item = crate::data::values::Value;
    type IntoIter = <Row as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
