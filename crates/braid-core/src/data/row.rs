//! A row of data

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};
use std::slice::SliceIndex;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::data::values::Value;

/// A row of data
#[derive(Clone, PartialEq, Eq, PartialOrd, Hash)]
pub struct Row(Box<[Value]>);

impl Row {
    /// Creates a new row of a given length.
    ///
    /// All entries are initialized to Null
    pub fn new(len: usize) -> Self {
        Self::from(vec![Value::Null; len])
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Gets a slice of the data
    pub fn slice<I>(&self, range: I) -> Row
    where
        I: SliceIndex<[Value], Output = [Value]>,
    {
        Self::from(self.0[range].to_vec())
    }

    /// Joins two rows together
    pub fn join(&self, other: &Row) -> Row {
        Self::from_iter(self.iter().chain(other.iter()).cloned())
    }

    /// Iterator over a row
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.0.iter_mut()
    }

    /// Gets the length of the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RowVisitor)
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(None)?;
        for val in self.iter() {
            seq.serialize_element(val)?;
        }
        seq.end()
    }
}

/// Writes a row to a formatter
pub fn write_row(writer: &mut Formatter, row: &Row) -> fmt::Result {
    let mut list = writer.debug_list();
    for value in row {
        list.entry(value);
    }
    list.finish()
}

impl Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_row(f, self)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "a valid row")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut vec = vec![];
        while let Some(ele) = seq.next_element::<Value>()? {
            vec.push(ele)
        }
        Ok(Row::from(vec))
    }
}

impl From<Vec<Value>> for Row {
    fn from(value: Vec<Value>) -> Self {
        Self(value.into_boxed_slice())
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Row {
    fn from(value: [V; N]) -> Self {
        Self::from(
            value
                .into_iter()
                .map(|value| value.into())
                .collect::<Vec<_>>(),
        )
    }
}

impl From<Box<[Value]>> for Row {
    fn from(value: Box<[Value]>) -> Self {
        Self(value)
    }
}

impl<T: Into<Value>> FromIterator<T> for Row {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|v| v.into())
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        )
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Row {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::data::row::Row;
    use crate::data::values::Value;

    #[test]
    fn slice_row() {
        let row = Row::new(5);
        let slice = row.slice(1..=3);
        assert_eq!(slice, Row::new(3));
    }

    #[test]
    fn join_rows() {
        let left = Row::from([Value::Integer(1), Value::Integer(2)]);
        let right = Row::from(["a"]);
        let joined = left.join(&right);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined[2], Value::from("a"));
    }

    #[test]
    fn deserialize_row() {
        let json = r#"[1, 2, 3, 4, null]"#;
        let as_row: Row = serde_json::from_str(json).expect("could not deserialize");
        assert_eq!(
            as_row,
            Row::from([
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3),
                Value::Integer(4),
                Value::Null
            ])
        )
    }
}
