//! # braid-core
//!
//! In-memory tables, delimited-text reading, and pandas-style merge joins.

pub mod data;
pub mod error;
pub mod join;
pub mod key;
pub mod read;
pub mod table;

pub use crate::data::row::Row;
pub use crate::data::values::Value;
pub use crate::error::BraidError;
pub use crate::join::{join, Join, JoinKind};
pub use crate::read::{read_table, ReadOptions};
pub use crate::table::{Table, TableSchema};
