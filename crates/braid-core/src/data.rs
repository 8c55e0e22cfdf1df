//! The values that tables hold

pub mod row;
pub mod values;
