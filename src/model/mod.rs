//! Data model for parsed tables and cell classification

mod classify;
mod table;

pub use classify::{classify, is_numeric, CellKind, ClassifiedCell, NumberPolicy, MAX_NUMERIC_LEN};
pub use table::{Row, Table};
