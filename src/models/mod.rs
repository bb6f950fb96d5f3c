pub mod column;
pub mod delta;
pub mod row;
pub mod table;

pub use column::{ColumnDefinition, ColumnType};
pub use delta::{Delta, Verb};
pub use row::{Row, RowKind};
pub use table::Table;
