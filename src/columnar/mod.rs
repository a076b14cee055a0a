//! Columnar primitives: `Scalar`, `ChunkedArray`, `Schema`, `Table`.
//!
//! Wraps `polars` (itself Arrow-backed) rather than re-implementing a
//! columnar layer.

mod array;
mod scalar;
mod schema;
mod table;

pub use array::ChunkedArray;
pub use scalar::Scalar;
pub use schema::{DataType, Field, Schema};
pub use table::{make_empty_table, make_null_table, Table};
