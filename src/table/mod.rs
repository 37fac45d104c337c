//! Input tables: the in-memory model, its JSON form and numeric column selection.

/// JSON loading.
pub mod json;
/// Table, index and column types.
pub mod model;
/// Numeric column selection.
pub mod select;
