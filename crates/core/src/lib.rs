//! Domain building blocks shared by the database layer, the HTTP API and the
//! import tool. Nothing in here performs I/O.

pub mod category_tree;
pub mod datetime;
pub mod error;
pub mod listing;
pub mod types;
pub mod validation;
