//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&mut SqliteConnection` as the first argument. Handlers pass either a
//! pooled connection or an open transaction, so several calls can share one
//! transaction and roll back together.

mod listing;

pub mod category_repo;
pub mod event_repo;
pub mod place_repo;

pub use category_repo::CategoryRepo;
pub use event_repo::EventRepo;
pub use place_repo::PlaceRepo;
