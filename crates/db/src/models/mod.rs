//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the (joined) row
//! - A `Deserialize` create DTO whose fields are all optional, plus the
//!   validated insert struct it converts into
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates

pub mod category;
pub mod event;
pub mod place;
