//! Record sources backing the automation listing.
//!
//! [`JsonFileSource`] re-reads a JSON snapshot on every query;
//! [`MemorySource`] serves a fixed collection (fixtures, tests, demos).

pub mod error;
pub mod json_file;
pub mod memory;

pub use error::DbError;
pub use json_file::{health_check, JsonFileSource};
pub use memory::MemorySource;
