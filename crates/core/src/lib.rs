//! Automation listing core.
//!
//! The query pipeline (normalize, filter, sort, paginate) and the record
//! model it operates on. This crate performs no I/O of its own: records come
//! in through the [`pipeline::RecordSource`] port.

pub mod automation;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod pipeline;
pub mod query;
pub mod sort;
pub mod types;
