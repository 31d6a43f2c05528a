//! Request handlers. Each handler delegates to the query pipeline in
//! `autolist_core` and maps failures via [`AppError`](crate::error::AppError).

pub mod automations;
pub mod health;
