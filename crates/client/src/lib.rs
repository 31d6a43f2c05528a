//! Client side of the automation listing.
//!
//! Keeps the listing query mirrored in a navigable URL ([`url_state`]),
//! talks to the listing endpoint ([`gateway`]), and tracks what the table
//! should show ([`listing`], [`filter_options`], [`columns`]).

pub mod columns;
pub mod config;
pub mod error;
pub mod filter_options;
pub mod gateway;
pub mod listing;
pub mod url_state;
