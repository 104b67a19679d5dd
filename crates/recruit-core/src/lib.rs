//! Core types and trait definitions for the recruitment tracker.
//!
//! This crate is deliberately free of HTTP, file and database dependencies.
//! Storage backends implement [`store::TableStore`]; the HTTP layer drives
//! [`recruiter::Recruiter`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod attachment;
pub mod error;
pub mod event;
pub mod import;
pub mod record;
pub mod recruiter;
pub mod row;
pub mod stage;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use recruiter::Recruiter;
pub use row::Row;
pub use table::Table;
