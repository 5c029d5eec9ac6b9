//! Shared types used across the management service crates.

mod types;

pub use types::{RecordId, SortDirection};
