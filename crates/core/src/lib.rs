//! Core domain types for the vanity address generation client.
//!
//! Pure types and logic shared by the client library and CLI: the request
//! and result shapes exchanged with the generation server, job status
//! classification, and pattern helpers. No I/O lives here.

pub mod error;
pub mod pattern;
pub mod status;
pub mod types;

pub use error::CoreError;
