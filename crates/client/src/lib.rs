//! HTTP client library for the vanity address generation service.
//!
//! Wraps the server's asynchronous job protocol: submit a search request,
//! receive a job identifier, poll status at a fixed interval until a
//! terminal state, and extract the resulting key material. Progress is
//! surfaced on a broadcast [`JobEvent`] channel instead of being printed,
//! so embedding callers can route updates to any sink.

pub mod api;
pub mod error;
pub mod events;
pub mod generator;
pub mod poller;

pub use api::GeneratorApi;
pub use error::ClientError;
pub use events::JobEvent;
pub use generator::Generator;
pub use poller::{poll_job, PollConfig};
