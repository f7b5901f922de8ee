//! Package sources.
//!
//! Turns a manifest location into a populated [`Package`](crate::core::Package).

pub mod path;

pub use path::{ingest, Ingested, PathSource};
