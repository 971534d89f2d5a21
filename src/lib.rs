//! Airlock - Offline-First Request Router
//!
//! Intercepts GET requests, classifies them by URL pattern, and serves
//! them through versioned cache partitions using network-first or
//! cache-first strategies with a single fallback to the opposite source.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod router;
pub mod store;

pub use error::{AirlockError, AirlockResult};
pub use router::Router;
