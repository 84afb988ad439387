//! # memosource
//!
//! Value sources consulted by a memoizing cache on a miss.
//!
//! ## Sources
//! - **HashedSource**: string to its standard 32-bit hash, in memory
//! - **WebProbeSource**: URL to the HTTP status it answers with, `-1` on failure
//!
//! Both count every invocation so callers can check how often the cache
//! in front of them actually missed.

#![warn(missing_docs)]

mod error;
mod hashed;
mod parser;
mod source;
mod web;

pub use error::{Result, SourceError};
pub use hashed::{string_hash, HashedSource};
pub use parser::{classify_url, ProbeTarget, Scheme};
pub use source::ValueSource;
pub use web::{ProbeConfig, WebProbeSource, PROBE_FAILED};
