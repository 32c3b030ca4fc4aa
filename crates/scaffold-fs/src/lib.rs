//! Filesystem helpers for agent-scaffold
//!
//! Provides repository-relative path handling, atomic text I/O and a
//! format-agnostic document store for YAML and JSON files.

pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{DocumentStore, Format};
