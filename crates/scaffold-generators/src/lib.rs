//! Target generators for agent-scaffold.
//!
//! Every consumer target kind has one [`Generator`] implementation:
//!
//! - [`OpenCodeGenerator`] writes `opencode.json` and the `AGENTS.md` rules index
//! - [`CopilotGenerator`] writes pointer files under `.github/` for both the
//!   VS Code and the CLI surface
//!
//! Generators only describe and render outputs. Writing, diffing and pruning
//! belong to the sync engine in `scaffold-core`. Rendered content never
//! includes canonical file bodies, only their paths and manifest metadata.

pub mod copilot;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod markdown;
pub mod opencode;

pub use copilot::CopilotGenerator;
pub use dispatcher::generator_for;
pub use error::{Error, Result};
pub use generator::{Aggregate, GeneratedFile, Generator, OutputDescriptor, OutputKey, Template};
pub use markdown::{BANNER, BANNER_TEXT, has_banner};
pub use opencode::OpenCodeGenerator;
