//! Shared test utilities for the agent-scaffold workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixture`]: a manifest declaring every artifact kind and every target kind
//! - [`project`]: [`TestProject`] builder for on-disk repository scenarios

pub mod fixture;
pub mod project;

pub use project::TestProject;
