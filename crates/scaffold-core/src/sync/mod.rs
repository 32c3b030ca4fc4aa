//! Sync orchestration
//!
//! Plans and applies regeneration of every enabled target's outputs.

mod engine;
mod plan;
mod report;

pub use engine::SyncEngine;
pub use plan::{PlannedWrite, SyncPlan, WriteAction};
pub use report::{SyncOptions, SyncReport};
