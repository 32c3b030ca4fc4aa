//! Core orchestration for agent-scaffold
//!
//! Ties the manifest, the target generators and the filesystem together:
//!
//! - [`sync`]: plan and apply a sync, including pruning of stale outputs
//! - [`record`]: the generated-file record persisted between runs
//! - [`doctor`]: read-only consistency checks

pub mod doctor;
pub mod error;
pub mod record;
pub mod sync;

pub use doctor::{CheckResult, Doctor, DoctorReport};
pub use error::{Error, Result};
pub use record::{GeneratedRecord, RECORD_PATH, RECORD_VERSION};
pub use sync::{PlannedWrite, SyncEngine, SyncOptions, SyncPlan, SyncReport, WriteAction};
