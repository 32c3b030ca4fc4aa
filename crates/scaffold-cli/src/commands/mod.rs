//! Command implementations for scaffold-cli

pub mod diff;
pub mod doctor;
pub mod init;
pub mod sync;

use std::path::Path;

use scaffold_fs::NormalizedPath;

use crate::error::{CliError, Result};

pub use diff::run_diff;
pub use doctor::run_doctor;
pub use init::run_init;
pub use sync::run_sync;

/// Canonicalize the `--root` argument.
///
/// `dunce` keeps Windows paths free of the `\\?\` prefix.
pub fn resolve_root(path: &Path) -> Result<NormalizedPath> {
    let canonical = dunce::canonicalize(path).map_err(|e| {
        CliError::user(format!("Cannot use {} as the repository root: {e}", path.display()))
    })?;
    if !canonical.is_dir() {
        return Err(CliError::user(format!(
            "Repository root {} is not a directory",
            canonical.display()
        )));
    }
    Ok(NormalizedPath::new(canonical))
}
