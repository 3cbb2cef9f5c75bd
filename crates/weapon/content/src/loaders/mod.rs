//! Content loaders for reading weapon data from files.
//!
//! Each loader reads one RON or TOML file into weapon-core types.

pub mod cadence;
pub mod script;
pub mod weapons;

pub use cadence::CadenceLoader;
pub use script::ScriptLoader;
pub use weapons::{WeaponCatalog, WeaponLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
