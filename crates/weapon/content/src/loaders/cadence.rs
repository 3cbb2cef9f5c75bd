//! Host cadence loader.

use std::path::Path;

use weapon_core::CadenceConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for frame/tick rates from TOML files.
pub struct CadenceLoader;

impl CadenceLoader {
    /// Load cadence settings from a TOML file.
    ///
    /// Missing keys fall back to [`CadenceConfig::default`]; zero rates are
    /// rejected.
    pub fn load(path: &Path) -> LoadResult<CadenceConfig> {
        let content = read_file(path)?;
        let cadence: CadenceConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse cadence TOML: {}", e))?;

        if cadence.tick_rate == 0 || cadence.frame_rate == 0 {
            anyhow::bail!(
                "Cadence rates must be positive (tick_rate = {}, frame_rate = {})",
                cadence.tick_rate,
                cadence.frame_rate
            );
        }
        Ok(cadence)
    }
}
