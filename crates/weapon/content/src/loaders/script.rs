//! Intent script loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::script::IntentScript;

/// Loader for scripted intent timelines from RON files.
pub struct ScriptLoader;

impl ScriptLoader {
    /// Load an intent script from a RON file.
    ///
    /// Steps may appear in any order; they are sorted by start time.
    pub fn load(path: &Path) -> LoadResult<IntentScript> {
        let content = read_file(path)?;
        let mut script: IntentScript = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse intent script RON: {}", e))?;

        if let Some(step) = script.steps.iter().find(|step| !step.at.is_finite() || step.at < 0.0) {
            anyhow::bail!("Script step starts at invalid time {}", step.at);
        }
        script.sort();
        Ok(script)
    }
}
