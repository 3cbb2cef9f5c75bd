//! Weapon catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use weapon_core::WeaponConfig;

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponConfig>,
}

impl WeaponCatalog {
    /// Looks a weapon up by name (ASCII case-insensitive).
    pub fn find(&self, name: &str) -> Option<&WeaponConfig> {
        self.weapons
            .iter()
            .find(|weapon| weapon.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.iter().map(|weapon| weapon.name.as_str())
    }
}

/// Loader for weapon catalogs from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load a weapon catalog from a RON file.
    ///
    /// Every entry is validated; the first invalid weapon fails the whole
    /// catalog. Duplicate names are rejected.
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        let catalog: WeaponCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        for (index, weapon) in catalog.weapons.iter().enumerate() {
            weapon.validate().map_err(|e| {
                anyhow::anyhow!("Invalid weapon '{}' (entry {}): {}", weapon.name, index, e)
            })?;

            let duplicate = catalog.weapons[..index]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&weapon.name));
            if duplicate {
                anyhow::bail!("Duplicate weapon name '{}'", weapon.name);
            }
        }

        tracing::debug!(
            "loaded {} weapons from {}",
            catalog.weapons.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load a catalog and pick one weapon from it by name.
    pub fn load_one(path: &Path, name: &str) -> LoadResult<WeaponConfig> {
        let catalog = Self::load(path)?;
        catalog.find(name).cloned().ok_or_else(|| {
            let known: Vec<_> = catalog.names().collect();
            anyhow::anyhow!(
                "Weapon '{}' not found in {} (known: {})",
                name,
                path.display(),
                known.join(", ")
            )
        })
    }
}
