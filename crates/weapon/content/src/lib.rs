//! Data-driven weapon content and loaders.
//!
//! This crate houses the on-disk formats a host needs to drive weapons:
//! - Weapon catalogs (data-driven via RON)
//! - Host cadence settings (data-driven via TOML)
//! - Scripted intent timelines for headless runs (data-driven via RON)
//!
//! All loaders deserialize weapon-core types directly with serde and validate
//! them before handing them out.

pub mod script;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use script::{IntentScript, ScriptStep};

#[cfg(feature = "loaders")]
pub use loaders::{CadenceLoader, LoadResult, ScriptLoader, WeaponCatalog, WeaponLoader};
