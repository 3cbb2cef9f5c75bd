//! Simulation settings read from the process environment.
use std::env;
use std::path::PathBuf;

/// Directory holding the bundled catalog, cadence and script files.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../weapon/content/data");

/// Configuration for one headless weapon run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub catalog: PathBuf,
    pub weapon: String,
    pub script: PathBuf,
    pub cadence: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    /// Simulated seconds.
    pub duration: f32,
    /// Rounds stored for the simulated item before equip.
    pub initial_ammo: Option<u32>,
    /// Locomotion state reported for the whole run.
    pub locomotion: Option<u32>,
}

impl SimConfig {
    pub const DEFAULT_WEAPON: &'static str = "rifle";
    pub const DEFAULT_DURATION: f32 = 8.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WEAPON_CATALOG` - Weapon catalog RON file (default: bundled catalog)
    /// - `WEAPON_NAME` - Weapon to simulate (default: rifle)
    /// - `WEAPON_SCRIPT` - Intent script RON file (default: bundled burst script)
    /// - `WEAPON_CADENCE` - Cadence TOML file (default: built-in rates)
    /// - `WEAPON_SIM_LOG_DIR` - Also write logs to this directory (default: stderr only)
    /// - `WEAPON_SIM_DURATION` - Simulated seconds (default: 8)
    /// - `WEAPON_SIM_AMMO` - Rounds stored for the item before equip (default: full)
    /// - `WEAPON_SIM_LOCOMOTION` - Locomotion state tag for the run (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SimConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("WEAPON_CATALOG") {
            config.catalog = PathBuf::from(path);
        }
        if let Some(name) = lookup("WEAPON_NAME") {
            config.weapon = name;
        }
        if let Some(path) = lookup("WEAPON_SCRIPT") {
            config.script = PathBuf::from(path);
        }
        config.cadence = lookup("WEAPON_CADENCE").map(PathBuf::from);
        config.log_dir = lookup("WEAPON_SIM_LOG_DIR").map(PathBuf::from);

        let duration: Option<f32> = parse(&lookup, "WEAPON_SIM_DURATION");
        if let Some(duration) = duration.filter(|d| d.is_finite() && *d > 0.0) {
            config.duration = duration;
        }
        config.initial_ammo = parse(&lookup, "WEAPON_SIM_AMMO");
        config.locomotion = parse(&lookup, "WEAPON_SIM_LOCOMOTION");

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let data = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            catalog: data.join("weapons.ron"),
            weapon: Self::DEFAULT_WEAPON.to_string(),
            script: data.join("burst.ron"),
            cadence: None,
            log_dir: None,
            duration: Self::DEFAULT_DURATION,
            initial_ammo: None,
            locomotion: None,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_bundled_data() {
        let config = SimConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SimConfig::default());
        assert!(config.catalog.ends_with("weapons.ron"));
        assert_eq!(config.weapon, "rifle");
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let config = SimConfig::from_lookup(lookup(&[
            ("WEAPON_NAME", "pistol"),
            ("WEAPON_SIM_DURATION", "2.5"),
            ("WEAPON_SIM_AMMO", "3"),
            ("WEAPON_SIM_LOCOMOTION", "many"),
            ("WEAPON_SIM_LOG_DIR", "/tmp/weapon-logs"),
        ]));
        assert_eq!(config.weapon, "pistol");
        assert_eq!(config.duration, 2.5);
        assert_eq!(config.initial_ammo, Some(3));
        assert_eq!(config.locomotion, None);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/weapon-logs")));
    }

    #[test]
    fn rejects_non_positive_duration() {
        let config = SimConfig::from_lookup(lookup(&[("WEAPON_SIM_DURATION", "-1")]));
        assert_eq!(config.duration, SimConfig::DEFAULT_DURATION);
    }
}
