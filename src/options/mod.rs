//! Immutable engine configuration with TOML preset support.
//!
//! Every tunable constant of the morph engine (phase durations, sampler
//! thresholds, per-style particle profiles) lives here. An [`Options`] value
//! is handed to the engine at construction and never mutated afterwards, so
//! tests can inject e.g. zero-length transitions or a fixed random seed.

mod sampler;
mod styles;
mod timing;

use std::path::Path;

pub use sampler::SamplerOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use styles::{StyleOptions, StyleProfile, VisualStyle};
pub use timing::TimingOptions;

use crate::error::MorphError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Transition phase durations and idle wobble.
    pub timing: TimingOptions,
    /// Text rasterization and sampling parameters.
    pub sampler: SamplerOptions,
    /// Per-style particle profiles and cloud geometry.
    pub styles: StyleOptions,
    /// Fixed seed for the engine's random source. `None` seeds from the
    /// thread RNG.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MorphError> {
        let content = std::fs::read_to_string(path).map_err(MorphError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, MorphError> {
        toml::from_str(content)
            .map_err(|e| MorphError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MorphError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MorphError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MorphError::Io)?;
        }
        std::fs::write(path, content).map_err(MorphError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options {
            seed: Some(7),
            ..Options::default()
        };
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[timing]
scatter_ms = 0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.timing.scatter_ms, 0);
        // Everything else should be default
        assert_eq!(opts.timing.converge_ms, 580);
        assert_eq!(opts.styles.granular.particle_count, 900);
        assert_eq!(opts.sampler.font_family, "Crimson Pro");
        assert_eq!(opts.seed, None);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = Options::from_toml("[timing\nscatter_ms = 1").unwrap_err();
        assert!(matches!(err, MorphError::OptionsParse(_)));
    }

    #[test]
    fn disabled_style_has_no_profile() {
        let styles = StyleOptions::default();
        assert!(styles.profile(VisualStyle::Disabled).is_none());
        assert_eq!(
            styles.profile(VisualStyle::Diffuse).map(|p| p.particle_count),
            Some(550)
        );
        assert_eq!(
            styles.profile(VisualStyle::Liquid).map(|p| p.particle_count),
            Some(750)
        );
    }

    #[test]
    fn total_duration_is_sum_of_legs() {
        let timing = TimingOptions::default();
        assert_eq!(timing.total().as_millis(), 480 + 580);
    }

    #[test]
    fn save_then_load_preset() {
        let dir = std::env::temp_dir()
            .join(format!("morphtext-presets-{}", std::process::id()));
        let path = dir.join("slow.toml");
        let mut opts = Options::default();
        opts.timing.converge_ms = 2000;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["slow".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("timing"));
        assert!(props.contains_key("sampler"));
        assert!(props.contains_key("styles"));
        assert!(!props.contains_key("seed"));

        let timing = &props["timing"]["properties"];
        assert!(timing.get("scatter_ms").is_some());
        assert!(timing.get("wobble_amplitude").is_none());
    }
}
