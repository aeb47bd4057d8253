use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconConfig {
    pub name: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("files")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// File names of the five source tables inside `input_dir`. The WW feeds
/// carry no state column; `ww_state` supplies the constant.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_gallo_on")]
    pub gallo_on: String,
    #[serde(default = "default_spectra_on")]
    pub spectra_on: String,
    #[serde(default = "default_spectra_off")]
    pub spectra_off: String,
    #[serde(default = "default_ww_on")]
    pub ww_on: String,
    #[serde(default = "default_ww_off")]
    pub ww_off: String,
    #[serde(default = "default_ww_state")]
    pub ww_state: String,
}

fn default_gallo_on() -> String {
    "gallo_on_premise.csv".into()
}
fn default_spectra_on() -> String {
    "spectra_on_premise.csv".into()
}
fn default_spectra_off() -> String {
    "spectra_off_premise.csv".into()
}
fn default_ww_on() -> String {
    "ww_on_premise.csv".into()
}
fn default_ww_off() -> String {
    "ww_off_premise.csv".into()
}
fn default_ww_state() -> String {
    "CA".into()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            gallo_on: default_gallo_on(),
            spectra_on: default_spectra_on(),
            spectra_off: default_spectra_off(),
            ww_on: default_ww_on(),
            ww_off: default_ww_off(),
            ww_state: default_ww_state(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Similarity threshold in (0, 1]; 1.0 means only identical composite
    /// identity strings cluster. Uniform across partitions within a run.
    #[serde(default = "default_similarity")]
    pub similarity: f64,
}

fn default_similarity() -> f64 {
    0.8
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            similarity: default_similarity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let similarity = self.tolerance.similarity;
        if !(similarity > 0.0 && similarity <= 1.0) {
            return Err(ReconError::ConfigValidation(format!(
                "tolerance.similarity must be in (0, 1], got {similarity}"
            )));
        }

        let state = &self.sources.ww_state;
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ReconError::ConfigValidation(format!(
                "sources.ww_state must be a two-letter state code, got {state:?}"
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
