//! # Analysis Configuration
//!
//! All tunables for one match analysis, loadable from YAML.
//!
//! ```yaml
//! match_id: "1886347"
//! ingest:
//!   probe_len: 50
//!   origin: center
//! pressure:
//!   sigma_m: 3.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::pressure::DEFAULT_SIGMA_M;
use crate::error::ConfigError;
use crate::models::CoordinateOrigin;

/// Minimum number of bytes inspected before committing to ingestion.
pub const MIN_PROBE_LEN: usize = 50;
/// Upper bound on the probe; ingestion never buffers more before validating.
pub const MAX_PROBE_LEN: usize = 4096;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Match being analysed (tagged on log output)
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub pressure: PressureConfig,
}

/// Tracking ingestion parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Prefix size checked for a git-lfs pointer (기본: 50, 범위 50..=4096)
    pub probe_len: usize,
    /// Origin convention of the incoming feed (기본: corner)
    pub origin: CoordinateOrigin,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            probe_len: MIN_PROBE_LEN,
            origin: CoordinateOrigin::Corner,
        }
    }
}

/// Pressure field parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureConfig {
    /// Gaussian kernel width in meters (기본: 3.0)
    pub sigma_m: f64,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self { sigma_m: DEFAULT_SIGMA_M }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probe_len = self.ingest.probe_len;
        if !(MIN_PROBE_LEN..=MAX_PROBE_LEN).contains(&probe_len) {
            return Err(ConfigError::Invalid {
                field: "ingest.probe_len",
                reason: format!("{probe_len} is outside {MIN_PROBE_LEN}..={MAX_PROBE_LEN}"),
            });
        }
        let sigma = self.pressure.sigma_m;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "pressure.sigma_m",
                reason: format!("{sigma} is not a positive finite number"),
            });
        }
        Ok(())
    }

    /// Builder-style match id override (CLI flag wins over the file).
    pub fn with_match_id(mut self, match_id: Option<String>) -> Self {
        if match_id.is_some() {
            self.match_id = match_id;
        }
        self
    }
}
