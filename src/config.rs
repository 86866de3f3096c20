// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the simulator.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. enaqt.yaml file
//! 3. Environment variables (ENAQT_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::ensemble::{EnsembleParams, EnsembleSimulator, RealizationPolicy, RegimeSweep};
use crate::error::{Error, Result};
use crate::validation::validate_rates;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Chain model
    #[serde(default)]
    pub chain: ChainConfig,

    /// Time discretization
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Disorder ensemble and rate sweep
    #[serde(default)]
    pub ensemble: EnsembleConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// A named file that does not exist falls back to defaults; see
    /// [`Config::missing_file`] to report it once logging is up.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        // Load from file if specified
        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            // Try default locations
            for path in &["enaqt.yaml", "enaqt.yml"] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        // Override with environment variables
        config.apply_env_overrides()?;

        Ok(config)
    }

    /// The requested config path, if it names no existing file.
    pub fn missing_file(config_path: Option<&Path>) -> Option<&Path> {
        config_path.filter(|path| !path.exists())
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are configuration errors rather than being
    /// silently ignored.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_parse("ENAQT_NUM_SITES")? {
            self.chain.num_sites = val;
        }
        if let Some(val) = env_parse("ENAQT_COUPLING")? {
            self.chain.coupling = val;
        }
        if let Some(val) = env_parse("ENAQT_DISORDER")? {
            self.chain.disorder = val;
        }
        if let Some(val) = env_parse("ENAQT_DT")? {
            self.evolution.dt = val;
        }
        if let Some(val) = env_parse("ENAQT_TIME_STEPS")? {
            self.evolution.num_time_steps = val;
        }
        if let Some(val) = env_parse("ENAQT_SAMPLES")? {
            self.ensemble.samples = val;
        }
        if let Some(val) = env_parse("ENAQT_SEED")? {
            self.ensemble.seed = val;
        }
        if let Ok(val) = env::var("ENAQT_RATES") {
            self.ensemble.dephasing_rates = parse_rate_list(&val)?;
        }
        if let Ok(val) = env::var("ENAQT_POLICY") {
            self.ensemble.policy = val.parse()?;
        }
        if let Ok(val) = env::var("ENAQT_PARALLEL") {
            self.ensemble.parallel = parse_flag("ENAQT_PARALLEL", &val)?;
        }
        if let Ok(val) = env::var("ENAQT_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("ENAQT_LOG_FORMAT") {
            self.logging.format = val;
        }
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        self.ensemble_params().validate()?;
        validate_rates(&self.ensemble.dephasing_rates)?;
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(Error::Config(format!(
                "log format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            )));
        }
        if self.ensemble.parallel && self.ensemble.policy == RealizationPolicy::ContinuedStream {
            tracing::warn!(
                "Continued-stream policy runs sequentially; the parallel setting is ignored"
            );
        }
        Ok(())
    }

    /// Model and sampling parameters for the ensemble simulator.
    pub fn ensemble_params(&self) -> EnsembleParams {
        EnsembleParams {
            num_sites: self.chain.num_sites,
            coupling: self.chain.coupling,
            disorder: self.chain.disorder,
            dt: self.evolution.dt,
            num_time_steps: self.evolution.num_time_steps,
            samples: self.ensemble.samples,
        }
    }

    /// Validated sweep ready to run.
    pub fn build_sweep(&self) -> Result<RegimeSweep> {
        self.validate()?;
        let simulator =
            EnsembleSimulator::new(self.ensemble_params())?.with_parallel(self.ensemble.parallel);
        Ok(
            RegimeSweep::new(simulator, self.ensemble.dephasing_rates.clone(), self.ensemble.seed)?
                .with_policy(self.ensemble.policy),
        )
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has invalid value '{}'", name, val))),
        Err(_) => Ok(None),
    }
}

/// Boolean switch: `true`/`false` in any case, or `1`/`0`.
fn parse_flag(name: &str, val: &str) -> Result<bool> {
    match val.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => other
            .to_lowercase()
            .parse()
            .map_err(|_| Error::Config(format!("{} has invalid value '{}'", name, val))),
    }
}

/// Parse a comma-separated list of dephasing rates.
pub fn parse_rate_list(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| Error::Config(format!("invalid dephasing rate '{}'", part)))
        })
        .collect()
}

/// Chain model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Number of sites N (source is site 0, sink is site N-1)
    #[serde(default = "default_num_sites")]
    pub num_sites: usize,

    /// Nearest-neighbour coupling J
    #[serde(default = "default_coupling")]
    pub coupling: f64,

    /// Disorder half-width W; site energies are drawn from U[-W, W]
    #[serde(default = "default_disorder")]
    pub disorder: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            num_sites: default_num_sites(),
            coupling: default_coupling(),
            disorder: default_disorder(),
        }
    }
}

fn default_num_sites() -> usize {
    7
}

fn default_coupling() -> f64 {
    1.0
}

fn default_disorder() -> f64 {
    5.0
}

/// Time discretization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Step size
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Number of recorded steps
    #[serde(default = "default_time_steps")]
    pub num_time_steps: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            num_time_steps: default_time_steps(),
        }
    }
}

fn default_dt() -> f64 {
    0.5
}

fn default_time_steps() -> usize {
    100
}

/// Ensemble and sweep configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Disorder realizations per rate
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Master seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Dephasing rates to sweep, in order
    #[serde(default = "default_rates")]
    pub dephasing_rates: Vec<f64>,

    /// How disorder realizations relate across rates
    #[serde(default)]
    pub policy: RealizationPolicy,

    /// Run samples on the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            seed: default_seed(),
            dephasing_rates: default_rates(),
            policy: RealizationPolicy::default(),
            parallel: true,
        }
    }
}

fn default_samples() -> usize {
    50
}

fn default_seed() -> u64 {
    42
}

fn default_rates() -> Vec<f64> {
    vec![0.0, 1.5, 10.0]
}

fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chain.num_sites, 7);
        assert_eq!(config.chain.coupling, 1.0);
        assert_eq!(config.chain.disorder, 5.0);
        assert_eq!(config.evolution.dt, 0.5);
        assert_eq!(config.evolution.num_time_steps, 100);
        assert_eq!(config.ensemble.samples, 50);
        assert_eq!(config.ensemble.dephasing_rates, vec![0.0, 1.5, 10.0]);
        assert_eq!(config.ensemble.policy, RealizationPolicy::SharedDisorder);
        assert!(config.ensemble.parallel);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad_config = Config::default();
        bad_config.chain.num_sites = 1;
        assert!(bad_config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut config = Config::default();
        config.ensemble.dephasing_rates = vec![0.0, -1.0];
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        config.ensemble.dephasing_rates = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".into();
        let msg = format!("{}", config.validate().unwrap_err());
        assert!(msg.contains("log format"));
    }

    #[test]
    fn test_continued_policy_with_parallel_still_passes() {
        let mut config = Config::default();
        config.ensemble.policy = RealizationPolicy::ContinuedStream;
        // Should warn but still pass validation
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
chain:
  num_sites: 9
  coupling: 0.5
ensemble:
  dephasing_rates: [0.0, 2.0]
  policy: independent_per_rate
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.chain.num_sites, 9);
        assert_eq!(config.chain.coupling, 0.5);
        assert_eq!(config.ensemble.policy, RealizationPolicy::IndependentPerRate);
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        // When a path is provided but doesn't exist, load returns defaults
        let path = std::path::Path::new("/tmp/does_not_exist_enaqt_test.yaml");
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.chain.num_sites, 7);
        assert_eq!(Config::missing_file(Some(path)), Some(path));
    }

    #[test]
    fn test_missing_file_ignores_existing_and_absent_paths() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(Config::missing_file(Some(f.path())), None);
        assert_eq!(Config::missing_file(None), None);
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();

        let result = Config::load(Some(f.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let mut config = Config::default();
        config.ensemble.seed = 7;
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_env_override_disorder() {
        let mut config = Config::default();
        std::env::set_var("ENAQT_DISORDER", "2.5");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.chain.disorder, 2.5);
        std::env::remove_var("ENAQT_DISORDER");
    }

    #[test]
    fn test_env_override_seed() {
        let mut config = Config::default();
        std::env::set_var("ENAQT_SEED", "12345");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.ensemble.seed, 12345);
        std::env::remove_var("ENAQT_SEED");
    }

    #[test]
    fn test_env_override_rates() {
        let mut config = Config::default();
        std::env::set_var("ENAQT_RATES", "0, 0.5, 3");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.ensemble.dephasing_rates, vec![0.0, 0.5, 3.0]);
        std::env::remove_var("ENAQT_RATES");
    }

    #[test]
    fn test_env_override_log_level() {
        let mut config = Config::default();
        std::env::set_var("ENAQT_LOG_LEVEL", "debug");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.logging.level, "debug");
        std::env::remove_var("ENAQT_LOG_LEVEL");
    }

    #[test]
    fn test_env_override_parallel() {
        let mut config = Config::default();
        std::env::set_var("ENAQT_PARALLEL", "false");
        config.apply_env_overrides().unwrap();
        assert!(!config.ensemble.parallel);
        std::env::remove_var("ENAQT_PARALLEL");

        // Also test "1" → true
        std::env::set_var("ENAQT_PARALLEL", "1");
        config.apply_env_overrides().unwrap();
        assert!(config.ensemble.parallel);
        std::env::remove_var("ENAQT_PARALLEL");
    }

    #[test]
    fn test_parse_flag_accepts_bool_spellings() {
        for val in ["true", "TRUE", " True ", "1"] {
            assert!(parse_flag("ENAQT_PARALLEL", val).unwrap(), "{val}");
        }
        for val in ["false", "False", "0"] {
            assert!(!parse_flag("ENAQT_PARALLEL", val).unwrap(), "{val}");
        }
    }

    #[test]
    fn test_parse_flag_rejects_other_values() {
        for val in ["ture", "yes", "2", ""] {
            let err = parse_flag("ENAQT_PARALLEL", val).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{val}");
            assert!(err.to_string().contains("ENAQT_PARALLEL"));
        }
    }

    #[test]
    fn test_env_parse_invalid_value() {
        std::env::set_var("ENAQT_TEST_BOGUS_COUNT", "many");
        let result = env_parse::<usize>("ENAQT_TEST_BOGUS_COUNT");
        std::env::remove_var("ENAQT_TEST_BOGUS_COUNT");
        let msg = format!("{}", result.unwrap_err());
        assert!(msg.contains("ENAQT_TEST_BOGUS_COUNT"));
        assert!(env_parse::<usize>("ENAQT_TEST_UNSET_COUNT").unwrap().is_none());
    }

    #[test]
    fn test_parse_rate_list() {
        assert_eq!(parse_rate_list("0,1.5,10").unwrap(), vec![0.0, 1.5, 10.0]);
        assert_eq!(parse_rate_list(" 2 , ").unwrap(), vec![2.0]);
        assert!(parse_rate_list("1,x").is_err());
    }

    #[test]
    fn test_build_sweep_uses_config() {
        let mut config = Config::default();
        config.ensemble.seed = 3;
        config.ensemble.parallel = false;
        config.ensemble.policy = RealizationPolicy::IndependentPerRate;
        let sweep = config.build_sweep().unwrap();
        assert_eq!(sweep.seed(), 3);
        assert_eq!(sweep.rates(), &[0.0, 1.5, 10.0]);
        assert_eq!(sweep.policy(), RealizationPolicy::IndependentPerRate);
        assert!(!sweep.simulator().is_parallel());
        assert_eq!(sweep.simulator().params(), &config.ensemble_params());
    }
}
