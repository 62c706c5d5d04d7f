//! # Hydrator Configuration
//!
//! Configuration for how collections are hydrated. Values are layered with the
//! `config` crate:
//!
//! 1. built-in defaults
//! 2. an optional configuration file (format chosen by extension)
//! 3. environment variables prefixed `HYDRATOR__`, e.g.
//!    `HYDRATOR__PARALLEL_COLLECTIONS=true`
//!
//! ```rust,no_run
//! use hydrator::config::HydratorConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HydratorConfig::load(Some(Path::new("config/hydrator.toml")))?;
//! assert!(config.parallel_threshold > 0);
//! # Ok(())
//! # }
//! ```

use crate::error::{HydrationError, HydrationResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "HYDRATOR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydratorConfig {
    /// Hydrate collection items on the rayon thread pool
    pub parallel_collections: bool,

    /// Minimum collection size before parallel hydration kicks in
    pub parallel_threshold: usize,
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self {
            parallel_collections: false,
            parallel_threshold: 64,
        }
    }
}

impl HydratorConfig {
    /// Load defaults, then `path` if given, then `HYDRATOR__*` environment overrides
    pub fn load(path: Option<&Path>) -> HydrationResult<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Load with environment overrides taken from `{env_prefix}__*` variables
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> HydrationResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading hydrator configuration file");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config: HydratorConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            parallel_collections = config.parallel_collections,
            parallel_threshold = config.parallel_threshold,
            "Hydrator configuration loaded"
        );

        Ok(config)
    }

    /// Defaults with environment overrides only
    pub fn from_environment() -> HydrationResult<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> HydrationResult<()> {
        if self.parallel_threshold == 0 {
            return Err(HydrationError::Configuration(
                "parallel_threshold must be greater than 0".to_string(),
            ));
        }

        if self.parallel_collections && self.parallel_threshold == 1 {
            warn!("parallel_threshold is 1 - every collection will be hydrated in parallel");
        }

        Ok(())
    }

    #[must_use]
    pub fn with_parallel_collections(mut self, enabled: bool) -> Self {
        self.parallel_collections = enabled;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a collection of `len` records is hydrated in parallel
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel_collections && len >= self.parallel_threshold
    }
}
