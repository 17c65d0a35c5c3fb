//! Service configuration.
//!
//! Holds the defaults that govern search parameter handling, the page size of
//! the administration facade and the strictness of schema validation. A
//! configuration can be built in code or loaded from a JSON document.
//!
//! ```rust
//! use uid_scim::config::ServiceConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::builder()
//!     .with_default_count(100)
//!     .with_maximum_count(200)
//!     .build()?;
//! assert_eq!(config.default_count, 100);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is out of its permitted range
    #[error("Configuration validation failed: {message}")]
    Invalid { message: String },
    /// The document could not be parsed
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Settings shared by search control parsing, validation and the admin facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// 1-based index used when `startIndex` is absent
    pub default_start: usize,
    /// Page size used when `count` is absent
    pub default_count: usize,
    /// Upper bound `count` is clamped to
    pub maximum_count: usize,
    /// Rows per page in the administration views
    pub page_size: usize,
    /// Ignore attributes a schema does not define
    pub relax: bool,
    /// Ignore sub-attributes a schema does not define
    pub weak: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_start: 1,
            default_count: 500,
            maximum_count: 1000,
            page_size: 10,
            relax: false,
            weak: false,
        }
    }
}

impl ServiceConfig {
    /// Start a builder seeded with the defaults.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }

    /// Parse and validate a JSON document. Absent keys keep their defaults.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        log::debug!("Loaded service configuration: {:?}", config);
        Ok(config)
    }

    /// Check the invariants between the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_start < 1 {
            return Err(ConfigError::Invalid {
                message: "defaultStart must be at least 1".to_string(),
            });
        }
        if self.default_count > self.maximum_count {
            return Err(ConfigError::Invalid {
                message: format!(
                    "defaultCount {} exceeds maximumCount {}",
                    self.default_count, self.maximum_count
                ),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                message: "pageSize must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug, Clone)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn with_default_start(mut self, value: usize) -> Self {
        self.config.default_start = value;
        self
    }

    pub fn with_default_count(mut self, value: usize) -> Self {
        self.config.default_count = value;
        self
    }

    pub fn with_maximum_count(mut self, value: usize) -> Self {
        self.config.maximum_count = value;
        self
    }

    pub fn with_page_size(mut self, value: usize) -> Self {
        self.config.page_size = value;
        self
    }

    pub fn relax(mut self) -> Self {
        self.config.relax = true;
        self
    }

    pub fn weak(mut self) -> Self {
        self.config.weak = true;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
