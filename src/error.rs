//! Error types for the hydrator.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydrationError {
    /// The type descriptor does not identify a constructible type
    #[error("Type resolution error for {type_name}: {reason}")]
    TypeResolution { type_name: String, reason: String },
    /// Argument-based or zero-argument construction failed
    #[error("Construction error for {type_name}: {reason}")]
    Construction { type_name: String, reason: String },
    /// A single record of a collection failed to hydrate
    #[error("Collection item {index} failed: {source}")]
    CollectionItem {
        index: usize,
        source: Box<HydrationError>,
    },
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl HydrationError {
    pub fn type_resolution(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        HydrationError::TypeResolution {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub fn construction(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        HydrationError::Construction {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an error with the position of the record that produced it
    pub fn at_index(self, index: usize) -> Self {
        HydrationError::CollectionItem {
            index,
            source: Box::new(self),
        }
    }

    /// Error raised when the zero-argument fallback hits a type without a default constructor
    pub fn no_default_constructor(type_name: impl Into<String>, parameters: &[&str]) -> Self {
        HydrationError::Construction {
            type_name: type_name.into(),
            reason: format!(
                "no zero-argument constructor; constructor requires ({})",
                parameters.join(", ")
            ),
        }
    }

    /// Innermost error, skipping any collection position wrappers
    pub fn root_cause(&self) -> &HydrationError {
        match self {
            HydrationError::CollectionItem { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_construction(&self) -> bool {
        matches!(self.root_cause(), HydrationError::Construction { .. })
    }

    pub fn is_type_resolution(&self) -> bool {
        matches!(self.root_cause(), HydrationError::TypeResolution { .. })
    }
}

impl From<config::ConfigError> for HydrationError {
    fn from(error: config::ConfigError) -> Self {
        HydrationError::Configuration(error.to_string())
    }
}

pub type HydrationResult<T> = std::result::Result<T, HydrationError>;
