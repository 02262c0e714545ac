//! Construction-time configuration.
//!
//! Tables are validated once, when relationships, hierarchies, variant
//! columns and label maps are built over them. After that, every query
//! trusts the invariants established here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How thoroughly construction checks the static data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Validation {
    /// Run every check and fail construction on the first violation.
    #[default]
    Strict,
    /// Skip O(n) checks for data a generator already validated.
    ///
    /// The checks still run as debug assertions.
    Trusted,
}

impl Validation {
    /// Returns true if checks run in this build.
    #[must_use]
    pub fn enabled(self) -> bool {
        matches!(self, Self::Strict) || cfg!(debug_assertions)
    }

    /// Returns true if a failed check must be reported as an error.
    #[must_use]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Options for building indices and relationships.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildConfig {
    /// Validation mode for construction-time checks.
    pub validation: Validation,
    /// Build reverse indices during construction instead of on first use.
    pub eager_indexes: bool,
}

impl BuildConfig {
    /// Creates the default configuration: strict validation, eager indices.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validation: Validation::Strict,
            eager_indexes: true,
        }
    }

    /// Configuration for generator-validated data with lazily built indices.
    #[must_use]
    pub const fn trusted() -> Self {
        Self {
            validation: Validation::Trusted,
            eager_indexes: false,
        }
    }

    /// Sets the validation mode.
    #[must_use]
    pub const fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Sets whether reverse indices are built eagerly.
    #[must_use]
    pub const fn with_eager_indexes(mut self, eager: bool) -> Self {
        self.eager_indexes = eager;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}
