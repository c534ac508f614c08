//! Calculator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Calculator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Fractional digits kept by a quotient (rounded half away from zero)
    pub division_scale: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            division_scale: Self::DEFAULT_DIVISION_SCALE,
        }
    }
}

impl CalculatorConfig {
    /// Default quotient scale
    pub const DEFAULT_DIVISION_SCALE: u32 = 10;

    /// Largest scale a `rust_decimal::Decimal` can carry
    pub const MAX_DIVISION_SCALE: u32 = 28;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quotient scale
    #[must_use]
    pub const fn with_division_scale(mut self, scale: u32) -> Self {
        self.division_scale = scale;
        self
    }

    /// Checks that every field is within range
    pub fn validate(self) -> AppResult<Self> {
        if self.division_scale > Self::MAX_DIVISION_SCALE {
            return Err(AppError::config(format!(
                "division scale {} exceeds maximum of {}",
                self.division_scale,
                Self::MAX_DIVISION_SCALE
            )));
        }
        Ok(self)
    }

    /// Loads configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            AppError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()
    }
}
