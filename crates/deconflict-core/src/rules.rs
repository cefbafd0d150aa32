//! Safety thresholds for deconfliction checks.

use serde::{Deserialize, Serialize};

/// Configuration for a deconfliction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Minimum allowed distance between any two drones, in flight-plan
    /// distance units.
    pub safety_buffer: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self { safety_buffer: 5.0 }
    }
}

impl SafetyConfig {
    pub fn new(safety_buffer: f64) -> Self {
        Self { safety_buffer }
    }

    /// Validate the configuration.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.safety_buffer.is_finite() {
            errors.push("Safety buffer must be a finite number".to_string());
        } else if self.safety_buffer <= 0.0 {
            errors.push(format!(
                "Safety buffer ({}) must be strictly positive",
                self.safety_buffer
            ));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buffer_is_five_units() {
        let config = SafetyConfig::default();
        assert_eq!(config.safety_buffer, 5.0);
        assert!(config.is_valid());
    }

    #[test]
    fn non_positive_or_non_finite_buffers_are_invalid() {
        assert!(!SafetyConfig::new(0.0).is_valid());
        assert!(!SafetyConfig::new(-5.0).is_valid());
        assert!(!SafetyConfig::new(f64::NAN).is_valid());
        assert!(!SafetyConfig::new(f64::INFINITY).is_valid());
    }
}
