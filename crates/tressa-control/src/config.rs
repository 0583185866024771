// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tunables of the quality controller.

use crate::quality::DEFAULT_STREAK_THRESHOLD_MS;
use crate::trend::{DEFAULT_FAST_THRESHOLD_MS, DEFAULT_SLOW_THRESHOLD_MS};
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tressa_core::pass::HairPassTable;
use tressa_core::QualityLevel;

/// A configuration that cannot drive the controller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The RON text is malformed.
    #[error("failed to parse quality config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The values are inconsistent.
    #[error("invalid quality config: {0}")]
    Invalid(String),
}

/// Configuration for the quality controller.
///
/// Every field has a default, so a RON file only needs to list what it
/// changes:
///
/// ```
/// use tressa_control::QualityConfig;
///
/// let config = QualityConfig::from_ron_str("(slow_threshold_ms: 80.0)").unwrap();
/// assert_eq!(config.slow_threshold_ms, 80.0);
/// assert_eq!(config.fast_threshold_ms, 40.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Frames strictly faster than this (ms) extend the fast streak.
    pub fast_threshold_ms: f64,
    /// Frames strictly slower than this (ms) extend the slow streak.
    pub slow_threshold_ms: f64,
    /// Fast streak duration (ms) that raises the level by one.
    pub escalate_threshold_ms: f64,
    /// Slow streak duration (ms) that lowers the level by one.
    pub deescalate_threshold_ms: f64,
    /// Level at construction and after [`reset`](crate::QualityGovernor::reset).
    pub initial_level: QualityLevel,
    /// Lowest level the controller may select.
    pub min_level: QualityLevel,
    /// Highest level the controller may select.
    pub max_level: QualityLevel,
    /// Skip classification of the first frame after construction or reset.
    ///
    /// The first delta is measured against an unset timestamp and is not a
    /// real frame time.
    pub skip_first_frame: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            fast_threshold_ms: DEFAULT_FAST_THRESHOLD_MS,
            slow_threshold_ms: DEFAULT_SLOW_THRESHOLD_MS,
            escalate_threshold_ms: DEFAULT_STREAK_THRESHOLD_MS,
            deescalate_threshold_ms: DEFAULT_STREAK_THRESHOLD_MS,
            initial_level: QualityLevel::LOW,
            min_level: QualityLevel::LOW,
            max_level: QualityLevel::HIGH,
            skip_first_frame: true,
        }
    }
}

impl QualityConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a RON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read quality config '{}'", path.display()))?;
        Self::from_ron_str(&text)
            .with_context(|| format!("Failed to load quality config '{}'", path.display()))
    }

    /// Checks that the thresholds and levels are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;

        if !finite_positive(self.fast_threshold_ms) || !finite_positive(self.slow_threshold_ms) {
            return Err(ConfigError::Invalid(
                "frame thresholds must be positive".into(),
            ));
        }
        if self.fast_threshold_ms >= self.slow_threshold_ms {
            return Err(ConfigError::Invalid(format!(
                "fast threshold ({}ms) must be below slow threshold ({}ms)",
                self.fast_threshold_ms, self.slow_threshold_ms
            )));
        }
        if !finite_positive(self.escalate_threshold_ms)
            || !finite_positive(self.deescalate_threshold_ms)
        {
            return Err(ConfigError::Invalid(
                "streak thresholds must be positive".into(),
            ));
        }
        if self.min_level > self.max_level {
            return Err(ConfigError::Invalid(format!(
                "min level {} is above max level {}",
                self.min_level, self.max_level
            )));
        }
        if self.initial_level < self.min_level || self.initial_level > self.max_level {
            return Err(ConfigError::Invalid(format!(
                "initial level {} is outside {}..={}",
                self.initial_level, self.min_level, self.max_level
            )));
        }
        Ok(())
    }

    /// Checks that every level the controller may select has a row in
    /// `table`.
    pub fn validate_for_table(&self, table: &HairPassTable) -> Result<(), ConfigError> {
        let (lowest, highest) = (table.lowest_level(), table.highest_level());
        if self.min_level < lowest || self.max_level > highest {
            return Err(ConfigError::Invalid(format!(
                "levels {}..={} exceed the pass table levels {}..={}",
                self.min_level, self.max_level, lowest, highest
            )));
        }
        Ok(())
    }
}
