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

//! Threshold-driven hair pass level selection.

use crate::trend::FrameSums;
use tressa_core::{LevelChange, QualityLevel};

/// Default streak duration that triggers a level change, in ms.
pub const DEFAULT_STREAK_THRESHOLD_MS: f64 = 1000.0;

/// Holds the current pass level and moves it by one step whenever a fast or
/// slow streak lasts long enough.
///
/// A sum that crosses its threshold is always reset to zero, even when the
/// level is already at the corresponding bound. Otherwise a device that is
/// pinned at the top level would accumulate an ever-growing fast streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityLevelController {
    level: QualityLevel,
    min_level: QualityLevel,
    max_level: QualityLevel,
    escalate_threshold_ms: f64,
    deescalate_threshold_ms: f64,
}

impl Default for QualityLevelController {
    fn default() -> Self {
        Self::new(
            QualityLevel::LOW,
            QualityLevel::LOW,
            QualityLevel::HIGH,
            DEFAULT_STREAK_THRESHOLD_MS,
            DEFAULT_STREAK_THRESHOLD_MS,
        )
    }
}

impl QualityLevelController {
    /// Creates a controller. `initial` is clamped into `[min_level, max_level]`.
    pub fn new(
        initial: QualityLevel,
        min_level: QualityLevel,
        max_level: QualityLevel,
        escalate_threshold_ms: f64,
        deescalate_threshold_ms: f64,
    ) -> Self {
        Self {
            level: initial.max(min_level).min(max_level),
            min_level,
            max_level,
            escalate_threshold_ms,
            deescalate_threshold_ms,
        }
    }

    /// Evaluates the streak sums, possibly moving the level by one step.
    ///
    /// The sum that crossed its threshold is reset in place.
    pub fn tick(&mut self, sums: &mut FrameSums) -> Option<LevelChange> {
        let from = self.level;

        if sums.fast_ms >= self.escalate_threshold_ms {
            if self.level < self.max_level {
                self.level = self.level.raised();
            }
            sums.fast_ms = 0.0;
        }

        if sums.slow_ms >= self.deescalate_threshold_ms {
            if self.level > self.min_level {
                self.level = self.level.lowered();
            }
            sums.slow_ms = 0.0;
        }

        (self.level != from).then_some(LevelChange {
            from,
            to: self.level,
        })
    }

    /// Jumps straight to `level`, clamped into the configured range.
    ///
    /// Used when the host resets to a known level, e.g. on scene attachment.
    pub fn force_level(&mut self, level: QualityLevel) -> Option<LevelChange> {
        let from = self.level;
        self.level = level.max(self.min_level).min(self.max_level);
        (self.level != from).then_some(LevelChange {
            from,
            to: self.level,
        })
    }

    /// The current level.
    pub fn level(&self) -> QualityLevel {
        self.level
    }

    /// The lowest reachable level.
    pub fn min_level(&self) -> QualityLevel {
        self.min_level
    }

    /// The highest reachable level.
    pub fn max_level(&self) -> QualityLevel {
        self.max_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(ms: f64) -> FrameSums {
        FrameSums {
            fast_ms: ms,
            slow_ms: 0.0,
        }
    }

    fn slow(ms: f64) -> FrameSums {
        FrameSums {
            fast_ms: 0.0,
            slow_ms: ms,
        }
    }

    #[test]
    fn test_escalates_one_step_and_resets() {
        let mut controller = QualityLevelController::default();
        let mut sums = fast(1000.0);

        let change = controller.tick(&mut sums);
        assert_eq!(
            change,
            Some(LevelChange {
                from: QualityLevel::LOW,
                to: QualityLevel::MEDIUM
            })
        );
        assert_eq!(sums.fast_ms, 0.0);
    }

    #[test]
    fn test_below_threshold_keeps_level_and_sum() {
        let mut controller = QualityLevelController::default();
        let mut sums = fast(999.0);
        assert!(controller.tick(&mut sums).is_none());
        assert_eq!(sums.fast_ms, 999.0);
        assert_eq!(controller.level(), QualityLevel::LOW);
    }

    #[test]
    fn test_deescalates_one_step() {
        let mut controller = QualityLevelController::new(
            QualityLevel::HIGH,
            QualityLevel::LOW,
            QualityLevel::HIGH,
            1000.0,
            1000.0,
        );
        let mut sums = slow(5000.0);
        let change = controller.tick(&mut sums).unwrap();
        assert_eq!(change.to, QualityLevel::MEDIUM);
        assert!(!change.is_escalation());
        assert_eq!(sums.slow_ms, 0.0);
    }

    #[test]
    fn test_bound_still_resets_sum() {
        let mut controller = QualityLevelController::new(
            QualityLevel::HIGH,
            QualityLevel::LOW,
            QualityLevel::HIGH,
            1000.0,
            1000.0,
        );
        let mut sums = fast(1500.0);
        assert!(controller.tick(&mut sums).is_none());
        assert_eq!(sums.fast_ms, 0.0);
        assert_eq!(controller.level(), QualityLevel::HIGH);

        let mut controller = QualityLevelController::default();
        let mut sums = slow(1500.0);
        assert!(controller.tick(&mut sums).is_none());
        assert_eq!(sums.slow_ms, 0.0);
        assert_eq!(controller.level(), QualityLevel::LOW);
    }

    #[test]
    fn test_force_level_clamps() {
        let mut controller = QualityLevelController::default();
        let change = controller.force_level(QualityLevel::new(9).unwrap());
        assert_eq!(controller.level(), QualityLevel::HIGH);
        assert_eq!(change.map(|c| c.to), Some(QualityLevel::HIGH));
        assert!(controller.force_level(QualityLevel::HIGH).is_none());
    }

    #[test]
    fn test_initial_level_is_clamped() {
        let controller = QualityLevelController::new(
            QualityLevel::LOW,
            QualityLevel::MEDIUM,
            QualityLevel::HIGH,
            1000.0,
            1000.0,
        );
        assert_eq!(controller.level(), QualityLevel::MEDIUM);
    }
}
