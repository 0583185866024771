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

//! The complete per-frame controller state as a plain value.

use crate::config::QualityConfig;
use crate::quality::QualityLevelController;
use crate::timer::FrameTimer;
use crate::trend::{FrameSums, FrameTrendClassifier};
use tressa_core::{LevelChange, QualityLevel};

/// Result of advancing the controller by one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// The delta that was classified, or `None` if the frame only primed the
    /// timer or carried an unusable timestamp.
    pub delta_ms: Option<f64>,
    /// The level change this frame caused, if any.
    pub change: Option<LevelChange>,
}

/// Timer, streak sums and level, copied in and out of every frame.
///
/// Holding no handles and no interior mutability, the state can be stored
/// wherever the host keeps per-view data and advanced with [`tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    timer: FrameTimer,
    classifier: FrameTrendClassifier,
    controller: QualityLevelController,
    skip_first_frame: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(&QualityConfig::default())
    }
}

impl ControllerState {
    /// Fresh state: unprimed timer, empty sums, initial level.
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            timer: FrameTimer::new(),
            classifier: FrameTrendClassifier::new(
                config.fast_threshold_ms,
                config.slow_threshold_ms,
            ),
            controller: QualityLevelController::new(
                config.initial_level,
                config.min_level,
                config.max_level,
                config.escalate_threshold_ms,
                config.deescalate_threshold_ms,
            ),
            skip_first_frame: config.skip_first_frame,
        }
    }

    /// Advances by one frame.
    pub fn advance(mut self, timestamp: f64) -> (Self, FrameOutcome) {
        if !timestamp.is_finite() {
            log::warn!("ControllerState: Ignoring non-finite timestamp {}", timestamp);
            return (self, FrameOutcome::default());
        }

        let first = !self.timer.is_primed();
        let delta = self.timer.on_frame(timestamp);
        if first && self.skip_first_frame {
            log::trace!("ControllerState: Primed timer at {:.3}ms", timestamp);
            return (self, FrameOutcome::default());
        }

        let sums = self.classifier.observe(delta);
        log::trace!(
            "ControllerState: delta={:.3}ms class={:?} fast={:.1}ms slow={:.1}ms",
            delta,
            self.classifier.classify(delta),
            sums.fast_ms,
            sums.slow_ms
        );
        let change = self.controller.tick(self.classifier.sums_mut());

        (
            self,
            FrameOutcome {
                delta_ms: Some(delta),
                change,
            },
        )
    }

    /// Jumps to `level`, clamped into the configured range. The timer and
    /// sums are left alone.
    pub fn force_level(&mut self, level: QualityLevel) -> Option<LevelChange> {
        self.controller.force_level(level)
    }

    /// The current level.
    pub fn level(&self) -> QualityLevel {
        self.controller.level()
    }

    /// The current streak sums.
    pub fn sums(&self) -> FrameSums {
        self.classifier.sums()
    }

    /// The frame timer.
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// The level controller.
    pub fn controller(&self) -> &QualityLevelController {
        &self.controller
    }
}

/// Advances `state` by one frame and reports the level change, if any.
///
/// ```
/// use tressa_control::{tick, ControllerState};
///
/// let mut state = ControllerState::default();
/// let mut changes = Vec::new();
/// for frame in 0..40 {
///     let (next, change) = tick(state, frame as f64 * 30.0);
///     state = next;
///     changes.extend(change);
/// }
/// assert_eq!(changes.len(), 1);
/// assert_eq!(state.level().passes(), 2);
/// ```
pub fn tick(state: ControllerState, timestamp: f64) -> (ControllerState, Option<LevelChange>) {
    let (state, outcome) = state.advance(timestamp);
    (state, outcome.change)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        mut state: ControllerState,
        timestamps: impl IntoIterator<Item = f64>,
    ) -> ControllerState {
        for ts in timestamps {
            state = tick(state, ts).0;
        }
        state
    }

    #[test]
    fn test_first_frame_only_primes() {
        let state = ControllerState::default();
        let (state, outcome) = state.advance(5000.0);
        assert_eq!(outcome, FrameOutcome::default());
        assert!(state.timer().is_primed());
        assert_eq!(state.sums(), FrameSums::default());
    }

    #[test]
    fn test_first_frame_classified_when_not_skipped() {
        let config = QualityConfig {
            skip_first_frame: false,
            ..Default::default()
        };
        let (state, outcome) = ControllerState::new(&config).advance(5000.0);
        assert_eq!(outcome.delta_ms, Some(5000.0));
        assert_eq!(state.sums().slow_ms, 0.0, "sum resets after acting");
        assert_eq!(state.level(), QualityLevel::LOW);
    }

    #[test]
    fn test_steady_fast_frames_escalate_once_per_second() {
        // 34 deltas of 30ms: the 34th pushes the fast sum to 1020ms.
        let state = run(ControllerState::default(), (0..34).map(|i| i as f64 * 30.0));
        assert_eq!(state.level(), QualityLevel::LOW);

        let (state, change) = tick(state, 34.0 * 30.0);
        assert_eq!(
            change,
            Some(LevelChange {
                from: QualityLevel::LOW,
                to: QualityLevel::MEDIUM
            })
        );
        assert_eq!(state.sums().fast_ms, 0.0);
    }

    #[test]
    fn test_non_finite_timestamp_leaves_state_unchanged() {
        let state = run(ControllerState::default(), [0.0, 16.0]);
        let (next, outcome) = state.advance(f64::INFINITY);
        assert_eq!(next, state);
        assert_eq!(outcome.delta_ms, None);
    }

    #[test]
    fn test_force_level_keeps_sums() {
        let mut state = run(ControllerState::default(), [0.0, 16.0, 32.0]);
        let sums = state.sums();
        let change = state.force_level(QualityLevel::HIGH);
        assert_eq!(change.map(|c| c.to), Some(QualityLevel::HIGH));
        assert_eq!(state.sums(), sums);
    }
}
