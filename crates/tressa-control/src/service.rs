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

//! Stateful front end of the controller for render loops.

use crate::config::{ConfigError, QualityConfig};
use crate::metrics::{FrameHistory, FrameStats};
use crate::state::ControllerState;
use crate::trend::FrameSums;
use crossbeam_channel::{Sender, TrySendError};
use tressa_core::telemetry::QualityEvent;
use tressa_core::{LevelChange, QualityLevel};

/// Owns a [`ControllerState`] and advances it once per rendered frame.
///
/// On top of the pure state machine it keeps a rolling frame history, logs
/// level changes and optionally forwards them as [`QualityEvent`]s.
pub struct QualityGovernor {
    config: QualityConfig,
    state: ControllerState,
    history: FrameHistory,
    frame_count: u64,
    telemetry_sender: Option<Sender<QualityEvent>>,
}

impl Default for QualityGovernor {
    fn default() -> Self {
        Self::from_valid(QualityConfig::default())
    }
}

impl QualityGovernor {
    /// Creates a governor after validating `config`.
    pub fn new(config: QualityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: QualityConfig) -> Self {
        log::debug!(
            "QualityGovernor: fast<{}ms slow>{}ms, levels {}..={} starting at {}",
            config.fast_threshold_ms,
            config.slow_threshold_ms,
            config.min_level,
            config.max_level,
            config.initial_level
        );
        Self {
            state: ControllerState::new(&config),
            config,
            history: FrameHistory::new(),
            frame_count: 0,
            telemetry_sender: None,
        }
    }

    /// Attaches a sender for level change events.
    pub fn with_event_sender(mut self, sender: Sender<QualityEvent>) -> Self {
        self.telemetry_sender = Some(sender);
        self
    }

    /// Feeds one frame timestamp (ms) and returns the level change it caused.
    pub fn on_frame(&mut self, timestamp: f64) -> Option<LevelChange> {
        self.frame_count += 1;
        let (state, outcome) = self.state.advance(timestamp);
        self.state = state;

        if let Some(delta) = outcome.delta_ms {
            self.history.push(delta);
        }
        if let Some(change) = outcome.change {
            self.report(change, false);
        }
        outcome.change
    }

    /// Jumps to `level`, clamped into the configured range.
    pub fn force_level(&mut self, level: QualityLevel) -> Option<LevelChange> {
        let change = self.state.force_level(level);
        if let Some(change) = change {
            self.report(change, true);
        }
        change
    }

    /// Returns to the freshly constructed state. The next frame is treated
    /// as the first one again.
    pub fn reset(&mut self) {
        log::debug!("QualityGovernor: Reset to level {}", self.config.initial_level);
        self.state = ControllerState::new(&self.config);
        self.history.clear();
        self.frame_count = 0;
    }

    fn report(&self, change: LevelChange, forced: bool) {
        log::info!(
            "QualityGovernor: Hair passes {} -> {} ({})",
            change.from,
            change.to,
            change_cause(change, forced)
        );

        if let Some(sender) = &self.telemetry_sender {
            match sender.try_send(QualityEvent::from(change)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::debug!("QualityGovernor: Event channel full, dropping level change");
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("QualityGovernor: Event receiver gone");
                }
            }
        }
    }

    /// The current level.
    pub fn level(&self) -> QualityLevel {
        self.state.level()
    }

    /// The current streak sums.
    pub fn sums(&self) -> FrameSums {
        self.state.sums()
    }

    /// Statistics over the recent classified frames.
    pub fn stats(&self) -> FrameStats {
        FrameStats::from_history(&self.history)
    }

    /// Frames seen since construction or the last reset.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The underlying state value.
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// The active configuration.
    pub fn config(&self) -> &QualityConfig {
        &self.config
    }
}

fn change_cause(change: LevelChange, forced: bool) -> &'static str {
    if forced {
        "forced"
    } else if change.is_escalation() {
        "headroom"
    } else {
        "slow frames"
    }
}
