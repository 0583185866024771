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

//! # Tressa Control
//!
//! The adaptive render-quality controller. Once per rendered frame the host
//! hands in a timestamp; the chain below turns it into, at most, a one-step
//! change of the hair pass level:
//!
//! ```text
//! FrameTimer -> FrameTrendClassifier -> QualityLevelController -> LevelChange
//! ```
//!
//! All per-frame state lives in a plain [`ControllerState`] value advanced by
//! the pure [`tick`] function. [`QualityGovernor`] wraps it for hosts that
//! prefer a stateful object with logging, statistics and telemetry.

#![warn(missing_docs)]

pub mod config;
pub mod metrics;
pub mod quality;
pub mod service;
pub mod state;
pub mod timer;
pub mod trend;

pub use config::{ConfigError, QualityConfig};
pub use metrics::{FrameHistory, FrameStats, RingBuffer};
pub use quality::QualityLevelController;
pub use service::QualityGovernor;
pub use state::{tick, ControllerState, FrameOutcome};
pub use timer::FrameTimer;
pub use trend::{FrameClass, FrameSums, FrameTrendClassifier};
