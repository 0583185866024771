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

//! Event types for quality and load telemetry.

use crate::control::{LevelChange, QualityLevel};

/// A notable state change, sent over an optional channel to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum QualityEvent {
    /// The hair pass level moved by one step.
    LevelChanged {
        /// Previous level.
        from: QualityLevel,
        /// New level.
        to: QualityLevel,
    },
    /// An avatar finished loading and is ready to attach.
    AvatarLoaded {
        /// The loaded location.
        url: String,
        /// Whether the avatar has a hair node (and thus pass switching).
        has_hair: bool,
    },
    /// An avatar load failed; the model is left cleared.
    AvatarLoadFailed {
        /// The requested location.
        url: String,
        /// Human-readable failure.
        reason: String,
    },
    /// A load completed after a newer one was requested and was discarded.
    LoadSuperseded {
        /// The discarded location.
        url: String,
        /// Sequence number of the discarded request.
        ticket: u64,
    },
}

impl From<LevelChange> for QualityEvent {
    fn from(change: LevelChange) -> Self {
        QualityEvent::LevelChanged {
            from: change.from,
            to: change.to,
        }
    }
}
