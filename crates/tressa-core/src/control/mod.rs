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

//! Shared vocabulary between the quality controller and the avatar model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The number of transparency passes used to render hair.
///
/// Higher levels look better and cost more. Level `1` is a single draw of
/// the authored mesh; the default pass table goes up to level `3`.
/// A level is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QualityLevel(u8);

impl QualityLevel {
    /// Single pass, cheapest.
    pub const LOW: Self = Self(1);
    /// Two layered passes.
    pub const MEDIUM: Self = Self(2);
    /// Three passes, most expensive.
    pub const HIGH: Self = Self(3);

    /// Creates a level from a pass count. Returns `None` for zero.
    pub const fn new(passes: u8) -> Option<Self> {
        if passes == 0 {
            None
        } else {
            Some(Self(passes))
        }
    }

    /// Returns the pass count of this level.
    pub const fn passes(self) -> u8 {
        self.0
    }

    /// The next level up, saturating at `u8::MAX`.
    pub const fn raised(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The next level down, never going below one pass.
    pub const fn lowered(self) -> Self {
        if self.0 > 1 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl Default for QualityLevel {
    fn default() -> Self {
        Self::LOW
    }
}

impl TryFrom<u8> for QualityLevel {
    type Error = String;

    fn try_from(passes: u8) -> Result<Self, Self::Error> {
        Self::new(passes).ok_or_else(|| "quality level must be at least 1".to_string())
    }
}

impl From<QualityLevel> for u8 {
    fn from(level: QualityLevel) -> Self {
        level.0
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-pass", self.0)
    }
}

/// A single step of the quality level, emitted when the controller moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Level before the change.
    pub from: QualityLevel,
    /// Level after the change.
    pub to: QualityLevel,
}

impl LevelChange {
    /// `true` when the change raises quality.
    pub fn is_escalation(&self) -> bool {
        self.to > self.from
    }
}
