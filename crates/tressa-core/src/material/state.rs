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

//! Render state of a material and partial overrides of it.

use super::{BlendFactor, Blending, CompareFunction, Side};
use serde::{Deserialize, Serialize};

/// The full set of fixed-function properties a hair pass may touch.
///
/// An engine adapter reads this from its native material, the pass builder
/// edits it, and the adapter writes it back. Fields the engine does not
/// support may be ignored by the adapter.
///
/// # Examples
///
/// ```
/// use tressa_core::material::{MaterialState, Side};
///
/// let state = MaterialState {
///     side: Side::Double,
///     opacity: 0.8,
///     ..Default::default()
/// };
/// assert!(state.depth_test);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialState {
    /// Which faces are rendered.
    pub side: Side,
    /// Global opacity multiplier, `0.0..=1.0`.
    pub opacity: f32,
    /// Blending preset.
    pub blending: Blending,
    /// Destination factor of the blend equation.
    pub blend_dst: BlendFactor,
    /// Whether fragments are tested against the depth buffer.
    pub depth_test: bool,
    /// Whether fragments write to the depth buffer.
    pub depth_write: bool,
    /// Comparison used by the depth test.
    pub depth_func: CompareFunction,
    /// Fragments with alpha below this value are discarded. `0.0` disables the test.
    pub alpha_test: f32,
    /// Converts fragment alpha into an MSAA coverage mask.
    pub alpha_to_coverage: bool,
    /// PBR surface roughness.
    pub roughness: f32,
    /// Whether the material goes through the transparent render list.
    pub transparent: bool,
    /// Set when the GPU-side program/state must be rebuilt before the next draw.
    pub needs_update: bool,
}

impl Default for MaterialState {
    fn default() -> Self {
        Self {
            side: Side::Front,
            opacity: 1.0,
            blending: Blending::Normal,
            blend_dst: BlendFactor::OneMinusSrcAlpha,
            depth_test: true,
            depth_write: true,
            depth_func: CompareFunction::LessEqual,
            alpha_test: 0.0,
            alpha_to_coverage: false,
            roughness: 1.0,
            transparent: false,
            needs_update: false,
        }
    }
}

/// A sparse edit of a [`MaterialState`]. `None` keeps the authored value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOverrides {
    /// Overrides [`MaterialState::side`].
    pub side: Option<Side>,
    /// Overrides [`MaterialState::opacity`].
    pub opacity: Option<f32>,
    /// Overrides [`MaterialState::blending`].
    pub blending: Option<Blending>,
    /// Overrides [`MaterialState::blend_dst`].
    pub blend_dst: Option<BlendFactor>,
    /// Overrides [`MaterialState::depth_test`].
    pub depth_test: Option<bool>,
    /// Overrides [`MaterialState::depth_write`].
    pub depth_write: Option<bool>,
    /// Overrides [`MaterialState::depth_func`].
    pub depth_func: Option<CompareFunction>,
    /// Overrides [`MaterialState::alpha_test`].
    pub alpha_test: Option<f32>,
    /// Overrides [`MaterialState::alpha_to_coverage`].
    pub alpha_to_coverage: Option<bool>,
    /// Overrides [`MaterialState::roughness`].
    pub roughness: Option<f32>,
}

impl MaterialOverrides {
    /// Returns a copy of `state` with every set override applied.
    pub fn apply(&self, state: MaterialState) -> MaterialState {
        MaterialState {
            side: self.side.unwrap_or(state.side),
            opacity: self.opacity.unwrap_or(state.opacity),
            blending: self.blending.unwrap_or(state.blending),
            blend_dst: self.blend_dst.unwrap_or(state.blend_dst),
            depth_test: self.depth_test.unwrap_or(state.depth_test),
            depth_write: self.depth_write.unwrap_or(state.depth_write),
            depth_func: self.depth_func.unwrap_or(state.depth_func),
            alpha_test: self.alpha_test.unwrap_or(state.alpha_test),
            alpha_to_coverage: self.alpha_to_coverage.unwrap_or(state.alpha_to_coverage),
            roughness: self.roughness.unwrap_or(state.roughness),
            ..state
        }
    }

    /// `true` if no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_state() {
        let authored = MaterialState {
            side: Side::Double,
            roughness: 0.3,
            ..Default::default()
        };
        let overrides = MaterialOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(authored), authored);
    }

    #[test]
    fn test_overrides_only_touch_set_fields() {
        let authored = MaterialState {
            roughness: 0.3,
            alpha_test: 0.1,
            ..Default::default()
        };
        let overrides = MaterialOverrides {
            side: Some(Side::Back),
            depth_write: Some(false),
            ..Default::default()
        };

        let state = overrides.apply(authored);
        assert_eq!(state.side, Side::Back);
        assert!(!state.depth_write);
        assert_eq!(state.roughness, 0.3);
        assert_eq!(state.alpha_test, 0.1);
        assert!(state.depth_test);
    }

    #[test]
    fn test_overrides_never_touch_transparency_flags() {
        let authored = MaterialState {
            transparent: false,
            needs_update: false,
            ..Default::default()
        };
        let overrides = MaterialOverrides {
            opacity: Some(0.5),
            ..Default::default()
        };
        let state = overrides.apply(authored);
        assert!(!state.transparent);
        assert!(!state.needs_update);
    }

    #[test]
    fn test_overrides_parse_from_ron() {
        let overrides: MaterialOverrides =
            ron::from_str("(side: Some(Double), opacity: Some(0.8))").unwrap();
        assert_eq!(overrides.side, Some(Side::Double));
        assert_eq!(overrides.opacity, Some(0.8));
        assert!(overrides.depth_func.is_none());
    }
}
