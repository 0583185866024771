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

//! Frame-driven coupling of the quality governor and the avatar model.

use super::model::AvatarModel;
use tressa_control::{ConfigError, QualityGovernor};
use tressa_core::scene::{AvatarRoot, SceneBundle, SceneLoader, SceneTarget};
use tressa_core::{LevelChange, LoadError, QualityLevel};

/// Connects the frame-driven [`QualityGovernor`] to an [`AvatarModel`].
///
/// The render loop calls [`on_frame`](Self::on_frame) once per frame; level
/// changes are forwarded to the model's hair variants.
pub struct AvatarSession<R: AvatarRoot> {
    governor: QualityGovernor,
    model: AvatarModel<R>,
}

impl<R: AvatarRoot> AvatarSession<R> {
    /// Wires `governor` to `model`, aligning the model with the governor's
    /// current level.
    ///
    /// Fails if the governor may select a level the model's pass table has
    /// no hair profile for.
    pub fn new(
        governor: QualityGovernor,
        mut model: AvatarModel<R>,
    ) -> Result<Self, ConfigError> {
        governor.config().validate_for_table(model.table())?;
        model.apply_level(governor.level());
        Ok(Self { governor, model })
    }

    /// Feeds one frame timestamp (ms).
    pub fn on_frame(&mut self, timestamp: f64) -> Option<LevelChange> {
        let change = self.governor.on_frame(timestamp)?;
        self.model.apply_level(change.to);
        Some(change)
    }

    /// Loads an avatar into the model.
    pub async fn load<L>(&mut self, loader: &L, url: &str) -> Result<(), LoadError>
    where
        L: SceneLoader,
        L::Bundle: SceneBundle<Root = R>,
    {
        self.model.load(loader, url).await
    }

    /// Attaches the avatar to `scene` at the highest level and moves the
    /// governor there too.
    pub fn add_to_scene<S>(&mut self, scene: &mut S) -> Result<QualityLevel, LoadError>
    where
        S: SceneTarget<R>,
    {
        let level = self.model.add_to_scene(scene)?;
        self.governor.force_level(level);
        Ok(level)
    }

    /// The governor.
    pub fn governor(&self) -> &QualityGovernor {
        &self.governor
    }

    /// The governor, for forcing levels or resetting.
    pub fn governor_mut(&mut self) -> &mut QualityGovernor {
        &mut self.governor
    }

    /// The model.
    pub fn model(&self) -> &AvatarModel<R> {
        &self.model
    }

    /// The model, for the two-phase loading API.
    pub fn model_mut(&mut self) -> &mut AvatarModel<R> {
        &mut self.model
    }

    /// Disposes the loaded avatar.
    pub fn clear(&mut self) {
        self.model.clear();
    }
}
