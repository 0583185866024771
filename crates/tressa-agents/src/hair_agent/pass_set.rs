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

//! The per-level mesh groups of a prepared hair mesh.

use tressa_core::scene::{Disposable, HairMesh, SceneObject};
use tressa_core::QualityLevel;

/// The meshes drawn at one quality level.
#[derive(Clone)]
pub struct HairPassProfile<M: HairMesh> {
    level: QualityLevel,
    meshes: Vec<M>,
    original: bool,
}

impl<M: HairMesh> HairPassProfile<M> {
    pub(crate) fn original(level: QualityLevel, mesh: M) -> Self {
        Self {
            level,
            meshes: vec![mesh],
            original: true,
        }
    }

    pub(crate) fn derived(level: QualityLevel, meshes: Vec<M>) -> Self {
        Self {
            level,
            meshes,
            original: false,
        }
    }

    /// The level that selects this profile.
    pub fn level(&self) -> QualityLevel {
        self.level
    }

    /// The meshes of this profile, in draw order.
    pub fn meshes(&self) -> &[M] {
        &self.meshes
    }

    /// `true` if this profile draws the authored mesh itself.
    pub fn is_original(&self) -> bool {
        self.original
    }

    fn set_visible(&self, visible: bool) {
        for mesh in &self.meshes {
            mesh.set_visible(visible);
        }
    }
}

/// The authored hair mesh together with one profile per table level.
///
/// Exactly one profile is visible after [`apply_level`](Self::apply_level).
#[derive(Clone)]
pub struct HairPassSet<M: HairMesh> {
    original: M,
    profiles: Vec<HairPassProfile<M>>,
}

impl<M: HairMesh> HairPassSet<M> {
    pub(crate) fn new(original: M, profiles: Vec<HairPassProfile<M>>) -> Self {
        Self { original, profiles }
    }

    /// Shows the profile of `level` and hides every other one.
    ///
    /// Returns `false`, leaving visibility untouched, if no profile has that
    /// level.
    pub fn apply_level(&self, level: QualityLevel) -> bool {
        if self.profile(level).is_none() {
            log::warn!("HairPassSet: No hair profile for level {}", level);
            return false;
        }

        // The authored mesh is hidden unless a profile draws it.
        self.original.set_visible(false);
        for profile in &self.profiles {
            profile.set_visible(profile.level == level);
        }
        true
    }

    /// The authored mesh.
    pub fn original(&self) -> &M {
        &self.original
    }

    /// The profile selected by `level`.
    pub fn profile(&self, level: QualityLevel) -> Option<&HairPassProfile<M>> {
        self.profiles.iter().find(|p| p.level == level)
    }

    /// All profiles in table order.
    pub fn profiles(&self) -> &[HairPassProfile<M>] {
        &self.profiles
    }

    /// The authored mesh followed by every derived mesh, in table order.
    pub fn meshes(&self) -> Vec<M> {
        std::iter::once(self.original.clone())
            .chain(
                self.profiles
                    .iter()
                    .filter(|p| !p.original)
                    .flat_map(|p| p.meshes.iter().cloned()),
            )
            .collect()
    }

    /// Names of the visible meshes.
    pub fn visible_names(&self) -> Vec<String> {
        self.meshes()
            .iter()
            .filter(|mesh| mesh.is_visible())
            .map(|mesh| mesh.name())
            .collect()
    }

    /// Releases every derived mesh and the authored one.
    pub fn dispose(&self) {
        for profile in self.profiles.iter().filter(|p| !p.original) {
            for mesh in &profile.meshes {
                mesh.dispose();
            }
        }
        self.original.dispose();
    }
}
