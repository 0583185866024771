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

//! Loaded bundles and the host scene.

use super::nodes::{MemoryMesh, MemoryRoot};
use tressa_core::scene::{AvatarGroup, SceneBundle, SceneObject, SceneTarget};

/// The decoded content of one scene asset.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    roots: Vec<MemoryRoot>,
}

impl MemoryBundle {
    /// Wraps the top-level nodes of an asset.
    pub fn new(roots: Vec<MemoryRoot>) -> Self {
        Self { roots }
    }

    /// The top-level nodes.
    pub fn roots(&self) -> &[MemoryRoot] {
        &self.roots
    }
}

impl SceneBundle for MemoryBundle {
    type Root = MemoryRoot;

    fn object_by_name(&self, name: &str) -> Option<MemoryRoot> {
        self.roots.iter().find(|root| root.name() == name).cloned()
    }
}

/// A host scene holding whatever group was attached last.
#[derive(Default)]
pub struct MemoryScene {
    contents: Option<AvatarGroup<MemoryRoot>>,
    replacements: usize,
}

impl MemoryScene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The attached group, if any.
    pub fn contents(&self) -> Option<&AvatarGroup<MemoryRoot>> {
        self.contents.as_ref()
    }

    /// How many times the contents were replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Hair meshes currently drawn, by name, in attachment order.
    pub fn visible_hair(&self) -> Vec<String> {
        self.contents
            .iter()
            .flat_map(|group| group.hair.iter())
            .filter(|mesh: &&MemoryMesh| mesh.is_visible())
            .map(|mesh| mesh.name())
            .collect()
    }
}

impl SceneTarget<MemoryRoot> for MemoryScene {
    fn replace_contents(&mut self, group: AvatarGroup<MemoryRoot>) {
        log::debug!(
            "MemoryScene: Attaching '{}' with {} hair meshes",
            group.name,
            group.hair.len()
        );
        self.contents = Some(group);
        self.replacements += 1;
    }
}
