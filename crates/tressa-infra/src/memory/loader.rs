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

//! A scene loader serving avatars described as data.

use super::device::MemoryDevice;
use super::nodes::{MemoryMesh, MemoryRoot};
use super::resources::{MemoryMaterial, MemorySkeleton, MemoryTexture};
use super::scene::MemoryBundle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tressa_core::material::MaterialState;
use tressa_core::scene::{SceneLoader, AVATAR_ROOT_NODE, HAIR_NODE};
use tressa_core::BoxedError;

/// Failures of [`MemorySceneLoader`].
#[derive(Debug, Error)]
pub enum MemoryLoadError {
    /// Nothing is registered under the requested url.
    #[error("no avatar asset registered at '{url}'")]
    NotFound {
        /// The requested url.
        url: String,
    },
}

/// Description of one mesh of an avatar asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshBlueprint {
    /// Node name.
    pub name: String,
    /// Labels of the textures sampled by the material.
    pub textures: Vec<String>,
    /// Render state of the material; `None` for a mesh without material.
    pub material: Option<MaterialState>,
    /// Joint count; `None` for a static mesh.
    pub bones: Option<usize>,
}

impl Default for MeshBlueprint {
    fn default() -> Self {
        Self {
            name: String::new(),
            textures: Vec::new(),
            material: Some(MaterialState::default()),
            bones: Some(64),
        }
    }
}

impl MeshBlueprint {
    /// A skinned mesh with a default material sampling `textures`.
    pub fn skinned(name: &str, textures: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            textures: textures.iter().map(|t| (*t).to_owned()).collect(),
            ..Default::default()
        }
    }
}

/// Description of an avatar asset: one root node and its meshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarBlueprint {
    /// Name of the root node.
    pub root: String,
    /// Children of the root.
    pub meshes: Vec<MeshBlueprint>,
}

impl Default for AvatarBlueprint {
    fn default() -> Self {
        Self {
            root: AVATAR_ROOT_NODE.to_owned(),
            meshes: Vec::new(),
        }
    }
}

impl AvatarBlueprint {
    /// Body, eyes and a hair mesh.
    pub fn with_hair() -> Self {
        let mut blueprint = Self::without_hair();
        blueprint
            .meshes
            .push(MeshBlueprint::skinned(HAIR_NODE, &["hair_albedo", "hair_normal"]));
        blueprint
    }

    /// Body and eyes only.
    pub fn without_hair() -> Self {
        Self {
            root: AVATAR_ROOT_NODE.to_owned(),
            meshes: vec![
                MeshBlueprint::skinned("body", &["body_albedo", "body_normal"]),
                MeshBlueprint::skinned("eyes", &["eyes_albedo"]),
            ],
        }
    }

    /// Allocates every resource of the blueprint on `device`.
    pub fn instantiate(&self, device: &MemoryDevice) -> MemoryBundle {
        let children = self
            .meshes
            .iter()
            .map(|mesh| {
                let material = mesh.material.map(|state| {
                    let textures = mesh
                        .textures
                        .iter()
                        .map(|label| MemoryTexture::new(device, label))
                        .collect();
                    MemoryMaterial::new(device, &mesh.name, state, textures)
                });
                let skeleton = mesh
                    .bones
                    .map(|bones| MemorySkeleton::new(device, &mesh.name, bones));
                MemoryMesh::new(&mesh.name, material, skeleton)
            })
            .collect();
        MemoryBundle::new(vec![MemoryRoot::new(&self.root, children)])
    }
}

/// Serves registered [`AvatarBlueprint`]s by url, allocating fresh resources
/// on every fetch.
#[derive(Debug, Clone, Default)]
pub struct MemorySceneLoader {
    device: MemoryDevice,
    assets: HashMap<String, AvatarBlueprint>,
}

impl MemorySceneLoader {
    /// A loader allocating on `device` with no assets.
    pub fn new(device: MemoryDevice) -> Self {
        Self {
            device,
            assets: HashMap::new(),
        }
    }

    /// Registers `blueprint` under `url`.
    pub fn with_asset(mut self, url: impl Into<String>, blueprint: AvatarBlueprint) -> Self {
        self.insert(url, blueprint);
        self
    }

    /// Registers `blueprint` under `url`, replacing any previous entry.
    pub fn insert(&mut self, url: impl Into<String>, blueprint: AvatarBlueprint) {
        self.assets.insert(url.into(), blueprint);
    }

    /// The device resources are allocated on.
    pub fn device(&self) -> &MemoryDevice {
        &self.device
    }
}

#[async_trait]
impl SceneLoader for MemorySceneLoader {
    type Bundle = MemoryBundle;

    async fn fetch(&self, url: &str) -> Result<MemoryBundle, BoxedError> {
        let blueprint = self
            .assets
            .get(url)
            .ok_or_else(|| MemoryLoadError::NotFound { url: url.to_owned() })?;
        log::debug!(
            "MemorySceneLoader: Instantiating '{}' ({} meshes)",
            url,
            blueprint.meshes.len()
        );
        Ok(blueprint.instantiate(&self.device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ResourceKind;
    use tressa_core::scene::{AvatarRoot, HasMaterial, SceneBundle};

    #[tokio::test]
    async fn test_fetch_allocates_fresh_resources() {
        let device = MemoryDevice::new();
        let loader = MemorySceneLoader::new(device.clone())
            .with_asset("avatar.glb", AvatarBlueprint::with_hair());

        let first = loader.fetch("avatar.glb").await.unwrap();
        let second = loader.fetch("avatar.glb").await.unwrap();
        assert_eq!(device.live_count(ResourceKind::Material), 6);

        let a = first.object_by_name(AVATAR_ROOT_NODE).unwrap();
        let b = second.object_by_name(AVATAR_ROOT_NODE).unwrap();
        assert!(!a.same_node(&b));
        assert!(a.find_child(HAIR_NODE).unwrap().material().is_some());
    }

    #[tokio::test]
    async fn test_unknown_url_fails() {
        let loader = MemorySceneLoader::default();
        let err = loader.fetch("missing.glb").await.unwrap_err();
        assert!(err.to_string().contains("missing.glb"));
    }

    #[test]
    fn test_blueprint_from_ron() {
        let blueprint: AvatarBlueprint = ron::from_str(
            r#"(
                meshes: [
                    (name: "haircut", textures: ["hair"]),
                    (name: "hat", material: None, bones: None),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(blueprint.root, AVATAR_ROOT_NODE);
        assert_eq!(blueprint.meshes[0].bones, Some(64));
        assert!(blueprint.meshes[1].material.is_none());
    }
}
