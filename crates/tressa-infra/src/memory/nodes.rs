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

//! Scene graph nodes: meshes and the avatar root.

use super::resources::{MemoryMaterial, MemorySkeleton};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tressa_core::scene::{AvatarRoot, Cloneable, Disposable, HasMaterial, SceneObject};

#[derive(Debug)]
struct NodeState {
    name: RwLock<String>,
    visible: AtomicBool,
}

impl NodeState {
    fn new(name: &str, visible: bool) -> Self {
        Self {
            name: RwLock::new(name.to_owned()),
            visible: AtomicBool::new(visible),
        }
    }
}

#[derive(Debug)]
struct MeshInternal {
    node: NodeState,
    material: RwLock<Option<MemoryMaterial>>,
    skeleton: Option<MemorySkeleton>,
}

/// Shared handle to a (possibly skinned) mesh node.
///
/// [`Cloneable::duplicate`] creates a new node that initially shares the
/// source's material and skeleton, matching how engines clone scene nodes.
#[derive(Debug, Clone)]
pub struct MemoryMesh {
    internal: Arc<MeshInternal>,
}

impl MemoryMesh {
    /// Creates a visible mesh node.
    pub fn new(
        name: &str,
        material: Option<MemoryMaterial>,
        skeleton: Option<MemorySkeleton>,
    ) -> Self {
        Self {
            internal: Arc::new(MeshInternal {
                node: NodeState::new(name, true),
                material: RwLock::new(material),
                skeleton,
            }),
        }
    }

    /// The skeleton, if the mesh is skinned.
    pub fn skeleton(&self) -> Option<&MemorySkeleton> {
        self.internal.skeleton.as_ref()
    }

    /// `true` for skinned meshes.
    pub fn is_skinned(&self) -> bool {
        self.internal.skeleton.is_some()
    }

    /// `true` if both handles point at the same node.
    pub fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.internal, &other.internal)
    }
}

impl SceneObject for MemoryMesh {
    fn name(&self) -> String {
        self.internal.node.name.read().clone()
    }

    fn set_name(&self, name: &str) {
        *self.internal.node.name.write() = name.to_owned();
    }

    fn is_visible(&self) -> bool {
        self.internal.node.visible.load(Ordering::Relaxed)
    }

    fn set_visible(&self, visible: bool) {
        self.internal.node.visible.store(visible, Ordering::Relaxed);
    }
}

impl Cloneable for MemoryMesh {
    fn duplicate(&self) -> Self {
        Self {
            internal: Arc::new(MeshInternal {
                node: NodeState::new(&self.name(), self.is_visible()),
                material: RwLock::new(self.material()),
                skeleton: self.internal.skeleton.clone(),
            }),
        }
    }
}

impl Disposable for MemoryMesh {
    /// Releases every texture of the material, the material and the skeleton.
    fn dispose(&self) {
        if let Some(material) = self.material() {
            for texture in material.textures() {
                texture.dispose();
            }
            material.dispose();
        }
        if let Some(skeleton) = &self.internal.skeleton {
            skeleton.dispose();
        }
    }
}

impl HasMaterial for MemoryMesh {
    type Material = MemoryMaterial;

    fn material(&self) -> Option<MemoryMaterial> {
        self.internal.material.read().clone()
    }

    fn set_material(&self, material: MemoryMaterial) {
        *self.internal.material.write() = Some(material);
    }
}

#[derive(Debug)]
struct RootInternal {
    node: NodeState,
    children: Vec<MemoryMesh>,
}

/// Shared handle to the root node of a loaded avatar.
#[derive(Debug, Clone)]
pub struct MemoryRoot {
    internal: Arc<RootInternal>,
}

impl MemoryRoot {
    /// Creates a visible root over `children`.
    pub fn new(name: &str, children: Vec<MemoryMesh>) -> Self {
        Self {
            internal: Arc::new(RootInternal {
                node: NodeState::new(name, true),
                children,
            }),
        }
    }

    /// Direct children.
    pub fn children(&self) -> &[MemoryMesh] {
        &self.internal.children
    }

    /// `true` if both handles point at the same node.
    pub fn same_node(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.internal, &other.internal)
    }
}

impl SceneObject for MemoryRoot {
    fn name(&self) -> String {
        self.internal.node.name.read().clone()
    }

    fn set_name(&self, name: &str) {
        *self.internal.node.name.write() = name.to_owned();
    }

    fn is_visible(&self) -> bool {
        self.internal.node.visible.load(Ordering::Relaxed)
    }

    fn set_visible(&self, visible: bool) {
        self.internal.node.visible.store(visible, Ordering::Relaxed);
    }
}

impl Disposable for MemoryRoot {
    /// Disposes every skinned child. Static children own nothing the avatar
    /// pipeline allocates.
    fn dispose(&self) {
        for child in self.internal.children.iter().filter(|c| c.is_skinned()) {
            child.dispose();
        }
    }
}

impl AvatarRoot for MemoryRoot {
    type Mesh = MemoryMesh;

    fn find_child(&self, name: &str) -> Option<MemoryMesh> {
        self.internal
            .children
            .iter()
            .find(|child| child.name() == name)
            .cloned()
    }
}
