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

//! Texture, skeleton and material handles.

use super::device::{MemoryDevice, ResourceId, ResourceKind};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tressa_core::material::MaterialState;
use tressa_core::scene::{Cloneable, Disposable, PassMaterial};

/// A single device allocation released at most once.
#[derive(Debug)]
struct Allocation {
    id: ResourceId,
    device: MemoryDevice,
    disposed: AtomicBool,
}

impl Allocation {
    fn new(device: &MemoryDevice, kind: ResourceKind, label: &str) -> Self {
        Self {
            id: device.allocate(kind, label),
            device: device.clone(),
            disposed: AtomicBool::new(false),
        }
    }

    fn release(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            self.device.release(self.id);
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

/// Shared handle to a texture.
#[derive(Debug, Clone)]
pub struct MemoryTexture {
    inner: Arc<Allocation>,
}

impl MemoryTexture {
    /// Allocates a texture on `device`.
    pub fn new(device: &MemoryDevice, label: &str) -> Self {
        Self {
            inner: Arc::new(Allocation::new(device, ResourceKind::Texture, label)),
        }
    }

    /// The device id.
    pub fn id(&self) -> ResourceId {
        self.inner.id
    }

    /// `true` once released.
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

impl Disposable for MemoryTexture {
    fn dispose(&self) {
        self.inner.release();
    }
}

/// Shared handle to a skeleton.
#[derive(Debug, Clone)]
pub struct MemorySkeleton {
    inner: Arc<Allocation>,
    bones: usize,
}

impl MemorySkeleton {
    /// Allocates a skeleton with `bones` joints on `device`.
    pub fn new(device: &MemoryDevice, label: &str, bones: usize) -> Self {
        Self {
            inner: Arc::new(Allocation::new(device, ResourceKind::Skeleton, label)),
            bones,
        }
    }

    /// The device id.
    pub fn id(&self) -> ResourceId {
        self.inner.id
    }

    /// Number of joints.
    pub fn bone_count(&self) -> usize {
        self.bones
    }

    /// `true` once released.
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

impl Disposable for MemorySkeleton {
    fn dispose(&self) {
        self.inner.release();
    }
}

#[derive(Debug)]
struct MaterialInternal {
    allocation: Allocation,
    label: String,
    state: RwLock<MaterialState>,
    textures: Vec<MemoryTexture>,
}

/// Shared handle to a material.
///
/// [`Cloneable::duplicate`] allocates a new material with a copy of the render
/// state; the texture handles are shared with the source, the way engines
/// share image data between material clones.
#[derive(Debug, Clone)]
pub struct MemoryMaterial {
    internal: Arc<MaterialInternal>,
}

impl MemoryMaterial {
    /// Allocates a material sampling `textures`.
    pub fn new(
        device: &MemoryDevice,
        label: &str,
        state: MaterialState,
        textures: Vec<MemoryTexture>,
    ) -> Self {
        Self {
            internal: Arc::new(MaterialInternal {
                allocation: Allocation::new(device, ResourceKind::Material, label),
                label: label.to_owned(),
                state: RwLock::new(state),
                textures,
            }),
        }
    }

    /// The device id.
    pub fn id(&self) -> ResourceId {
        self.internal.allocation.id
    }

    /// Debug label.
    pub fn label(&self) -> &str {
        &self.internal.label
    }

    /// Every texture the material samples.
    pub fn textures(&self) -> &[MemoryTexture] {
        &self.internal.textures
    }

    /// `true` once released.
    pub fn is_disposed(&self) -> bool {
        self.internal.allocation.is_disposed()
    }

    /// `true` if both handles point at the same material.
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.internal, &other.internal)
    }
}

impl Cloneable for MemoryMaterial {
    fn duplicate(&self) -> Self {
        let device = self.internal.allocation.device.clone();
        Self::new(
            &device,
            &self.internal.label,
            *self.internal.state.read(),
            self.internal.textures.clone(),
        )
    }
}

impl Disposable for MemoryMaterial {
    fn dispose(&self) {
        self.internal.allocation.release();
    }
}

impl PassMaterial for MemoryMaterial {
    fn render_state(&self) -> MaterialState {
        *self.internal.state.read()
    }

    fn set_render_state(&self, state: MaterialState) {
        *self.internal.state.write() = state;
    }
}
