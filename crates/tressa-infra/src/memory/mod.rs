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

//! Headless engine adapter keeping every object in process memory.
//!
//! Handles are reference counted and interior-mutable, the way scene graph
//! handles of real engines behave. Each GPU-backed resource is registered
//! with a [`MemoryDevice`], which makes leaks and double releases visible.

mod device;
mod loader;
mod nodes;
mod resources;
mod scene;

pub use device::{MemoryDevice, ResourceId, ResourceKind};
pub use loader::{AvatarBlueprint, MemoryLoadError, MemorySceneLoader, MeshBlueprint};
pub use nodes::{MemoryMesh, MemoryRoot};
pub use resources::{MemoryMaterial, MemorySkeleton, MemoryTexture};
pub use scene::{MemoryBundle, MemoryScene};
