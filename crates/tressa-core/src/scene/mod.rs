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

//! Capability traits an external 3D engine implements to host an avatar.
//!
//! Engine objects are assumed to be *handles*: `Clone` on a handle yields a
//! second reference to the same node, mesh or material, the way scene graph
//! objects behave in most engines. A deep copy is requested explicitly with
//! [`Cloneable::duplicate`].
//!
//! The pass builder and the avatar model depend only on these traits, so any
//! engine that can clone a mesh, swap its material, toggle its visibility and
//! release its GPU resources can host the hair quality controller.

use crate::error::BoxedError;
use crate::material::MaterialState;
use async_trait::async_trait;

/// Name of the node that holds the avatar inside a loaded scene bundle.
pub const AVATAR_ROOT_NODE: &str = "AvatarRoot";
/// Name of the authored hair mesh under the avatar root.
pub const HAIR_NODE: &str = "haircut";
/// Name of the group the avatar is attached under.
pub const AVATAR_GROUP_NODE: &str = "AvatarGroup";

/// An object holding GPU-backed resources that must be released explicitly.
pub trait Disposable {
    /// Releases the GPU resources behind this object.
    ///
    /// Must be idempotent: disposing an already disposed object is a no-op.
    fn dispose(&self);
}

/// An object that can produce an independent deep copy of itself.
pub trait Cloneable: Sized {
    /// Returns a new object that shares no mutable state with `self`.
    fn duplicate(&self) -> Self;
}

/// A named node of the engine's scene graph.
pub trait SceneObject: Clone + Send + Sync + 'static {
    /// The node's name.
    fn name(&self) -> String;
    /// Renames the node.
    fn set_name(&self, name: &str);
    /// Whether the node is drawn.
    fn is_visible(&self) -> bool;
    /// Shows or hides the node.
    fn set_visible(&self, visible: bool);
}

/// An engine material whose fixed-function state can be edited.
pub trait PassMaterial: Cloneable + Disposable + Clone + Send + Sync + 'static {
    /// Reads the current render state.
    fn render_state(&self) -> MaterialState;
    /// Replaces the render state.
    fn set_render_state(&self, state: MaterialState);
}

/// An object that carries a material.
pub trait HasMaterial {
    /// The engine's material handle type.
    type Material: PassMaterial;

    /// The current material, if any.
    fn material(&self) -> Option<Self::Material>;
    /// Assigns a material.
    fn set_material(&self, material: Self::Material);
}

/// Everything the pass builder needs from a hair mesh.
pub trait HairMesh: SceneObject + Cloneable + Disposable + HasMaterial {}

impl<T> HairMesh for T where T: SceneObject + Cloneable + Disposable + HasMaterial {}

/// The root node of a loaded avatar.
///
/// Disposing the root releases every skinned mesh below it.
pub trait AvatarRoot: SceneObject + Disposable {
    /// The engine's mesh handle type.
    type Mesh: HairMesh;

    /// Finds a direct child mesh by name.
    fn find_child(&self, name: &str) -> Option<Self::Mesh>;
}

/// A freshly loaded scene asset.
pub trait SceneBundle: Send + 'static {
    /// The root node type this bundle yields.
    type Root: AvatarRoot;

    /// Looks up a node anywhere in the bundle by name.
    fn object_by_name(&self, name: &str) -> Option<Self::Root>;
}

/// Fetches and parses scene assets.
///
/// Fetching is the only suspending operation of the avatar pipeline. The
/// returned bundle is fully decoded; its GPU resources belong to the caller.
#[async_trait]
pub trait SceneLoader: Send + Sync {
    /// The bundle type produced by this loader.
    type Bundle: SceneBundle;

    /// Fetches and decodes the asset at `url`.
    async fn fetch(&self, url: &str) -> Result<Self::Bundle, BoxedError>;
}

/// The nodes handed to the host scene on attachment.
#[derive(Clone)]
pub struct AvatarGroup<R: AvatarRoot> {
    /// Name of the group node.
    pub name: String,
    /// The avatar root.
    pub root: R,
    /// The authored hair mesh followed by every derived variant, in table order.
    pub hair: Vec<R::Mesh>,
}

/// A host scene the avatar can be attached to.
pub trait SceneTarget<R: AvatarRoot> {
    /// Clears all prior content and adds `group` as the only child.
    fn replace_contents(&mut self, group: AvatarGroup<R>);
}
