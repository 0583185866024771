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

//! Derivation of the hair pass variants from the authored mesh.

use super::pass_set::{HairPassProfile, HairPassSet};
use tressa_core::pass::{HairPassTable, PassDescriptor, PassVariants};
use tressa_core::scene::{Cloneable, HairMesh, HasMaterial, PassMaterial, SceneObject};
use tressa_core::PassBuildError;

/// Clones the authored hair mesh once per derived table entry.
///
/// The source mesh and its material are never modified: every variant gets
/// its own mesh node and its own material instance, so changing the render
/// state of one variant cannot leak into another.
#[derive(Debug, Clone, Default)]
pub struct HairPassProfileBuilder {
    table: HairPassTable,
}

impl HairPassProfileBuilder {
    /// Creates a builder for `table`.
    pub fn new(table: HairPassTable) -> Self {
        Self { table }
    }

    /// The table variants are derived from.
    pub fn table(&self) -> &HairPassTable {
        &self.table
    }

    /// Builds one profile per table level from `mesh`.
    ///
    /// Fails if `mesh` has no material, before anything is allocated.
    pub fn build<M: HairMesh>(&self, mesh: &M) -> Result<HairPassSet<M>, PassBuildError> {
        let source = mesh.material().ok_or_else(|| PassBuildError::MissingMaterial {
            mesh: mesh.name(),
        })?;

        let profiles: Vec<_> = self
            .table
            .levels()
            .iter()
            .map(|row| match &row.variants {
                PassVariants::Original => HairPassProfile::original(row.level, mesh.clone()),
                PassVariants::Derived(passes) => HairPassProfile::derived(
                    row.level,
                    passes
                        .iter()
                        .map(|pass| Self::derive(mesh, &source, pass))
                        .collect(),
                ),
            })
            .collect();

        log::debug!(
            "HairPassProfileBuilder: Derived {} variants of '{}' over {} levels",
            self.table.derived_variant_count(),
            mesh.name(),
            profiles.len()
        );
        Ok(HairPassSet::new(mesh.clone(), profiles))
    }

    fn derive<M: HairMesh>(mesh: &M, source: &M::Material, pass: &PassDescriptor) -> M {
        let material = source.duplicate();
        let mut state = pass.overrides.apply(material.render_state());
        state.transparent = true;
        state.needs_update = true;
        material.set_render_state(state);

        let variant = mesh.duplicate();
        variant.set_name(&pass.name);
        variant.set_material(material);
        variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tressa_core::material::{BlendFactor, CompareFunction, MaterialState, Side};
    use tressa_core::QualityLevel;
    use tressa_infra::memory::{MemoryDevice, MemoryMaterial, MemoryMesh, MemoryTexture};

    fn hair(device: &MemoryDevice) -> MemoryMesh {
        let texture = MemoryTexture::new(device, "hair_albedo");
        let material = MemoryMaterial::new(device, "hair", MaterialState::default(), vec![texture]);
        MemoryMesh::new("haircut", Some(material), None)
    }

    #[test]
    fn test_standard_table_yields_five_variants() {
        let device = MemoryDevice::new();
        let mesh = hair(&device);
        let set = HairPassProfileBuilder::default().build(&mesh).unwrap();

        let names: Vec<_> = set.meshes().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            ["haircut", "haircut2a", "haircut2b", "haircut3a", "haircut3b", "haircut3c"]
        );
        assert_eq!(set.profile(QualityLevel::MEDIUM).unwrap().meshes().len(), 2);
        assert_eq!(set.profile(QualityLevel::HIGH).unwrap().meshes().len(), 3);
        assert!(set.profile(QualityLevel::LOW).unwrap().is_original());
    }

    #[test]
    fn test_variant_materials_follow_table() {
        let device = MemoryDevice::new();
        let set = HairPassProfileBuilder::default().build(&hair(&device)).unwrap();
        let level2 = set.profile(QualityLevel::MEDIUM).unwrap().meshes();

        let a = level2[0].material().unwrap().render_state();
        assert_eq!(a.side, Side::Double);
        assert_eq!(a.opacity, 0.8);
        assert!(!a.depth_write);
        assert_eq!(a.depth_func, CompareFunction::Less);
        assert_eq!(a.blend_dst, BlendFactor::OneMinusDstColor);
        assert_eq!(a.roughness, 0.6);
        assert!(a.transparent && a.needs_update);

        let b = level2[1].material().unwrap().render_state();
        assert_eq!(b.side, Side::Front);
        assert_eq!(b.alpha_test, 0.65);
        assert!(b.depth_write, "level 2b keeps the authored depth write");

        let level3 = set.profile(QualityLevel::HIGH).unwrap().meshes();
        let c = level3[2].material().unwrap().render_state();
        assert!(c.alpha_to_coverage && c.depth_write);
    }

    #[test]
    fn test_source_is_untouched() {
        let device = MemoryDevice::new();
        let mesh = hair(&device);
        let before = mesh.material().unwrap().render_state();
        let _set = HairPassProfileBuilder::default().build(&mesh).unwrap();

        assert_eq!(mesh.name(), "haircut");
        assert_eq!(mesh.material().unwrap().render_state(), before);
    }

    #[test]
    fn test_missing_material_fails_without_allocating() {
        let device = MemoryDevice::new();
        let mesh = MemoryMesh::new("haircut", None, None);
        let err = HairPassProfileBuilder::default().build(&mesh).err().unwrap();
        assert!(matches!(err, PassBuildError::MissingMaterial { ref mesh } if mesh == "haircut"));
        assert_eq!(device.live_total(), 0);
    }
}
