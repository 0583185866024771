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

//! The hair transparency pass table.
//!
//! Each quality level maps to a group of mesh variants that are drawn
//! together. Level 1 draws the authored mesh once. Level 2 layers a
//! double-sided, depth-write-free pass under an alpha-tested front pass.
//! Level 3 draws back faces, then front faces without depth writes, then
//! front faces again with depth writes and alpha-to-coverage, which sorts
//! most strands correctly without an order-independent transparency buffer.
//!
//! The table is data so alternate strategies can be loaded from RON.

use crate::control::QualityLevel;
use crate::error::PassTableError;
use crate::material::{BlendFactor, Blending, CompareFunction, MaterialOverrides, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single derived draw of the hair mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassDescriptor {
    /// Name given to the cloned mesh.
    pub name: String,
    /// Edits applied to a clone of the authored material.
    #[serde(default)]
    pub overrides: MaterialOverrides,
}

impl PassDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, overrides: MaterialOverrides) -> Self {
        Self {
            name: name.into(),
            overrides,
        }
    }
}

/// What a level draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PassVariants {
    /// The authored hair mesh, untouched.
    Original,
    /// Clones of the authored mesh, drawn in list order.
    Derived(Vec<PassDescriptor>),
}

impl PassVariants {
    /// Number of draws at this level.
    pub fn draw_count(&self) -> usize {
        match self {
            PassVariants::Original => 1,
            PassVariants::Derived(passes) => passes.len(),
        }
    }
}

/// One row of the pass table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassLevelDescriptor {
    /// The quality level this row is selected by.
    pub level: QualityLevel,
    /// The draws of this level.
    pub variants: PassVariants,
}

/// Validated, ordered list of pass levels.
///
/// Levels are contiguous from one, so the controller can move by a single
/// step without skipping a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PassLevelDescriptor>", into = "Vec<PassLevelDescriptor>")]
pub struct HairPassTable {
    levels: Vec<PassLevelDescriptor>,
}

impl HairPassTable {
    /// Validates and wraps a list of levels.
    pub fn new(levels: Vec<PassLevelDescriptor>) -> Result<Self, PassTableError> {
        if levels.is_empty() {
            return Err(PassTableError::Empty);
        }

        let mut expected = QualityLevel::LOW;
        let mut originals = 0;
        let mut names = HashSet::new();

        for row in &levels {
            if row.level != expected {
                return Err(PassTableError::NonContiguous {
                    expected,
                    found: row.level,
                });
            }
            match &row.variants {
                PassVariants::Original => originals += 1,
                PassVariants::Derived(passes) => {
                    if passes.is_empty() {
                        return Err(PassTableError::EmptyLevel(row.level));
                    }
                    for pass in passes {
                        if pass.name.is_empty() {
                            return Err(PassTableError::EmptyName(row.level));
                        }
                        if !names.insert(pass.name.as_str()) {
                            return Err(PassTableError::DuplicateName(pass.name.clone()));
                        }
                    }
                }
            }
            expected = expected.raised();
        }

        if originals > 1 {
            return Err(PassTableError::MultipleOriginal);
        }

        Ok(Self { levels })
    }

    /// The three-level table used for avatar hair.
    pub fn standard() -> Self {
        let level2 = vec![
            PassDescriptor::new(
                "haircut2a",
                MaterialOverrides {
                    side: Some(Side::Double),
                    opacity: Some(0.8),
                    blending: Some(Blending::Normal),
                    depth_func: Some(CompareFunction::Less),
                    depth_test: Some(true),
                    depth_write: Some(false),
                    roughness: Some(0.6),
                    blend_dst: Some(BlendFactor::OneMinusDstColor),
                    ..Default::default()
                },
            ),
            PassDescriptor::new(
                "haircut2b",
                MaterialOverrides {
                    side: Some(Side::Front),
                    opacity: Some(0.8),
                    blending: Some(Blending::Normal),
                    depth_test: Some(true),
                    alpha_test: Some(0.65),
                    ..Default::default()
                },
            ),
        ];

        let level3 = vec![
            PassDescriptor::new(
                "haircut3a",
                MaterialOverrides {
                    side: Some(Side::Back),
                    depth_write: Some(false),
                    ..Default::default()
                },
            ),
            PassDescriptor::new(
                "haircut3b",
                MaterialOverrides {
                    side: Some(Side::Front),
                    depth_write: Some(false),
                    ..Default::default()
                },
            ),
            PassDescriptor::new(
                "haircut3c",
                MaterialOverrides {
                    side: Some(Side::Front),
                    depth_write: Some(true),
                    alpha_to_coverage: Some(true),
                    ..Default::default()
                },
            ),
        ];

        Self {
            levels: vec![
                PassLevelDescriptor {
                    level: QualityLevel::LOW,
                    variants: PassVariants::Original,
                },
                PassLevelDescriptor {
                    level: QualityLevel::MEDIUM,
                    variants: PassVariants::Derived(level2),
                },
                PassLevelDescriptor {
                    level: QualityLevel::HIGH,
                    variants: PassVariants::Derived(level3),
                },
            ],
        }
    }

    /// All rows, lowest level first.
    pub fn levels(&self) -> &[PassLevelDescriptor] {
        &self.levels
    }

    /// The row for `level`, if the table has one.
    pub fn get(&self, level: QualityLevel) -> Option<&PassLevelDescriptor> {
        self.levels.iter().find(|row| row.level == level)
    }

    /// The cheapest level; always one.
    pub fn lowest_level(&self) -> QualityLevel {
        QualityLevel::LOW
    }

    /// The most expensive level in the table.
    pub fn highest_level(&self) -> QualityLevel {
        self.levels
            .last()
            .map(|row| row.level)
            .unwrap_or(QualityLevel::LOW)
    }

    /// Total number of cloned variants across all derived levels.
    pub fn derived_variant_count(&self) -> usize {
        self.levels
            .iter()
            .map(|row| match &row.variants {
                PassVariants::Original => 0,
                PassVariants::Derived(passes) => passes.len(),
            })
            .sum()
    }
}

impl Default for HairPassTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<PassLevelDescriptor>> for HairPassTable {
    type Error = PassTableError;

    fn try_from(levels: Vec<PassLevelDescriptor>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<HairPassTable> for Vec<PassLevelDescriptor> {
    fn from(table: HairPassTable) -> Self {
        table.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialState;

    fn derived(table: &HairPassTable, level: QualityLevel) -> &[PassDescriptor] {
        match &table.get(level).unwrap().variants {
            PassVariants::Derived(passes) => passes,
            PassVariants::Original => panic!("expected derived level"),
        }
    }

    #[test]
    fn test_standard_table_shape() {
        let table = HairPassTable::standard();
        assert_eq!(table.levels().len(), 3);
        assert_eq!(table.highest_level(), QualityLevel::HIGH);
        assert_eq!(table.derived_variant_count(), 5);
        assert_eq!(
            table.get(QualityLevel::LOW).unwrap().variants,
            PassVariants::Original
        );
        assert_eq!(derived(&table, QualityLevel::MEDIUM).len(), 2);
        assert_eq!(derived(&table, QualityLevel::HIGH).len(), 3);
    }

    #[test]
    fn test_standard_table_is_valid() {
        let table = HairPassTable::standard();
        assert_eq!(HairPassTable::new(table.levels().to_vec()), Ok(table));
    }

    #[test]
    fn test_level2_a_relaxes_depth_and_inverts_blend() {
        let table = HairPassTable::standard();
        let pass = &derived(&table, QualityLevel::MEDIUM)[0];
        let state = pass.overrides.apply(MaterialState::default());

        assert_eq!(pass.name, "haircut2a");
        assert_eq!(state.side, Side::Double);
        assert_eq!(state.opacity, 0.8);
        assert!(state.depth_test);
        assert!(!state.depth_write);
        assert_eq!(state.depth_func, CompareFunction::Less);
        assert_eq!(state.roughness, 0.6);
        assert_eq!(state.blend_dst, BlendFactor::OneMinusDstColor);
    }

    #[test]
    fn test_level2_b_is_alpha_tested_front() {
        let table = HairPassTable::standard();
        let pass = &derived(&table, QualityLevel::MEDIUM)[1];

        assert_eq!(pass.name, "haircut2b");
        assert_eq!(pass.overrides.side, Some(Side::Front));
        assert_eq!(pass.overrides.alpha_test, Some(0.65));
        assert!(pass.overrides.depth_write.is_none());
        assert!(pass.overrides.depth_func.is_none());
    }

    #[test]
    fn test_level3_back_front_front_ordering() {
        let table = HairPassTable::standard();
        let passes = derived(&table, QualityLevel::HIGH);

        let sides: Vec<_> = passes.iter().map(|p| p.overrides.side).collect();
        assert_eq!(
            sides,
            vec![Some(Side::Back), Some(Side::Front), Some(Side::Front)]
        );
        let writes: Vec<_> = passes.iter().map(|p| p.overrides.depth_write).collect();
        assert_eq!(writes, vec![Some(false), Some(false), Some(true)]);
        assert_eq!(passes[2].overrides.alpha_to_coverage, Some(true));
        assert!(passes.iter().all(|p| p.overrides.blending.is_none()));
    }

    #[test]
    fn test_rejects_gap_in_levels() {
        let table = HairPassTable::standard();
        let mut levels = table.levels().to_vec();
        levels.remove(1);
        assert_eq!(
            HairPassTable::new(levels),
            Err(PassTableError::NonContiguous {
                expected: QualityLevel::MEDIUM,
                found: QualityLevel::HIGH,
            })
        );
    }

    #[test]
    fn test_rejects_duplicate_names_and_empty_levels() {
        let dup = vec![
            PassLevelDescriptor {
                level: QualityLevel::LOW,
                variants: PassVariants::Derived(vec![
                    PassDescriptor::new("a", MaterialOverrides::default()),
                    PassDescriptor::new("a", MaterialOverrides::default()),
                ]),
            },
        ];
        assert_eq!(
            HairPassTable::new(dup),
            Err(PassTableError::DuplicateName("a".into()))
        );

        let empty = vec![PassLevelDescriptor {
            level: QualityLevel::LOW,
            variants: PassVariants::Derived(Vec::new()),
        }];
        assert_eq!(
            HairPassTable::new(empty),
            Err(PassTableError::EmptyLevel(QualityLevel::LOW))
        );
        assert_eq!(HairPassTable::new(Vec::new()), Err(PassTableError::Empty));
    }

    #[test]
    fn test_table_from_ron() {
        let text = r#"[
            (level: 1, variants: Original),
            (level: 2, variants: Derived([
                (name: "soft", overrides: (side: Some(Double), depth_write: Some(false))),
            ])),
        ]"#;
        let table: HairPassTable = ron::from_str(text).unwrap();
        assert_eq!(table.highest_level(), QualityLevel::MEDIUM);
        assert_eq!(table.derived_variant_count(), 1);

        let bad = "[(level: 2, variants: Original)]";
        assert!(ron::from_str::<HairPassTable>(bad).is_err());
    }
}
