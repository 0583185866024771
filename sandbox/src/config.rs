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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tressa_control::QualityConfig;
use tressa_core::pass::HairPassTable;
use tressa_infra::AvatarBlueprint;

/// A run of frames rendered at a constant frame time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePhase {
    /// Label printed when the phase starts.
    pub label: String,
    /// Number of frames.
    pub frames: usize,
    /// Time between two frames, in ms.
    pub frame_ms: f64,
}

impl FramePhase {
    fn new(label: &str, frames: usize, frame_ms: f64) -> Self {
        Self {
            label: label.to_owned(),
            frames,
            frame_ms,
        }
    }
}

/// Everything the sandbox run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Controller tunables.
    pub quality: QualityConfig,
    /// Hair pass variants per level.
    pub pass_table: HairPassTable,
    /// Avatar assets served by the in-memory loader, by url.
    pub assets: BTreeMap<String, AvatarBlueprint>,
    /// The asset to load.
    pub avatar_url: String,
    /// Simulated frame timings, played in order.
    pub phases: Vec<FramePhase>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        let mut assets = BTreeMap::new();
        assets.insert("avatars/default.glb".to_owned(), AvatarBlueprint::with_hair());
        assets.insert("avatars/bald.glb".to_owned(), AvatarBlueprint::without_hair());

        Self {
            quality: QualityConfig::default(),
            pass_table: HairPassTable::standard(),
            assets,
            avatar_url: "avatars/default.glb".to_owned(),
            phases: vec![
                FramePhase::new("steady 60Hz", 180, 16.6),
                FramePhase::new("heavy scene", 30, 140.0),
                FramePhase::new("30Hz", 60, 33.3),
                FramePhase::new("hovering", 90, 60.0),
            ],
        }
    }
}

impl SandboxConfig {
    /// Reads a RON file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sandbox config '{}'", path.display()))?;
        let config: Self = ron::from_str(&text)
            .with_context(|| format!("Failed to parse sandbox config '{}'", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid sandbox config '{}'", path.display()))?;
        Ok(config)
    }

    /// Checks the quality section on its own and against the pass table.
    pub fn validate(&self) -> Result<()> {
        self.quality.validate().context("Invalid quality section")?;
        self.quality
            .validate_for_table(&self.pass_table)
            .context("Quality levels do not fit the pass table")?;
        Ok(())
    }
}
