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

//! Headless sandbox: loads an avatar into the in-memory engine and replays
//! synthetic frame timings through the quality controller.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::SandboxConfig;
use crossbeam_channel::Receiver;
use std::path::PathBuf;
use tressa_agents::{AvatarModel, AvatarSession};
use tressa_control::QualityGovernor;
use tressa_core::telemetry::QualityEvent;
use tressa_infra::{MemoryDevice, MemoryRoot, MemoryScene, MemorySceneLoader};

#[derive(Parser, Debug)]
#[command(about = "Replays frame timings through the hair quality controller")]
struct Args {
    /// RON sandbox configuration. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the avatar url of the configuration.
    #[arg(short, long)]
    url: Option<String>,
}

fn drain(events: &Receiver<QualityEvent>) {
    for event in events.try_iter() {
        log::debug!("Sandbox: Event {:?}", event);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };
    if let Some(url) = args.url {
        config.avatar_url = url;
    }

    let device = MemoryDevice::new();
    let mut loader = MemorySceneLoader::new(device.clone());
    for (url, blueprint) in &config.assets {
        loader.insert(url.clone(), blueprint.clone());
    }

    let (tx, rx) = crossbeam_channel::bounded(64);
    let governor = QualityGovernor::new(config.quality.clone())
        .context("Invalid quality configuration")?
        .with_event_sender(tx.clone());
    let model = AvatarModel::<MemoryRoot>::new(config.pass_table.clone()).with_event_sender(tx);
    let mut session =
        AvatarSession::new(governor, model).context("Quality levels do not fit the pass table")?;

    session
        .load(&loader, &config.avatar_url)
        .await
        .with_context(|| format!("Failed to load avatar '{}'", config.avatar_url))?;

    let mut scene = MemoryScene::new();
    let level = session.add_to_scene(&mut scene)?;
    log::info!(
        "Sandbox: Avatar attached at {}, visible hair {:?}",
        level,
        scene.visible_hair()
    );

    let mut timestamp = 0.0;
    for phase in &config.phases {
        log::info!(
            "Sandbox: Phase '{}' ({} frames at {:.1}ms)",
            phase.label,
            phase.frames,
            phase.frame_ms
        );
        for _ in 0..phase.frames {
            timestamp += phase.frame_ms;
            if session.on_frame(timestamp).is_some() {
                log::info!("Sandbox:   visible hair {:?}", scene.visible_hair());
            }
        }
        drain(&rx);

        let stats = session.governor().stats();
        log::info!(
            "Sandbox:   level {} | avg {:.1}ms ({:.0} fps) min {:.1}ms max {:.1}ms",
            session.governor().level(),
            stats.average_ms,
            stats.fps,
            stats.min_ms,
            stats.max_ms
        );
    }

    session.clear();
    log::info!(
        "Sandbox: Done after {} frames, {} GPU resources still live",
        session.governor().frame_count(),
        device.live_total()
    );
    Ok(())
}
