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

//! The loaded avatar and its hair pass variants.

use crate::hair_agent::{HairPassProfileBuilder, HairPassSet};
use crossbeam_channel::{Sender, TrySendError};
use tressa_core::pass::HairPassTable;
use tressa_core::scene::{
    AvatarGroup, AvatarRoot, Disposable, SceneBundle, SceneLoader, SceneObject, SceneTarget,
    AVATAR_GROUP_NODE, AVATAR_ROOT_NODE, HAIR_NODE,
};
use tressa_core::telemetry::QualityEvent;
use tressa_core::{BoxedError, LoadError, QualityLevel};

/// Identifies one load request.
///
/// Tickets are issued by [`AvatarModel::begin_load`] in increasing order;
/// only the most recent one may install its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    id: u64,
    url: String,
}

impl LoadTicket {
    /// Sequence number of the request.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The requested location.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Owns a loaded avatar: its root node and, when the avatar has hair, the
/// prepared pass variants.
///
/// Every reload disposes the previous avatar. GPU resources are released
/// through [`clear`](Self::clear) only; dropping the model releases nothing.
pub struct AvatarModel<R: AvatarRoot> {
    builder: HairPassProfileBuilder,
    root: Option<R>,
    hair: Option<HairPassSet<R::Mesh>>,
    level: QualityLevel,
    latest_ticket: u64,
    busy: bool,
    telemetry_sender: Option<Sender<QualityEvent>>,
}

impl<R: AvatarRoot> Default for AvatarModel<R> {
    fn default() -> Self {
        Self::new(HairPassTable::standard())
    }
}

impl<R: AvatarRoot> AvatarModel<R> {
    /// An empty model deriving hair variants from `table`.
    pub fn new(table: HairPassTable) -> Self {
        Self {
            level: table.lowest_level(),
            builder: HairPassProfileBuilder::new(table),
            root: None,
            hair: None,
            latest_ticket: 0,
            busy: false,
            telemetry_sender: None,
        }
    }

    /// Attaches a sender for load events.
    pub fn with_event_sender(mut self, sender: Sender<QualityEvent>) -> Self {
        self.telemetry_sender = Some(sender);
        self
    }

    // ── Loading ──────────────────────────────────────────────────────────

    /// Registers a new load request for `url`, superseding any outstanding one.
    pub fn begin_load(&mut self, url: &str) -> LoadTicket {
        self.latest_ticket += 1;
        self.busy = true;
        log::debug!("AvatarModel: Load #{} of '{}' started", self.latest_ticket, url);
        LoadTicket {
            id: self.latest_ticket,
            url: url.to_owned(),
        }
    }

    /// Installs the outcome of the request identified by `ticket`.
    ///
    /// A stale ticket has its bundle disposed and yields
    /// [`LoadError::Superseded`], leaving the model untouched. For the latest
    /// ticket the previous avatar is always cleared first; on failure the
    /// model stays empty.
    pub fn finish_load<B>(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<B, BoxedError>,
    ) -> Result<(), LoadError>
    where
        B: SceneBundle<Root = R>,
    {
        if ticket.id != self.latest_ticket {
            log::warn!(
                "AvatarModel: Discarding load #{} of '{}', superseded by #{}",
                ticket.id,
                ticket.url,
                self.latest_ticket
            );
            if let Ok(bundle) = &fetched {
                if let Some(root) = bundle.object_by_name(AVATAR_ROOT_NODE) {
                    root.dispose();
                }
            }
            self.emit(QualityEvent::LoadSuperseded {
                url: ticket.url.clone(),
                ticket: ticket.id,
            });
            return Err(LoadError::Superseded {
                url: ticket.url,
                ticket: ticket.id,
                latest: self.latest_ticket,
            });
        }

        self.busy = false;
        self.clear();

        match self.install(&ticket.url, fetched) {
            Ok(()) => {
                log::info!(
                    "AvatarModel: Loaded '{}' ({})",
                    ticket.url,
                    if self.has_hair() { "with hair" } else { "no hair" }
                );
                self.emit(QualityEvent::AvatarLoaded {
                    url: ticket.url,
                    has_hair: self.has_hair(),
                });
                Ok(())
            }
            Err(err) => {
                log::error!("AvatarModel: Failed to load '{}': {}", ticket.url, err);
                self.emit(QualityEvent::AvatarLoadFailed {
                    url: ticket.url,
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn install<B>(&mut self, url: &str, fetched: Result<B, BoxedError>) -> Result<(), LoadError>
    where
        B: SceneBundle<Root = R>,
    {
        let bundle = fetched.map_err(|source| LoadError::Fetch {
            url: url.to_owned(),
            source,
        })?;
        let root = bundle
            .object_by_name(AVATAR_ROOT_NODE)
            .ok_or_else(|| LoadError::MissingRoot {
                url: url.to_owned(),
                node: AVATAR_ROOT_NODE.to_owned(),
            })?;

        let hair = match root.find_child(HAIR_NODE) {
            Some(mesh) => match self.builder.build(&mesh) {
                Ok(set) => Some(set),
                Err(source) => {
                    root.dispose();
                    return Err(LoadError::HairPasses {
                        url: url.to_owned(),
                        source,
                    });
                }
            },
            None => None,
        };

        if let Some(hair) = &hair {
            hair.apply_level(self.level);
        }
        self.root = Some(root);
        self.hair = hair;
        Ok(())
    }

    /// Fetches `url` through `loader` and installs it.
    pub async fn load<L>(&mut self, loader: &L, url: &str) -> Result<(), LoadError>
    where
        L: SceneLoader,
        L::Bundle: SceneBundle<Root = R>,
    {
        let ticket = self.begin_load(url);
        let fetched = loader.fetch(url).await;
        self.finish_load(ticket, fetched)
    }

    /// Like [`load`](Self::load), then hands the prepared model to `on_ready`.
    ///
    /// `on_ready` is not called on failure.
    pub async fn load_with<L, F>(
        &mut self,
        loader: &L,
        url: &str,
        on_ready: F,
    ) -> Result<(), LoadError>
    where
        L: SceneLoader,
        L::Bundle: SceneBundle<Root = R>,
        F: FnOnce(&mut Self),
    {
        self.load(loader, url).await?;
        on_ready(self);
        Ok(())
    }

    // ── Level & scene ────────────────────────────────────────────────────

    /// Makes the hair profile of `level` the only visible one.
    ///
    /// The level is remembered even without hair, so a later load starts
    /// from it.
    pub fn apply_level(&mut self, level: QualityLevel) {
        self.level = level;
        if let Some(hair) = &self.hair {
            hair.apply_level(level);
        }
    }

    /// Replaces the content of `scene` with this avatar and switches to the
    /// highest pass level. Returns that level.
    pub fn add_to_scene<S>(&mut self, scene: &mut S) -> Result<QualityLevel, LoadError>
    where
        S: SceneTarget<R>,
    {
        let root = self.root.clone().ok_or(LoadError::NotLoaded)?;
        let group = AvatarGroup {
            name: AVATAR_GROUP_NODE.to_owned(),
            root,
            hair: self.hair.as_ref().map(|h| h.meshes()).unwrap_or_default(),
        };

        let highest = self.builder.table().highest_level();
        self.apply_level(highest);

        log::info!(
            "AvatarModel: Attached '{}' with {} hair meshes at {}",
            group.name,
            group.hair.len(),
            highest
        );
        scene.replace_contents(group);
        Ok(highest)
    }

    /// Disposes the loaded avatar, if any, and empties the model.
    ///
    /// Outstanding load tickets stay valid.
    pub fn clear(&mut self) {
        if let Some(hair) = self.hair.take() {
            hair.dispose();
        }
        if let Some(root) = self.root.take() {
            log::debug!("AvatarModel: Disposing '{}'", root.name());
            root.dispose();
        }
    }

    fn emit(&self, event: QualityEvent) {
        if let Some(sender) = &self.telemetry_sender {
            match sender.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::debug!("AvatarModel: Event channel full, dropping event");
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("AvatarModel: Event receiver gone");
                }
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// `true` while the most recent load request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// `true` if an avatar is installed.
    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    /// `true` if the installed avatar has a hair mesh.
    pub fn has_hair(&self) -> bool {
        self.hair.is_some()
    }

    /// The last applied level.
    pub fn level(&self) -> QualityLevel {
        self.level
    }

    /// The avatar root.
    pub fn root(&self) -> Option<&R> {
        self.root.as_ref()
    }

    /// The hair pass variants.
    pub fn hair(&self) -> Option<&HairPassSet<R::Mesh>> {
        self.hair.as_ref()
    }

    /// The pass table in use.
    pub fn table(&self) -> &HairPassTable {
        self.builder.table()
    }
}
