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

//! Bookkeeping of simulated GPU allocations.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier of a simulated GPU resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kinds of resource the avatar pipeline allocates and releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Image data sampled by a material.
    Texture,
    /// A material instance with its compiled pipeline state.
    Material,
    /// Bone matrices of a skinned mesh.
    Skeleton,
}

#[derive(Debug)]
struct ResourceEntry {
    kind: ResourceKind,
    label: String,
}

#[derive(Debug, Default)]
struct DeviceInternal {
    live: Mutex<HashMap<ResourceId, ResourceEntry>>,
    next_id: AtomicU64,
    released_total: AtomicU64,
}

/// A headless stand-in for a graphics device.
///
/// It hands out resource ids and remembers which are still alive, so tests
/// and the sandbox can check that every allocation is eventually released.
/// Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryDevice {
    internal: Arc<DeviceInternal>,
}

impl MemoryDevice {
    /// Creates an empty device.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate(&self, kind: ResourceKind, label: &str) -> ResourceId {
        let id = ResourceId(self.internal.next_id.fetch_add(1, Ordering::Relaxed));
        self.internal.live.lock().insert(
            id,
            ResourceEntry {
                kind,
                label: label.to_owned(),
            },
        );
        log::trace!("MemoryDevice: Allocated {:?} '{}' {}", kind, label, id);
        id
    }

    pub(crate) fn release(&self, id: ResourceId) {
        match self.internal.live.lock().remove(&id) {
            Some(entry) => {
                self.internal.released_total.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "MemoryDevice: Released {:?} '{}' {}",
                    entry.kind,
                    entry.label,
                    id
                );
            }
            None => log::warn!("MemoryDevice: Release of unknown resource {}", id),
        }
    }

    /// `true` if `id` has been allocated and not yet released.
    pub fn is_live(&self, id: ResourceId) -> bool {
        self.internal.live.lock().contains_key(&id)
    }

    /// Number of live resources of `kind`.
    pub fn live_count(&self, kind: ResourceKind) -> usize {
        self.internal
            .live
            .lock()
            .values()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    /// Number of live resources of any kind.
    pub fn live_total(&self) -> usize {
        self.internal.live.lock().len()
    }

    /// Number of releases performed since creation.
    pub fn released_total(&self) -> u64 {
        self.internal.released_total.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let device = MemoryDevice::new();
        let a = device.allocate(ResourceKind::Texture, "albedo");
        let b = device.allocate(ResourceKind::Material, "hair");
        assert_ne!(a, b);
        assert_eq!(device.live_count(ResourceKind::Texture), 1);
        assert_eq!(device.live_total(), 2);

        device.release(a);
        assert!(!device.is_live(a));
        assert!(device.is_live(b));
        assert_eq!(device.released_total(), 1);
    }

    #[test]
    fn test_clones_share_registry() {
        let device = MemoryDevice::new();
        let other = device.clone();
        let id = other.allocate(ResourceKind::Skeleton, "rig");
        assert!(device.is_live(id));
    }

    #[test]
    fn test_unknown_release_is_ignored() {
        let device = MemoryDevice::new();
        device.release(ResourceId(42));
        assert_eq!(device.released_total(), 0);
    }
}
