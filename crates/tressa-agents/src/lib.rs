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

//! # Tressa Agents
//!
//! The parts of the hair quality pipeline that act on engine objects:
//!
//! - [`hair_agent`] expands the authored hair mesh into per-level variants.
//! - [`avatar_agent`] owns the loaded avatar and connects it to the
//!   frame-driven controller.

#![warn(missing_docs)]

pub mod avatar_agent;
pub mod hair_agent;

pub use avatar_agent::{AvatarModel, AvatarSession, LoadTicket};
pub use hair_agent::{HairPassProfile, HairPassProfileBuilder, HairPassSet};
pub use tressa_core::scene::SceneLoader;
