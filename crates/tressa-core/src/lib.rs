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

//! # Tressa Core
//!
//! Foundational crate containing the capability traits, plain data types and
//! error contracts shared by the adaptive hair-quality controller.
//!
//! Nothing in here knows about a concrete 3D engine. Engines plug in by
//! implementing the traits of the [`scene`] module; the controller and the
//! avatar model only ever talk to those traits.

#![warn(missing_docs)]

pub mod control;
pub mod error;
pub mod material;
pub mod pass;
pub mod scene;
pub mod telemetry;

pub use control::{LevelChange, QualityLevel};
pub use error::{BoxedError, LoadError, PassBuildError, PassTableError};
