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

//! Hair pass preparation.
//!
//! At load time the authored hair mesh is expanded into one group of meshes
//! per quality level. At run time switching levels is a pure visibility
//! toggle; no material is rebuilt.

mod builder;
mod pass_set;

pub use builder::HairPassProfileBuilder;
pub use pass_set::{HairPassProfile, HairPassSet};
