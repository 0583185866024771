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

//! Engine-neutral description of a material's fixed-function render state.
//!
//! Hair transparency is approximated by drawing the same strands several
//! times with different culling, depth and blending settings. These types are
//! the common language in which those settings are expressed.

mod enums;
mod state;

pub use enums::*;
pub use state::*;
