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

//! The avatar lifecycle: load, prepare hair, attach, switch levels, dispose.
//!
//! Loading uses a request-sequence token. Each call to
//! [`AvatarModel::begin_load`] supersedes earlier requests, and a completion
//! carrying an older ticket is disposed instead of installed. Hosts that
//! fetch on their own tasks pair `begin_load` with
//! [`AvatarModel::finish_load`]; others simply await [`AvatarModel::load`].

mod model;
mod session;

pub use model::{AvatarModel, LoadTicket};
pub use session::AvatarSession;
