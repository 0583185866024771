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

//! Error types for pass construction and avatar loading.

use crate::control::QualityLevel;
use thiserror::Error;

/// The error type returned by engine loader back-ends. Must be thread-safe.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to derive hair pass variants from the authored hair mesh.
#[derive(Debug, Error)]
pub enum PassBuildError {
    /// The hair mesh has no material to clone the variants from.
    #[error("hair mesh '{mesh}' has no material to derive pass variants from")]
    MissingMaterial {
        /// Name of the offending mesh.
        mesh: String,
    },
}

/// A pass table that the controller cannot drive.
#[derive(Debug, Error, PartialEq)]
pub enum PassTableError {
    /// The table has no levels at all.
    #[error("pass table has no levels")]
    Empty,
    /// Levels must start at one and rise by exactly one pass.
    #[error("pass table levels must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguous {
        /// The level that should come next.
        expected: QualityLevel,
        /// The level that was found instead.
        found: QualityLevel,
    },
    /// A derived level lists no variants.
    #[error("level {0} derives no variants")]
    EmptyLevel(QualityLevel),
    /// More than one level claims the authored mesh.
    #[error("only one level may use the original mesh")]
    MultipleOriginal,
    /// A variant has an empty name.
    #[error("pass variant at level {0} has an empty name")]
    EmptyName(QualityLevel),
    /// Two variants share a name.
    #[error("pass variant name '{0}' is used more than once")]
    DuplicateName(String),
}

/// Failure of an avatar load or scene attachment.
///
/// Load failures are recovered at the model boundary: the model is left
/// cleared and not busy, and this error is handed back to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The loader back-end could not fetch or parse the scene bundle.
    #[error("failed to fetch avatar scene '{url}'")]
    Fetch {
        /// The requested location.
        url: String,
        /// The back-end error.
        #[source]
        source: BoxedError,
    },
    /// The scene bundle has no node with the expected root name.
    #[error("avatar scene '{url}' has no '{node}' node")]
    MissingRoot {
        /// The requested location.
        url: String,
        /// The node name that was looked up.
        node: String,
    },
    /// The hair node exists but its pass variants could not be built.
    #[error("failed to prepare hair passes for '{url}'")]
    HairPasses {
        /// The requested location.
        url: String,
        /// The builder failure.
        #[source]
        source: PassBuildError,
    },
    /// A newer load request was issued before this one completed.
    #[error("load #{ticket} of '{url}' was superseded by load #{latest}")]
    Superseded {
        /// The requested location.
        url: String,
        /// Sequence number of the discarded request.
        ticket: u64,
        /// Sequence number of the most recent request.
        latest: u64,
    },
    /// No avatar is currently loaded.
    #[error("no avatar model is loaded")]
    NotLoaded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_fetch_error_keeps_source() {
        let err = LoadError::Fetch {
            url: "avatar.glb".into(),
            source: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "failed to fetch avatar scene 'avatar.glb'");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("connection reset".to_string())
        );
    }

    #[test]
    fn test_hair_pass_error_message() {
        let err = LoadError::HairPasses {
            url: "a.glb".into(),
            source: PassBuildError::MissingMaterial {
                mesh: "haircut".into(),
            },
        };
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("haircut"));
    }
}
