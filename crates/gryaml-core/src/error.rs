// Dweve gryaml - Graph entities as YAML documents
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the graph entity model and the entity factory.

use thiserror::Error;

/// Error type for entity construction and graph store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Bound mode was requested but no live store is available.
    #[error("graph store unavailable: {0}")]
    ConnectionUnavailable(String),

    /// The store reported a driver or server version no adapter handles.
    #[error("unsupported graph driver version '{version}'")]
    UnsupportedVersion {
        /// The version string as reported or configured.
        version: String,
    },

    /// A tagged sequence does not have the shape its tag requires.
    #[error("malformed {tag} sequence: expected {expected}, found {found}")]
    DecodeShapeMismatch {
        /// The tag (or entity kind) being decoded.
        tag: String,
        /// What the decoder required.
        expected: String,
        /// What the document contained.
        found: String,
    },

    /// The `labels` argument is not a sequence of strings.
    #[error("invalid labels: {0}")]
    InvalidLabels(String),

    /// A property value cannot be stored on a graph entity.
    #[error("invalid value for property '{key}': {reason}")]
    InvalidProperty {
        /// The offending property key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A singleton mapping names an argument that is not recognized.
    #[error("unknown argument '{0}' (expected 'labels' or 'properties')")]
    UnknownArgument(String),

    /// Failure reported by the underlying store.
    #[error("graph store error: {0}")]
    Store(String),
}

impl GraphError {
    /// Shorthand for a [`GraphError::DecodeShapeMismatch`].
    pub fn shape(
        tag: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::DecodeShapeMismatch {
            tag: tag.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Shorthand for a [`GraphError::InvalidProperty`].
    pub fn property(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if retrying against a live store could succeed.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionUnavailable(_))
    }
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
