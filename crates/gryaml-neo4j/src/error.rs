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

//! Error types for the Cypher store.

use gryaml_core::GraphError;
use thiserror::Error;

/// Error type for Cypher generation and execution.
#[derive(Debug, Error)]
pub enum Neo4jError {
    /// The configured or reported driver version has no Cypher dialect.
    #[error("unsupported driver version '{0}'")]
    UnsupportedVersion(String),

    /// The connectivity probe failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The executor reported a failure while running a statement.
    #[error("statement failed: {0}")]
    Executor(String),

    /// Invalid Cypher identifier.
    #[error("invalid Cypher identifier: '{0}'")]
    InvalidIdentifier(String),

    /// A record returned by the executor is missing a column or has the
    /// wrong type in it.
    #[error("failed to parse Neo4j record: {0}")]
    RecordParseError(String),

    /// A configuration value could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// String length limit exceeded.
    #[error("String length {length} exceeds maximum allowed length {max_length} for property '{property}'")]
    StringLengthExceeded {
        /// Actual length of the string.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
        /// Property name where the violation occurred.
        property: String,
    },

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error raised by the entity model.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<Neo4jError> for GraphError {
    fn from(err: Neo4jError) -> Self {
        match err {
            Neo4jError::UnsupportedVersion(version) => GraphError::UnsupportedVersion { version },
            Neo4jError::ConnectionFailed(reason) => GraphError::ConnectionUnavailable(reason),
            Neo4jError::StringLengthExceeded {
                length,
                max_length,
                property,
            } => GraphError::property(
                property,
                format!("string of {} bytes exceeds the limit of {}", length, max_length),
            ),
            Neo4jError::Graph(inner) => inner,
            other => GraphError::Store(other.to_string()),
        }
    }
}

/// Result type alias for Neo4j operations.
pub type Result<T> = std::result::Result<T, Neo4jError>;
