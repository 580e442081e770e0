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

//! Error types for YAML encoding and decoding.

use gryaml_core::GraphError;
use thiserror::Error;

/// Errors raised while parsing, emitting, encoding or decoding documents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YamlError {
    /// The text is not well-formed YAML.
    #[error("YAML parse error: {0}")]
    Parse(String),

    /// The tree cannot be written as YAML.
    #[error("YAML emit error: {0}")]
    Emit(String),

    /// Document exceeds the configured size limit.
    #[error("Document size {size} bytes exceeds maximum of {max_size} bytes")]
    DocumentTooLarge { size: usize, max_size: usize },

    /// Nesting exceeds the configured depth limit.
    #[error("Maximum nesting depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },

    /// More aliases than the configured limit.
    #[error("Alias count exceeds maximum of {max_aliases}")]
    TooManyAliases { max_aliases: usize },

    /// A mapping key is a collection.
    #[error("Non-string keys not supported, found {key_type}")]
    NonStringKey { key_type: String },

    /// An alias refers to an anchor that was never defined.
    #[error("Unknown anchor referenced by alias")]
    UnresolvedAlias,

    /// A tag has no constructor and the registry profile rejects it.
    #[error("No constructor registered for tag '{0}'")]
    UnknownTag(String),

    /// No representer is registered for an entity kind.
    #[error("No representer registered for {0}")]
    NoRepresenter(String),

    /// Entity construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<serde_yaml::Error> for YamlError {
    fn from(err: serde_yaml::Error) -> Self {
        YamlError::Parse(err.to_string())
    }
}

/// Result type alias for YAML operations.
pub type Result<T> = std::result::Result<T, YamlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = YamlError::Parse("invalid syntax".to_string());
        assert_eq!(err.to_string(), "YAML parse error: invalid syntax");
    }

    #[test]
    fn test_document_too_large_display() {
        let err = YamlError::DocumentTooLarge {
            size: 20_000_000,
            max_size: 10_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Document size 20000000 bytes exceeds maximum of 10000000 bytes"
        );
    }

    #[test]
    fn test_unknown_tag_display() {
        let err = YamlError::UnknownTag("!custom".to_string());
        assert_eq!(err.to_string(), "No constructor registered for tag '!custom'");
    }

    #[test]
    fn test_graph_error_is_transparent() {
        let err = YamlError::from(GraphError::InvalidLabels("bad".to_string()));
        assert_eq!(err.to_string(), "invalid labels: bad");
    }
}
