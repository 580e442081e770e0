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

//! A single error type across the gryaml layers, with context helpers.
//!
//! # Examples
//!
//! ```rust
//! use gryaml::{load, ResultExt};
//!
//! fn load_sample(name: &str, text: &str) -> gryaml::Result<gryaml::Value> {
//!     load(text).with_context(|| format!("while loading sample {}", name))
//! }
//!
//! let err = load_sample("broken", "!gryaml.rel [a]").unwrap_err();
//! assert_eq!(err.context(), Some("while loading sample broken"));
//! ```

use std::fmt;

use gryaml_core::GraphError;
use thiserror::Error;

/// Any error raised by a gryaml layer.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity model or store error.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// YAML codec error.
    #[cfg(feature = "yaml")]
    #[error(transparent)]
    Yaml(#[from] gryaml_yaml::YamlError),

    /// Cypher store error.
    #[cfg(feature = "neo4j")]
    #[error(transparent)]
    Neo4j(#[from] gryaml_neo4j::Neo4jError),

    /// An error annotated with what was being done when it happened.
    #[error("{context}: {source}")]
    Context {
        /// What was being done.
        context: String,
        /// The underlying error.
        source: Box<Error>,
    },
}

impl Error {
    /// The outermost context, if any.
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::Context { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The error beneath every layer of context.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// The entity-model error at the root, if that is what it is.
    pub fn as_graph_error(&self) -> Option<&GraphError> {
        match self.root() {
            Error::Graph(e) => Some(e),
            #[cfg(feature = "yaml")]
            Error::Yaml(gryaml_yaml::YamlError::Graph(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the failure was a missing or unreachable store.
    pub fn is_connection_error(&self) -> bool {
        self.is_failed_probe()
            || self
                .as_graph_error()
                .map_or(false, GraphError::is_connection_error)
    }

    #[cfg(feature = "neo4j")]
    fn is_failed_probe(&self) -> bool {
        matches!(
            self.root(),
            Error::Neo4j(gryaml_neo4j::Neo4jError::ConnectionFailed(_))
        )
    }

    #[cfg(not(feature = "neo4j"))]
    fn is_failed_probe(&self) -> bool {
        false
    }
}

/// Result type alias for gryaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for annotating errors from any gryaml layer.
pub trait ResultExt<T> {
    /// Wrap an error with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Wrap an error with a context computed only on failure.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context {
            context: f().to_string(),
            source: Box::new(e.into()),
        })
    }
}
