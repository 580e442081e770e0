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

//! Load and dump configuration.

use serde::{Deserialize, Serialize};

/// Default maximum document size: 64 MB.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

/// Default maximum nesting depth: 1,000 levels.
///
/// Entity documents are shallow (a relationship nests two node sequences and
/// their arg-maps), so this only guards against hostile input.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1_000;

/// Default maximum number of aliases per stream: 100,000.
pub const DEFAULT_MAX_ALIASES: usize = 100_000;

/// Configuration for parsing and loading.
///
/// # Examples
///
/// ```rust
/// use gryaml_yaml::LoadConfig;
///
/// let config = LoadConfig::builder()
///     .max_document_size(1024 * 1024)
///     .max_nesting_depth(64)
///     .build();
/// assert_eq!(config.max_nesting_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Maximum input size in bytes.
    pub max_document_size: usize,
    /// Maximum collection nesting depth.
    pub max_nesting_depth: usize,
    /// Maximum number of alias references.
    pub max_aliases: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_aliases: DEFAULT_MAX_ALIASES,
        }
    }
}

impl LoadConfig {
    /// Create a builder.
    pub fn builder() -> LoadConfigBuilder {
        LoadConfigBuilder::new()
    }
}

/// Builder for [`LoadConfig`].
#[derive(Debug, Clone)]
pub struct LoadConfigBuilder {
    config: LoadConfig,
}

impl LoadConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            config: LoadConfig::default(),
        }
    }

    /// Sets the maximum input size in bytes.
    pub fn max_document_size(mut self, size: usize) -> Self {
        self.config.max_document_size = size;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    /// Sets the maximum number of aliases.
    pub fn max_aliases(mut self, aliases: usize) -> Self {
        self.config.max_aliases = aliases;
        self
    }

    /// Builds the config.
    pub fn build(self) -> LoadConfig {
        self.config
    }
}

impl Default for LoadConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for emitting and dumping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Spaces per indentation level (default: 2).
    pub indent: usize,
    /// Prefix for generated anchor names (default: `id`, giving `&id001`).
    pub anchor_prefix: String,
    /// Always start documents with `---` (default: false; multi-document
    /// streams get separators regardless).
    pub explicit_start: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            anchor_prefix: "id".to_string(),
            explicit_start: false,
        }
    }
}

impl DumpConfig {
    /// Create a builder.
    pub fn builder() -> DumpConfigBuilder {
        DumpConfigBuilder::new()
    }
}

/// Builder for [`DumpConfig`].
#[derive(Debug, Clone)]
pub struct DumpConfigBuilder {
    config: DumpConfig,
}

impl DumpConfigBuilder {
    /// Creates a builder with default values.
    pub fn new() -> Self {
        Self {
            config: DumpConfig::default(),
        }
    }

    /// Sets spaces per indentation level. Values below 2 are raised to 2.
    pub fn indent(mut self, indent: usize) -> Self {
        self.config.indent = indent.max(2);
        self
    }

    /// Sets the anchor name prefix.
    pub fn anchor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.anchor_prefix = prefix.into();
        self
    }

    /// Sets whether every document starts with `---`.
    pub fn explicit_start(mut self, explicit: bool) -> Self {
        self.config.explicit_start = explicit;
        self
    }

    /// Builds the config.
    pub fn build(self) -> DumpConfig {
        self.config
    }
}

impl Default for DumpConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
