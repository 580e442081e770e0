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

//! gryaml YAML codec
//!
//! Reads and writes graph entities as YAML. Nodes and relationships are
//! encoded as sequences of arg-maps; in rich mode they carry the
//! `!gryaml.node` / `!gryaml.rel` tags and load back as live entities, in
//! simple mode they are plain sequences any YAML reader understands.
//!
//! The pipeline is split in two halves that can be used independently:
//!
//! - text to [`Tree`] and back: [`parse`], [`parse_all`], [`emit`], [`emit_all`]
//! - [`Tree`] to [`Value`] and back: [`Encoder`], [`Decoder`]
//!
//! [`load`] and [`dump`] chain both halves.
//!
//! # Examples
//!
//! ## Dumping entities
//!
//! ```rust
//! use gryaml_core::{properties, Node, Relationship, Value};
//! use gryaml_yaml::{dump, Registry};
//!
//! let bob = Node::new(["person"], properties([("name", "Bob")]));
//! let movie = Node::new(["movie"], properties([("title", "The Matrix")]));
//! let likes = Relationship::new(&bob, "LIKES", &movie, properties([("stars", 5i64)]));
//!
//! let yaml = dump(&Value::from(likes), &Registry::rich()).unwrap();
//! assert!(yaml.starts_with("--- !gryaml.rel"));
//! ```
//!
//! ## Loading entities
//!
//! ```rust
//! use gryaml_core::EntityFactory;
//! use gryaml_yaml::{load, Registry};
//!
//! let yaml = "
//! !gryaml.node
//! - labels: [person]
//! - properties:
//!     name: Bob
//! ";
//! let mut factory = EntityFactory::offline();
//! let value = load(yaml, &Registry::rich(), &mut factory).unwrap();
//! assert!(value.as_node().unwrap().has_label("person"));
//! ```
//!
//! ## Resource limits
//!
//! ```rust
//! use gryaml_core::EntityFactory;
//! use gryaml_yaml::{LoadConfig, Loader, Registry};
//!
//! let config = LoadConfig::builder().max_document_size(1024).build();
//! let registry = Registry::rich();
//! let loader = Loader::with_config(&registry, config);
//! let big = "x".repeat(2048);
//! assert!(loader.load(&big, &mut EntityFactory::offline()).is_err());
//! ```

mod config;
mod decode;
mod emit;
mod encode;
pub mod error;
mod interop;
mod parse;
mod registry;

pub use config::{
    DumpConfig, DumpConfigBuilder, LoadConfig, LoadConfigBuilder, DEFAULT_MAX_ALIASES,
    DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_MAX_NESTING_DEPTH,
};
pub use decode::Decoder;
pub use emit::{emit, emit_all};
pub use encode::Encoder;
pub use error::{Result, YamlError};
pub use interop::{tree_from_yaml_value, tree_to_yaml_value};
pub use parse::{parse, parse_all};
pub use registry::{
    Constructor, ConstructorFn, EntityKind, Mode, Profile, Registry, RegistryBuilder,
    Representation, NODE_TAG, REL_TAG,
};

use gryaml_core::{EntityFactory, Tree, Value};
use tracing::debug;

/// Encode a value into a document tree.
pub fn encode(value: &Value, registry: &Registry) -> Result<Tree> {
    Encoder::new(registry).encode_value(value)
}

/// Decode a document tree into a value.
pub fn decode(tree: &Tree, registry: &Registry, factory: &mut EntityFactory) -> Result<Value> {
    Decoder::new(registry, factory).decode(tree)
}

/// Load a single document with default limits.
pub fn load(text: &str, registry: &Registry, factory: &mut EntityFactory) -> Result<Value> {
    Loader::new(registry).load(text, factory)
}

/// Load every document of a stream with default limits.
pub fn load_all(
    text: &str,
    registry: &Registry,
    factory: &mut EntityFactory,
) -> Result<Vec<Value>> {
    Loader::new(registry).load_all(text, factory)
}

/// Dump a value as a single document with default formatting.
pub fn dump(value: &Value, registry: &Registry) -> Result<String> {
    Dumper::new(registry).dump(value)
}

/// Dump values as a multi-document stream with default formatting.
pub fn dump_all(values: &[Value], registry: &Registry) -> Result<String> {
    Dumper::new(registry).dump_all(values)
}

/// Encode a value into a `serde_yaml` value.
///
/// Repeated nodes are written out in full at each occurrence.
pub fn to_yaml_value(value: &Value, registry: &Registry) -> Result<serde_yaml::Value> {
    tree_to_yaml_value(&encode(value, registry)?)
}

/// Decode a `serde_yaml` value.
///
/// `serde_yaml` expands aliases, so a node repeated in the input yields one
/// entity per occurrence. Use [`load`] on the text to keep them shared.
pub fn from_yaml_value(
    value: &serde_yaml::Value,
    registry: &Registry,
    factory: &mut EntityFactory,
) -> Result<Value> {
    decode(&tree_from_yaml_value(value)?, registry, factory)
}

/// Text to values, through a registry.
#[derive(Debug, Clone)]
pub struct Loader<'r> {
    registry: &'r Registry,
    config: LoadConfig,
}

impl<'r> Loader<'r> {
    /// A loader with default limits.
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, LoadConfig::default())
    }

    /// A loader with custom limits.
    pub fn with_config(registry: &'r Registry, config: LoadConfig) -> Self {
        Self { registry, config }
    }

    /// The limits in effect.
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Load a single document. An empty stream loads as null.
    pub fn load(&self, text: &str, factory: &mut EntityFactory) -> Result<Value> {
        let tree = parse(text, &self.config)?;
        decode(&tree, self.registry, factory)
    }

    /// Load every document of a stream.
    ///
    /// Anchors do not cross document boundaries, so neither does entity
    /// sharing.
    pub fn load_all(&self, text: &str, factory: &mut EntityFactory) -> Result<Vec<Value>> {
        let trees = parse_all(text, &self.config)?;
        debug!(documents = trees.len(), "loading stream");
        trees
            .iter()
            .map(|tree| decode(tree, self.registry, factory))
            .collect()
    }
}

/// Values to text, through a registry.
#[derive(Debug, Clone)]
pub struct Dumper<'r> {
    registry: &'r Registry,
    config: DumpConfig,
}

impl<'r> Dumper<'r> {
    /// A dumper with default formatting.
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, DumpConfig::default())
    }

    /// A dumper with custom formatting.
    pub fn with_config(registry: &'r Registry, config: DumpConfig) -> Self {
        Self { registry, config }
    }

    /// The formatting in effect.
    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Dump a value as one document.
    pub fn dump(&self, value: &Value) -> Result<String> {
        emit(&encode(value, self.registry)?, &self.config)
    }

    /// Dump values as a stream, one document each.
    pub fn dump_all(&self, values: &[Value]) -> Result<String> {
        let trees = values
            .iter()
            .map(|value| encode(value, self.registry))
            .collect::<Result<Vec<_>>>()?;
        debug!(documents = trees.len(), "dumping stream");
        emit_all(&trees, &self.config)
    }
}
