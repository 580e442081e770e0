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

//! The entity factory.
//!
//! Turns decoded constructor arguments into live [`Node`] and [`Relationship`]
//! values. In offline mode entities stay unbound. In bound mode every entity
//! is persisted through a [`GraphStore`] as it is built and bound to the id the
//! store assigns.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, warn};

use crate::arg_map::{
    extract_properties, find_arg_map, is_arg_map, labels_from_value, properties_from_value, ArgName,
};
use crate::entity::{Node, Relationship};
use crate::error::{GraphError, Result};
use crate::property::Properties;
use crate::store::{Endpoint, GraphStore, Record};
use crate::value::Value;

/// Whether the factory persists what it builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactoryMode {
    /// Build unbound entities; never touch a store.
    #[default]
    Offline,
    /// Persist every entity. Fails when no store is connected.
    Bound,
}

/// Configuration for [`EntityFactory`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactoryConfig {
    /// Reject singleton mappings with an unrecognized key instead of ignoring
    /// them (default: false).
    pub strict_arguments: bool,
    /// Offline or bound (default: offline).
    pub mode: FactoryMode,
}

/// Builder for [`FactoryConfig`].
#[derive(Debug, Default)]
pub struct FactoryConfigBuilder {
    strict_arguments: Option<bool>,
    mode: Option<FactoryMode>,
}

impl FactoryConfigBuilder {
    /// Create a builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unknown arguments are errors.
    pub fn strict_arguments(mut self, strict: bool) -> Self {
        self.strict_arguments = Some(strict);
        self
    }

    /// Set the factory mode.
    pub fn mode(mut self, mode: FactoryMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Build the config. Unset fields use their defaults.
    pub fn build(self) -> FactoryConfig {
        let defaults = FactoryConfig::default();
        FactoryConfig {
            strict_arguments: self.strict_arguments.unwrap_or(defaults.strict_arguments),
            mode: self.mode.unwrap_or(defaults.mode),
        }
    }
}

impl FactoryConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    pub fn builder() -> FactoryConfigBuilder {
        FactoryConfigBuilder::default()
    }

    /// Switch to bound mode.
    pub fn bound(mut self) -> Self {
        self.mode = FactoryMode::Bound;
        self
    }

    /// Enable strict argument checking.
    pub fn strict(mut self) -> Self {
        self.strict_arguments = true;
        self
    }
}

/// Builds nodes and relationships, optionally persisting them.
pub struct EntityFactory {
    store: Option<Box<dyn GraphStore>>,
    config: FactoryConfig,
}

impl Default for EntityFactory {
    fn default() -> Self {
        Self::offline()
    }
}

impl fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityFactory")
            .field("connected", &self.store.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl EntityFactory {
    /// A factory that only builds unbound entities.
    pub fn offline() -> Self {
        Self {
            store: None,
            config: FactoryConfig::default(),
        }
    }

    /// A bound-mode factory persisting through `store`.
    pub fn connected(store: impl GraphStore + 'static) -> Self {
        Self {
            store: Some(Box::new(store)),
            config: FactoryConfig::default().bound(),
        }
    }

    /// A factory with an explicit configuration and optional store.
    pub fn with_config(config: FactoryConfig, store: Option<Box<dyn GraphStore>>) -> Self {
        Self { store, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Returns true when entities are built unbound.
    pub fn is_offline(&self) -> bool {
        self.config.mode == FactoryMode::Offline
    }

    /// Returns true when a store is attached.
    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    /// Attach a store and switch to bound mode.
    pub fn connect(&mut self, store: impl GraphStore + 'static) {
        self.store = Some(Box::new(store));
        self.config.mode = FactoryMode::Bound;
    }

    /// Detach the store, returning it.
    ///
    /// The mode is left unchanged, so a bound factory fails afterwards
    /// instead of silently building unbound entities.
    pub fn disconnect(&mut self) -> Option<Box<dyn GraphStore>> {
        self.store.take()
    }

    /// Version reported by the attached store.
    pub fn server_version(&self) -> Result<String> {
        match &self.store {
            Some(store) => store.server_version(),
            None => Err(not_connected()),
        }
    }

    /// Build a node from `labels` / `properties` arg-maps.
    ///
    /// Arguments may come in any order and either may be absent. When an
    /// argument is given twice, the first occurrence wins.
    pub fn make_node(&mut self, args: &[Value]) -> Result<Node> {
        self.check_arguments(args)?;

        let labels = match find_arg_map(ArgName::Labels, args) {
            Some(payload) => labels_from_value(payload)?,
            None => BTreeSet::new(),
        };
        let properties = match find_arg_map(ArgName::Properties, args) {
            Some(payload) => properties_from_value(payload)?,
            None => Properties::new(),
        };
        self.create_node(labels, properties)
    }

    /// Build a node directly from labels and properties.
    pub fn create_node<L, S>(&mut self, labels: L, properties: Properties) -> Result<Node>
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let node = Node::new(labels, properties);
        if self.is_offline() {
            return Ok(node);
        }

        let store = self.store_mut()?;
        let id = store.create_node(&node.labels(), &node.properties())?;
        node.bind(id);
        debug!(id = id.0, "created node");
        Ok(node)
    }

    /// Build a relationship. `properties` may be a bare mapping, a
    /// `properties` arg-map, null or absent.
    pub fn make_relationship(
        &mut self,
        start: &Node,
        rel_type: &str,
        end: &Node,
        properties: Option<&Value>,
    ) -> Result<Relationship> {
        let properties = extract_properties(properties)?;
        self.create_relationship(start, rel_type, end, properties)
    }

    /// Build a relationship from resolved properties.
    ///
    /// In bound mode, endpoints that are not yet persisted are created by the
    /// same store call and then bound in place; endpoints that already carry
    /// an id are referenced, never re-created.
    pub fn create_relationship(
        &mut self,
        start: &Node,
        rel_type: &str,
        end: &Node,
        properties: Properties,
    ) -> Result<Relationship> {
        if self.is_offline() {
            return Ok(Relationship::new(start, rel_type, end, properties));
        }

        let store = self.store_mut()?;
        if !start.is_bound() && start.same_entity(end) {
            let id = store.create_node(&start.labels(), &start.properties())?;
            start.bind(id);
            debug!(id = id.0, "created self-loop endpoint");
        }

        let created = store.create_relationship(
            &endpoint(start),
            rel_type,
            &endpoint(end),
            &properties,
        )?;
        if !start.is_bound() {
            start.bind(created.start);
        }
        if !end.is_bound() {
            end.bind(created.end);
        }
        debug!(
            id = created.id.0,
            start = created.start.0,
            end = created.end.0,
            rel_type,
            "created relationship"
        );
        Ok(Relationship::with_id(created.id, start, rel_type, end, properties))
    }

    /// Run a query statement against the attached store.
    pub fn query(&mut self, statement: &str) -> Result<Vec<Record>> {
        self.store_mut()?.query(statement)
    }

    fn store_mut(&mut self) -> Result<&mut (dyn GraphStore + 'static)> {
        self.store.as_deref_mut().ok_or_else(not_connected)
    }

    fn check_arguments(&self, args: &[Value]) -> Result<()> {
        for (index, arg) in args.iter().enumerate() {
            if ArgName::ALL.iter().any(|name| is_arg_map(*name, arg)) {
                continue;
            }
            match arg {
                Value::Mapping(map) => match map.single_entry() {
                    Some((key, _)) if self.config.strict_arguments => {
                        return Err(GraphError::UnknownArgument(key.to_string()));
                    }
                    Some((key, _)) => {
                        warn!(index, key, "ignoring unknown node argument");
                    }
                    None => {
                        warn!(index, entries = map.len(), "ignoring node argument that is not an arg-map");
                    }
                },
                other => {
                    warn!(index, kind = other.kind_name(), "ignoring node argument that is not an arg-map");
                }
            }
        }
        Ok(())
    }
}

fn endpoint(node: &Node) -> Endpoint {
    match node.id() {
        Some(id) => Endpoint::Existing(id),
        None => Endpoint::New {
            labels: node.labels(),
            properties: node.properties(),
        },
    }
}

fn not_connected() -> GraphError {
    GraphError::ConnectionUnavailable("no graph store is connected".to_string())
}
