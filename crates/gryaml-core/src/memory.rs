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

//! An in-process graph store.
//!
//! Records every create call, which makes it useful for dry runs and for
//! checking that shared nodes are persisted exactly once. It does not evaluate
//! query statements.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::entity::EntityId;
use crate::error::{GraphError, Result};
use crate::property::Properties;
use crate::store::{
    CreatedRelationship, Endpoint, GraphStore, Record, RecordNode, RecordRelationship, RecordValue,
};

/// A relationship held by a [`MemoryGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRelationship {
    /// Relationship id.
    pub id: EntityId,
    /// Start node id.
    pub start: EntityId,
    /// Relationship type.
    pub rel_type: String,
    /// End node id.
    pub end: EntityId,
    /// Properties.
    pub properties: Properties,
}

/// In-memory [`GraphStore`].
#[derive(Debug, Clone)]
pub struct MemoryGraph {
    version: String,
    next_id: i64,
    nodes: BTreeMap<EntityId, RecordNode>,
    relationships: Vec<StoredRelationship>,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraph {
    /// Default reported server version.
    pub const DEFAULT_VERSION: &'static str = "2.0.0";

    /// Create an empty graph.
    pub fn new() -> Self {
        Self::with_version(Self::DEFAULT_VERSION)
    }

    /// Create an empty graph that reports the given server version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            next_id: 0,
            nodes: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }

    /// Number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored relationships.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Look up a stored node.
    pub fn node(&self, id: EntityId) -> Option<&RecordNode> {
        self.nodes.get(&id)
    }

    /// Stored nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &RecordNode> {
        self.nodes.values()
    }

    /// Stored relationships in creation order.
    pub fn relationships(&self) -> &[StoredRelationship] {
        &self.relationships
    }

    /// Every stored entity as query records: one `n` record per node, then one
    /// `r` record per relationship with its endpoints inlined.
    pub fn records(&self) -> Vec<Record> {
        let mut out: Vec<Record> = self
            .nodes
            .values()
            .map(|node| Record::new().with("n", RecordValue::Node(node.clone())))
            .collect();
        for rel in &self.relationships {
            if let (Some(start), Some(end)) = (self.nodes.get(&rel.start), self.nodes.get(&rel.end)) {
                let record = RecordRelationship {
                    id: rel.id,
                    start: start.clone(),
                    rel_type: rel.rel_type.clone(),
                    end: end.clone(),
                    properties: rel.properties.clone(),
                };
                out.push(Record::new().with("r", RecordValue::Relationship(record)));
            }
        }
        out
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn resolve(&mut self, endpoint: &Endpoint) -> Result<EntityId> {
        match endpoint {
            Endpoint::Existing(id) if self.nodes.contains_key(id) => Ok(*id),
            Endpoint::Existing(id) => Err(GraphError::Store(format!("node {} does not exist", id))),
            Endpoint::New { labels, properties } => self.create_node(labels, properties),
        }
    }
}

impl GraphStore for MemoryGraph {
    fn server_version(&self) -> Result<String> {
        Ok(self.version.clone())
    }

    fn create_node(
        &mut self,
        labels: &BTreeSet<String>,
        properties: &Properties,
    ) -> Result<EntityId> {
        let id = self.allocate();
        trace!(id = id.0, ?labels, "memory graph: create node");
        self.nodes.insert(
            id,
            RecordNode {
                id,
                labels: labels.clone(),
                properties: properties.clone(),
            },
        );
        Ok(id)
    }

    fn create_relationship(
        &mut self,
        start: &Endpoint,
        rel_type: &str,
        end: &Endpoint,
        properties: &Properties,
    ) -> Result<CreatedRelationship> {
        if rel_type.is_empty() {
            return Err(GraphError::Store("relationship type must not be empty".to_string()));
        }
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        let id = self.allocate();
        trace!(id = id.0, start = start.0, end = end.0, rel_type, "memory graph: create relationship");
        self.relationships.push(StoredRelationship {
            id,
            start,
            rel_type: rel_type.to_string(),
            end,
            properties: properties.clone(),
        });
        Ok(CreatedRelationship { id, start, end })
    }

    fn query(&mut self, statement: &str) -> Result<Vec<Record>> {
        debug!(statement, "memory graph: query rejected");
        Err(GraphError::Store(
            "the in-memory graph does not evaluate query statements".to_string(),
        ))
    }
}
