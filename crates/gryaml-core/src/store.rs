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

//! The capability set the entity factory needs from a graph database.
//!
//! A store is chosen once, by configuration, and handed to the factory.
//! Driver-specific strategies (how a labelled node is created, how endpoints
//! are matched) live behind this trait in the adapter crates.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::entity::EntityId;
use crate::error::Result;
use crate::map::Map;
use crate::property::{Properties, PropertyValue};

/// How a relationship endpoint is supplied to [`GraphStore::create_relationship`].
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// A node that already exists in the store. It must not be re-created.
    Existing(EntityId),
    /// A node that does not exist yet and is created by the same call.
    New {
        /// Labels of the new node.
        labels: BTreeSet<String>,
        /// Properties of the new node.
        properties: Properties,
    },
}

impl Endpoint {
    /// The id of an existing endpoint.
    pub fn existing_id(&self) -> Option<EntityId> {
        match self {
            Endpoint::Existing(id) => Some(*id),
            Endpoint::New { .. } => None,
        }
    }
}

/// Ids assigned by a relationship creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedRelationship {
    /// The relationship's own id.
    pub id: EntityId,
    /// The id of the start node (existing or newly created).
    pub start: EntityId,
    /// The id of the end node (existing or newly created).
    pub end: EntityId,
}

/// A live graph database connection.
pub trait GraphStore {
    /// Version string reported by the server or driver.
    fn server_version(&self) -> Result<String>;

    /// Persist a node and return its id.
    fn create_node(&mut self, labels: &BTreeSet<String>, properties: &Properties)
        -> Result<EntityId>;

    /// Persist a relationship, creating any [`Endpoint::New`] endpoints in the
    /// same operation.
    fn create_relationship(
        &mut self,
        start: &Endpoint,
        rel_type: &str,
        end: &Endpoint,
        properties: &Properties,
    ) -> Result<CreatedRelationship>;

    /// Run a query statement and return its records.
    fn query(&mut self, statement: &str) -> Result<Vec<Record>>;
}

impl<S: GraphStore + ?Sized> GraphStore for Box<S> {
    fn server_version(&self) -> Result<String> {
        (**self).server_version()
    }

    fn create_node(
        &mut self,
        labels: &BTreeSet<String>,
        properties: &Properties,
    ) -> Result<EntityId> {
        (**self).create_node(labels, properties)
    }

    fn create_relationship(
        &mut self,
        start: &Endpoint,
        rel_type: &str,
        end: &Endpoint,
        properties: &Properties,
    ) -> Result<CreatedRelationship> {
        (**self).create_relationship(start, rel_type, end, properties)
    }

    fn query(&mut self, statement: &str) -> Result<Vec<Record>> {
        (**self).query(statement)
    }
}

/// A store shared with the caller, so it can be inspected after the factory
/// has used it.
impl<S: GraphStore> GraphStore for Rc<RefCell<S>> {
    fn server_version(&self) -> Result<String> {
        self.borrow().server_version()
    }

    fn create_node(
        &mut self,
        labels: &BTreeSet<String>,
        properties: &Properties,
    ) -> Result<EntityId> {
        self.borrow_mut().create_node(labels, properties)
    }

    fn create_relationship(
        &mut self,
        start: &Endpoint,
        rel_type: &str,
        end: &Endpoint,
        properties: &Properties,
    ) -> Result<CreatedRelationship> {
        self.borrow_mut()
            .create_relationship(start, rel_type, end, properties)
    }

    fn query(&mut self, statement: &str) -> Result<Vec<Record>> {
        self.borrow_mut().query(statement)
    }
}

/// A node as returned in a query record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordNode {
    /// Store id.
    pub id: EntityId,
    /// Labels.
    pub labels: BTreeSet<String>,
    /// Properties.
    pub properties: Properties,
}

impl RecordNode {
    /// Create a record node with no labels or properties.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            labels: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    /// Add a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A relationship as returned in a query record, with its endpoints inlined.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRelationship {
    /// Store id.
    pub id: EntityId,
    /// Start node.
    pub start: RecordNode,
    /// Relationship type.
    pub rel_type: String,
    /// End node.
    pub end: RecordNode,
    /// Properties.
    pub properties: Properties,
}

impl RecordRelationship {
    /// Create a record relationship with no properties.
    pub fn new(id: EntityId, start: RecordNode, rel_type: impl Into<String>, end: RecordNode) -> Self {
        Self {
            id,
            start,
            rel_type: rel_type.into(),
            end,
            properties: Properties::new(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A single column value in a query record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A node.
    Node(RecordNode),
    /// A relationship.
    Relationship(RecordRelationship),
    /// A property-like scalar or list.
    Property(PropertyValue),
    /// Null.
    Null,
}

/// One row of query results, columns in return order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    columns: Map<RecordValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn with(mut self, column: impl Into<String>, value: RecordValue) -> Self {
        self.columns.insert(column, value);
        self
    }

    /// Look up a column by name.
    pub fn get(&self, column: &str) -> Option<&RecordValue> {
        self.columns.get(column)
    }

    /// Iterate over columns in return order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.columns.iter()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
