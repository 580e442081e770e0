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

//! Live graph entities: nodes and relationships.
//!
//! Both types are handles onto shared cells. Cloning a handle never copies the
//! entity, so a node used as the endpoint of several relationships stays a
//! single entity: labels or properties changed through one handle are visible
//! through all of them, and binding the node to a store identity (which
//! happens in place) is observed by every relationship that references it.
//!
//! Handles are `Rc`-based and therefore `!Send`. Entity construction is a
//! single-threaded activity.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::property::{Properties, PropertyValue};

/// Identity assigned to an entity by a graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity used to recognise the same entity seen more than once.
///
/// Bound entities are identified by their store id, so two handles that were
/// hydrated separately from the same database row are still one entity.
/// Unbound entities are identified by the address of their shared cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    /// Persistent identity from a store.
    Bound(EntityId),
    /// In-memory identity of an unbound entity.
    Local(usize),
}

struct NodeCell {
    id: Cell<Option<EntityId>>,
    labels: RefCell<BTreeSet<String>>,
    properties: RefCell<Properties>,
}

/// A graph vertex with a set of labels and a property mapping.
#[derive(Clone)]
pub struct Node {
    cell: Rc<NodeCell>,
}

impl Node {
    /// Create an unbound node.
    pub fn new<L, S>(labels: L, properties: Properties) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cell: Rc::new(NodeCell {
                id: Cell::new(None),
                labels: RefCell::new(labels.into_iter().map(Into::into).collect()),
                properties: RefCell::new(properties),
            }),
        }
    }

    /// Create an unbound node with no labels and no properties.
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new(), Properties::new())
    }

    /// Create a node that already carries a store identity.
    pub fn with_id<L, S>(id: EntityId, labels: L, properties: Properties) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let node = Self::new(labels, properties);
        node.cell.id.set(Some(id));
        node
    }

    /// The store identity, if the node has been persisted.
    pub fn id(&self) -> Option<EntityId> {
        self.cell.id.get()
    }

    /// Returns true once the node carries a store identity.
    pub fn is_bound(&self) -> bool {
        self.id().is_some()
    }

    pub(crate) fn bind(&self, id: EntityId) {
        self.cell.id.set(Some(id));
    }

    /// Identity key of this node.
    pub fn key(&self) -> EntityKey {
        match self.id() {
            Some(id) => EntityKey::Bound(id),
            None => EntityKey::Local(Rc::as_ptr(&self.cell) as usize),
        }
    }

    /// A reference to the shared cell, holding its address (and therefore
    /// a local [`EntityKey`]) stable while it lives.
    pub(crate) fn shared_cell(&self) -> Rc<dyn Any> {
        let cell: Rc<dyn Any> = self.cell.clone();
        cell
    }

    /// Returns true if both handles refer to the same entity cell.
    pub fn same_entity(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// A snapshot of the node's labels.
    pub fn labels(&self) -> BTreeSet<String> {
        self.cell.labels.borrow().clone()
    }

    /// Returns true if the node carries `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.cell.labels.borrow().contains(label)
    }

    /// Add a label. Returns false if it was already present.
    pub fn add_label(&self, label: impl Into<String>) -> bool {
        self.cell.labels.borrow_mut().insert(label.into())
    }

    /// Remove a label. Returns false if it was not present.
    pub fn remove_label(&self, label: &str) -> bool {
        self.cell.labels.borrow_mut().remove(label)
    }

    /// A snapshot of the node's properties.
    pub fn properties(&self) -> Properties {
        self.cell.properties.borrow().clone()
    }

    /// Look up a single property.
    pub fn property(&self, key: &str) -> Option<PropertyValue> {
        self.cell.properties.borrow().get(key).cloned()
    }

    /// Set a property, returning the previous value.
    pub fn set_property(
        &self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.cell
            .properties
            .borrow_mut()
            .insert(key.into(), value.into())
    }

    /// Remove a property, returning its value.
    pub fn remove_property(&self, key: &str) -> Option<PropertyValue> {
        self.cell.properties.borrow_mut().remove(key)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                self.same_entity(other)
                    || (*self.cell.labels.borrow() == *other.cell.labels.borrow()
                        && *self.cell.properties.borrow() == *other.cell.properties.borrow())
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("labels", &*self.cell.labels.borrow())
            .field("properties", &*self.cell.properties.borrow())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        if let Some(id) = self.id() {
            write!(f, "n{}", id)?;
        }
        for label in self.cell.labels.borrow().iter() {
            write!(f, ":{}", label)?;
        }
        write_properties(f, &self.cell.properties.borrow())?;
        write!(f, ")")
    }
}

struct RelationshipCell {
    id: Cell<Option<EntityId>>,
    start: Node,
    rel_type: String,
    end: Node,
    properties: RefCell<Properties>,
}

/// A directed, typed edge between two nodes.
#[derive(Clone)]
pub struct Relationship {
    cell: Rc<RelationshipCell>,
}

impl Relationship {
    /// Create an unbound relationship. The endpoints are shared, not copied.
    pub fn new(start: &Node, rel_type: impl Into<String>, end: &Node, properties: Properties) -> Self {
        Self {
            cell: Rc::new(RelationshipCell {
                id: Cell::new(None),
                start: start.clone(),
                rel_type: rel_type.into(),
                end: end.clone(),
                properties: RefCell::new(properties),
            }),
        }
    }

    /// Create a relationship that already carries a store identity.
    pub fn with_id(
        id: EntityId,
        start: &Node,
        rel_type: impl Into<String>,
        end: &Node,
        properties: Properties,
    ) -> Self {
        let rel = Self::new(start, rel_type, end, properties);
        rel.cell.id.set(Some(id));
        rel
    }

    /// The store identity, if the relationship has been persisted.
    pub fn id(&self) -> Option<EntityId> {
        self.cell.id.get()
    }

    /// Returns true once the relationship carries a store identity.
    pub fn is_bound(&self) -> bool {
        self.id().is_some()
    }

    /// Identity key of this relationship.
    pub fn key(&self) -> EntityKey {
        match self.id() {
            Some(id) => EntityKey::Bound(id),
            None => EntityKey::Local(Rc::as_ptr(&self.cell) as usize),
        }
    }

    /// A reference to the shared cell, holding its address stable while it
    /// lives.
    pub(crate) fn shared_cell(&self) -> Rc<dyn Any> {
        let cell: Rc<dyn Any> = self.cell.clone();
        cell
    }

    /// Returns true if both handles refer to the same entity cell.
    pub fn same_entity(&self, other: &Relationship) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// The start node.
    pub fn start(&self) -> &Node {
        &self.cell.start
    }

    /// The relationship type.
    pub fn rel_type(&self) -> &str {
        &self.cell.rel_type
    }

    /// The end node.
    pub fn end(&self) -> &Node {
        &self.cell.end
    }

    /// A snapshot of the relationship's properties.
    pub fn properties(&self) -> Properties {
        self.cell.properties.borrow().clone()
    }

    /// Look up a single property.
    pub fn property(&self, key: &str) -> Option<PropertyValue> {
        self.cell.properties.borrow().get(key).cloned()
    }

    /// Set a property, returning the previous value.
    pub fn set_property(
        &self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.cell
            .properties
            .borrow_mut()
            .insert(key.into(), value.into())
    }

    /// Remove a property, returning its value.
    pub fn remove_property(&self, key: &str) -> Option<PropertyValue> {
        self.cell.properties.borrow_mut().remove(key)
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                self.same_entity(other)
                    || (self.rel_type() == other.rel_type()
                        && self.start() == other.start()
                        && self.end() == other.end()
                        && *self.cell.properties.borrow() == *other.cell.properties.borrow())
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("id", &self.id())
            .field("start", self.start())
            .field("rel_type", &self.cell.rel_type)
            .field("end", self.end())
            .field("properties", &*self.cell.properties.borrow())
            .finish()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-[", self.start())?;
        if let Some(id) = self.id() {
            write!(f, "r{}", id)?;
        }
        write!(f, ":{}", self.rel_type())?;
        write_properties(f, &self.cell.properties.borrow())?;
        write!(f, "]->{}", self.end())
    }
}

fn write_properties(f: &mut fmt::Formatter<'_>, properties: &Properties) -> fmt::Result {
    if properties.is_empty() {
        return Ok(());
    }
    write!(f, " {{")?;
    for (i, (key, value)) in properties.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    write!(f, "}}")
}
