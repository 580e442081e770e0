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

//! Entities to document trees.
//!
//! A node is written as a sequence of up to two arg-maps, labels first, and
//! an empty arg-map is left out. A relationship is written as
//! `[start, type, end]` plus a trailing properties arg-map when it has any.
//! Each distinct node becomes one shared subtree, however many relationships
//! reference it.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use gryaml_core::{
    to_arg_map, ArgName, EntityKey, Map, NodeView, Properties, RelationshipView, Tree, Value,
};
use tracing::trace;

use crate::error::{Result, YamlError};
use crate::registry::{EntityKind, Registry, Representation};

/// What a node looked like when its subtree was built.
struct NodeEntry {
    labels: BTreeSet<String>,
    properties: Properties,
    tree: Rc<Tree>,
    _retained: Option<Rc<dyn Any>>,
}

/// What a relationship looked like when its subtree was built. Endpoints are
/// compared by subtree, so a changed endpoint invalidates the entry.
struct RelationshipEntry {
    start: Rc<Tree>,
    rel_type: String,
    end: Rc<Tree>,
    properties: Properties,
    tree: Rc<Tree>,
    _retained: Option<Rc<dyn Any>>,
}

/// Encodes values against a registry, sharing repeated entities.
pub struct Encoder<'r> {
    registry: &'r Registry,
    nodes: HashMap<EntityKey, NodeEntry>,
    relationships: HashMap<EntityKey, RelationshipEntry>,
}

impl<'r> Encoder<'r> {
    /// Create an encoder.
    ///
    /// Entity sharing spans every call on this encoder. An entity changed
    /// between calls is encoded afresh; its earlier subtree is left as it was.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            nodes: HashMap::new(),
            relationships: HashMap::new(),
        }
    }

    /// Encode a node (or anything that looks like one).
    pub fn encode_node<N: NodeView + ?Sized>(&mut self, node: &N) -> Result<Tree> {
        Ok(Tree::Shared(self.node_tree(node)?))
    }

    /// Encode a relationship (or anything that looks like one).
    pub fn encode_relationship<R: RelationshipView + ?Sized>(&mut self, rel: &R) -> Result<Tree> {
        let key = rel.entity_key();
        let start = self.node_tree(rel.start())?;
        let end = self.node_tree(rel.end())?;
        let rel_type = rel.rel_type();
        let properties = rel.properties();

        if let Some(entry) = self.relationships.get(&key) {
            if Rc::ptr_eq(&entry.start, &start)
                && Rc::ptr_eq(&entry.end, &end)
                && entry.rel_type == rel_type
                && entry.properties == properties
            {
                return Ok(Tree::Shared(Rc::clone(&entry.tree)));
            }
        }

        let mut items = Vec::with_capacity(4);
        items.push(Tree::Shared(Rc::clone(&start)));
        items.push(Tree::String(rel_type.to_string()));
        items.push(Tree::Shared(Rc::clone(&end)));
        if !properties.is_empty() {
            items.push(to_arg_map(ArgName::Properties, properties_tree(&properties)));
        }

        let tree = Rc::new(self.represent(EntityKind::Relationship, Tree::Sequence(items))?);
        trace!(?key, rel_type, "encoded relationship");
        self.relationships.insert(
            key,
            RelationshipEntry {
                start,
                rel_type: rel_type.to_string(),
                end,
                properties,
                tree: Rc::clone(&tree),
                _retained: rel.retain(),
            },
        );
        Ok(Tree::Shared(tree))
    }

    fn node_tree<N: NodeView + ?Sized>(&mut self, node: &N) -> Result<Rc<Tree>> {
        let key = node.entity_key();
        let labels = node.labels();
        let properties = node.properties();
        if let Some(entry) = self.nodes.get(&key) {
            if entry.labels == labels && entry.properties == properties {
                return Ok(Rc::clone(&entry.tree));
            }
        }

        let mut args = Vec::with_capacity(2);
        if !labels.is_empty() {
            let labels = labels.iter().cloned().map(Tree::String).collect();
            args.push(to_arg_map(ArgName::Labels, Tree::Sequence(labels)));
        }
        if !properties.is_empty() {
            args.push(to_arg_map(ArgName::Properties, properties_tree(&properties)));
        }

        let tree = Rc::new(self.represent(EntityKind::Node, Tree::Sequence(args))?);
        trace!(?key, "encoded node");
        self.nodes.insert(
            key,
            NodeEntry {
                labels,
                properties,
                tree: Rc::clone(&tree),
                _retained: node.retain(),
            },
        );
        Ok(tree)
    }

    /// Encode a loaded value, entities included.
    pub fn encode_value(&mut self, value: &Value) -> Result<Tree> {
        Ok(match value {
            Value::Null => Tree::Null,
            Value::Bool(b) => Tree::Bool(*b),
            Value::Int(n) => Tree::Int(*n),
            Value::Float(f) => Tree::Float(*f),
            Value::String(s) => Tree::String(s.clone()),
            Value::Sequence(items) => Tree::Sequence(
                items
                    .iter()
                    .map(|item| self.encode_value(item))
                    .collect::<Result<_>>()?,
            ),
            Value::Mapping(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map.iter() {
                    out.insert(key, self.encode_value(item)?);
                }
                Tree::Mapping(out)
            }
            Value::Node(node) => self.encode_node(node)?,
            Value::Relationship(rel) => self.encode_relationship(rel)?,
            Value::Tagged(tag, inner) => Tree::tagged(tag.clone(), self.encode_value(inner)?),
        })
    }

    fn represent(&self, kind: EntityKind, body: Tree) -> Result<Tree> {
        match self.registry.representer(kind) {
            Some(Representation::Tagged(tag)) => Ok(Tree::tagged(tag.clone(), body)),
            Some(Representation::Native) => Ok(body),
            None => Err(YamlError::NoRepresenter(kind.to_string())),
        }
    }
}

fn properties_tree(properties: &Properties) -> Tree {
    Tree::Mapping(
        properties
            .iter()
            .map(|(key, value)| (key.as_str(), Tree::from(value)))
            .collect(),
    )
}
