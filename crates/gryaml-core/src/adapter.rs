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

//! Read-only views over entity-like objects.
//!
//! The document encoder is written against these traits so that live entities
//! and entities reconstructed from query records serialize identically.

use std::any::Any;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::entity::{EntityKey, Node, Relationship};
use crate::property::Properties;
use crate::store::{RecordNode, RecordRelationship};

/// Anything that looks like a graph node.
pub trait NodeView {
    /// Identity used to recognise repeated occurrences of the same node.
    fn entity_key(&self) -> EntityKey;
    /// Labels of the node.
    fn labels(&self) -> BTreeSet<String>;
    /// Properties of the node.
    fn properties(&self) -> Properties;

    /// Keeps a local [`EntityKey`] valid while the returned value is held.
    /// Views whose key never depends on an address return `None`.
    fn retain(&self) -> Option<Rc<dyn Any>> {
        None
    }
}

/// Anything that looks like a graph relationship.
pub trait RelationshipView {
    /// The endpoint type.
    type Node: NodeView;

    /// Identity of the relationship.
    fn entity_key(&self) -> EntityKey;
    /// Start node.
    fn start(&self) -> &Self::Node;
    /// Relationship type.
    fn rel_type(&self) -> &str;
    /// End node.
    fn end(&self) -> &Self::Node;
    /// Properties of the relationship.
    fn properties(&self) -> Properties;

    /// See [`NodeView::retain`].
    fn retain(&self) -> Option<Rc<dyn Any>> {
        None
    }
}

impl NodeView for Node {
    fn entity_key(&self) -> EntityKey {
        self.key()
    }

    fn labels(&self) -> BTreeSet<String> {
        Node::labels(self)
    }

    fn properties(&self) -> Properties {
        Node::properties(self)
    }

    fn retain(&self) -> Option<Rc<dyn Any>> {
        Some(self.shared_cell())
    }
}

impl RelationshipView for Relationship {
    type Node = Node;

    fn entity_key(&self) -> EntityKey {
        self.key()
    }

    fn start(&self) -> &Node {
        Relationship::start(self)
    }

    fn rel_type(&self) -> &str {
        Relationship::rel_type(self)
    }

    fn end(&self) -> &Node {
        Relationship::end(self)
    }

    fn properties(&self) -> Properties {
        Relationship::properties(self)
    }

    fn retain(&self) -> Option<Rc<dyn Any>> {
        Some(self.shared_cell())
    }
}

impl NodeView for RecordNode {
    fn entity_key(&self) -> EntityKey {
        EntityKey::Bound(self.id)
    }

    fn labels(&self) -> BTreeSet<String> {
        self.labels.clone()
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }
}

impl RelationshipView for RecordRelationship {
    type Node = RecordNode;

    fn entity_key(&self) -> EntityKey {
        EntityKey::Bound(self.id)
    }

    fn start(&self) -> &RecordNode {
        &self.start
    }

    fn rel_type(&self) -> &str {
        &self.rel_type
    }

    fn end(&self) -> &RecordNode {
        &self.end
    }

    fn properties(&self) -> Properties {
        self.properties.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use crate::property::properties;

    fn describe<R: RelationshipView>(rel: &R) -> String {
        format!(
            "{:?}-{}->{:?}",
            rel.start().labels(),
            rel.rel_type(),
            rel.end().labels()
        )
    }

    #[test]
    fn test_live_and_record_views_agree() {
        let a = Node::with_id(EntityId(1), ["person"], properties([("name", "A")]));
        let b = Node::with_id(EntityId(2), ["movie"], Properties::new());
        let live = Relationship::with_id(EntityId(9), &a, "LIKES", &b, Properties::new());

        let record = RecordRelationship::new(
            EntityId(9),
            RecordNode::new(EntityId(1))
                .with_label("person")
                .with_property("name", "A"),
            "LIKES",
            RecordNode::new(EntityId(2)).with_label("movie"),
        );

        assert_eq!(describe(&live), describe(&record));
        assert_eq!(live.entity_key(), record.entity_key());
        assert_eq!(
            NodeView::properties(live.start()),
            NodeView::properties(record.start())
        );
    }

    #[test]
    fn test_unbound_node_has_local_key() {
        let n = Node::empty();
        assert!(matches!(n.entity_key(), EntityKey::Local(_)));
    }

    #[test]
    fn test_retained_cell_outlives_handle() {
        let n = Node::empty();
        let key = n.entity_key();
        let held = NodeView::retain(&n).unwrap();
        drop(n);
        let other = Node::empty();
        assert_ne!(other.entity_key(), key);
        drop(held);
    }

    #[test]
    fn test_record_views_retain_nothing() {
        assert!(NodeView::retain(&RecordNode::new(EntityId(1))).is_none());
    }
}
