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

//! Builders for entity fixtures.
//!
//! Entities built here are offline: they carry no store identity.

use gryaml_core::{properties, Node, Properties, PropertyValue, Relationship, Value};

/// Builder for a small graph of named nodes and the relationships between
/// them.
///
/// # Examples
///
/// ```
/// use gryaml_test::fixtures::builders::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .node("a", ["person"], [("name", "A")])
///     .bare_node("b", ["person"])
///     .link("a", "KNOWS", "b")
///     .build();
///
/// assert_eq!(graph.values().len(), 3);
/// assert!(graph.relationships()[0].end().same_entity(graph.node("b").unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<(String, Node)>,
    relationships: Vec<Relationship>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node under `key`. A later node with the same key replaces it
    /// for subsequent lookups.
    pub fn node<L, S, P, K, V>(mut self, key: &str, labels: L, props: P) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        self.nodes
            .push((key.to_string(), Node::new(labels, properties(props))));
        self
    }

    /// Adds a node without properties.
    pub fn bare_node<L, S>(mut self, key: &str, labels: L) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes
            .push((key.to_string(), Node::new(labels, Properties::new())));
        self
    }

    /// Adds a relationship between two previously added nodes.
    ///
    /// # Panics
    ///
    /// Panics if either key names no node.
    pub fn relationship<P, K, V>(mut self, start: &str, rel_type: &str, end: &str, props: P) -> Self
    where
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let rel = Relationship::new(
            self.lookup(start),
            rel_type,
            self.lookup(end),
            properties(props),
        );
        self.relationships.push(rel);
        self
    }

    /// Adds a relationship without properties.
    ///
    /// # Panics
    ///
    /// Panics if either key names no node.
    pub fn link(mut self, start: &str, rel_type: &str, end: &str) -> Self {
        let rel = Relationship::new(self.lookup(start), rel_type, self.lookup(end), Properties::new());
        self.relationships.push(rel);
        self
    }

    /// Builds the graph.
    pub fn build(self) -> Graph {
        Graph {
            nodes: self.nodes,
            relationships: self.relationships,
        }
    }

    fn lookup(&self, key: &str) -> &Node {
        match self.nodes.iter().rev().find(|(k, _)| k == key) {
            Some((_, node)) => node,
            None => panic!("GraphBuilder: no node named '{}'", key),
        }
    }
}

/// Nodes and relationships produced by a [`GraphBuilder`].
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<(String, Node)>,
    relationships: Vec<Relationship>,
}

impl Graph {
    /// The node added under `key`.
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Every node, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(_, node)| node)
    }

    /// Every relationship, in insertion order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Nodes followed by relationships, the layout of the sample documents.
    pub fn values(&self) -> Vec<Value> {
        self.nodes()
            .cloned()
            .map(Value::Node)
            .chain(self.relationships.iter().cloned().map(Value::Relationship))
            .collect()
    }

    /// [`values`](Self::values) as one sequence.
    pub fn to_value(&self) -> Value {
        Value::Sequence(self.values())
    }
}

/// Bob, a person and comedian.
pub fn bob() -> Node {
    Node::new(
        ["person"],
        properties([("name", "Bob"), ("occupation", "Comedian")]),
    )
}

/// The entities of [`relationships`](crate::fixtures::relationships).
pub fn matrix_graph() -> Graph {
    GraphBuilder::new()
        .node("lana", ["person"], [("name", "Lana Wachowski")])
        .node(
            "keanu",
            ["person"],
            [
                ("name", PropertyValue::from("Keanu Reeves")),
                ("born", PropertyValue::from(1964i64)),
            ],
        )
        .node(
            "matrix",
            ["movie"],
            [
                ("title", "The Matrix"),
                ("tagline", "Welcome to the Real World"),
            ],
        )
        .link("lana", "DIRECTED", "matrix")
        .relationship(
            "keanu",
            "ACTED_IN",
            "matrix",
            [("roles", PropertyValue::from(vec!["Neo"]))],
        )
        .build()
}
