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

//! Loaded values: what a document decodes into.

use crate::entity::{Node, Relationship};
use crate::map::Map;
use crate::property::PropertyValue;

/// A decoded document value.
///
/// Unlike [`Tree`](crate::Tree), a `Value` can hold live entities. Aliases are
/// already resolved: a node referenced twice in the document appears as two
/// clones of the same [`Node`] handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    String(String),
    /// Sequence.
    Sequence(Vec<Value>),
    /// Mapping in document order.
    Mapping(Map<Value>),
    /// A graph node.
    Node(Node),
    /// A graph relationship.
    Relationship(Relationship),
    /// A value under a tag that has no constructor, kept as-is.
    Tagged(String, Box<Value>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The node, if this is one.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    /// The relationship, if this is one.
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Value::Relationship(r) => Some(r),
            _ => None,
        }
    }

    /// String content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Sequence items, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping entries, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Map<Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short description of the kind of value, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Node(_) => "node",
            Value::Relationship(_) => "relationship",
            Value::Tagged(_, _) => "tagged value",
        }
    }

    /// Convert a scalar (or list of scalars) into a property value.
    ///
    /// Returns `None` for nulls, mappings, entities, tagged values and lists
    /// containing any of those.
    pub fn to_property(&self) -> Option<PropertyValue> {
        match self {
            Value::Bool(b) => Some(PropertyValue::Bool(*b)),
            Value::Int(n) => Some(PropertyValue::Int(*n)),
            Value::Float(f) => Some(PropertyValue::Float(*f)),
            Value::String(s) => Some(PropertyValue::String(s.clone())),
            Value::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Value::Sequence(_) => None,
                    other => other.to_property(),
                })
                .collect::<Option<Vec<_>>>()
                .map(PropertyValue::List),
            _ => None,
        }
    }

    /// Iterate over every node reachable from this value, depth first.
    ///
    /// Relationship endpoints are included, so a node may be yielded more
    /// than once.
    pub fn nodes(&self) -> Vec<Node> {
        let mut out = Vec::new();
        self.collect_nodes(&mut out);
        out
    }

    fn collect_nodes(&self, out: &mut Vec<Node>) {
        match self {
            Value::Node(n) => out.push(n.clone()),
            Value::Relationship(r) => {
                out.push(r.start().clone());
                out.push(r.end().clone());
            }
            Value::Sequence(items) => items.iter().for_each(|v| v.collect_nodes(out)),
            Value::Mapping(map) => map.iter().for_each(|(_, v)| v.collect_nodes(out)),
            Value::Tagged(_, inner) => inner.collect_nodes(out),
            _ => {}
        }
    }
}

impl From<PropertyValue> for Value {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Bool(b) => Value::Bool(b),
            PropertyValue::Int(n) => Value::Int(n),
            PropertyValue::Float(f) => Value::Float(f),
            PropertyValue::String(s) => Value::String(s),
            PropertyValue::List(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<Relationship> for Value {
    fn from(rel: Relationship) -> Self {
        Value::Relationship(rel)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}
