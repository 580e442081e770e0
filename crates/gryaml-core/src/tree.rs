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

//! The generic document tree.
//!
//! A `Tree` is what text parses into and what emission consumes. Entities
//! never appear in a tree: the tag codec encodes them into tagged sequences
//! first.

use std::fmt;
use std::rc::Rc;

use crate::map::Map;
use crate::property::PropertyValue;

/// A node of a parsed or about-to-be-emitted document.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Null scalar.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Sequence.
    Sequence(Vec<Tree>),
    /// String-keyed mapping in document order.
    Mapping(Map<Tree>),
    /// A non-core tag applied to a subtree.
    Tagged(String, Box<Tree>),
    /// A subtree referenced from more than one place. All references hold
    /// the same `Rc`; emission writes it once with an anchor.
    Shared(Rc<Tree>),
}

impl Tree {
    /// Wrap a subtree so it can be referenced from several places.
    pub fn shared(tree: Tree) -> Rc<Tree> {
        Rc::new(tree)
    }

    /// Tag a subtree.
    pub fn tagged(tag: impl Into<String>, tree: Tree) -> Tree {
        Tree::Tagged(tag.into(), Box::new(tree))
    }

    /// Follow `Shared` indirections to the underlying subtree.
    pub fn resolve(&self) -> &Tree {
        let mut current = self;
        while let Tree::Shared(inner) = current {
            current = inner;
        }
        current
    }

    /// The tag of this subtree, looking through `Shared`.
    pub fn tag(&self) -> Option<&str> {
        match self.resolve() {
            Tree::Tagged(tag, _) => Some(tag),
            _ => None,
        }
    }

    /// String content, looking through `Shared`.
    pub fn as_str(&self) -> Option<&str> {
        match self.resolve() {
            Tree::String(s) => Some(s),
            _ => None,
        }
    }

    /// Sequence items, looking through `Shared`.
    pub fn as_sequence(&self) -> Option<&[Tree]> {
        match self.resolve() {
            Tree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping entries, looking through `Shared`.
    pub fn as_mapping(&self) -> Option<&Map<Tree>> {
        match self.resolve() {
            Tree::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short description of the kind of subtree, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Tree::Null => "null",
            Tree::Bool(_) => "boolean",
            Tree::Int(_) => "integer",
            Tree::Float(_) => "float",
            Tree::String(_) => "string",
            Tree::Sequence(_) => "sequence",
            Tree::Mapping(_) => "mapping",
            Tree::Tagged(_, _) => "tagged value",
            Tree::Shared(inner) => inner.kind_name(),
        }
    }
}

impl From<&PropertyValue> for Tree {
    fn from(value: &PropertyValue) -> Self {
        match value {
            PropertyValue::Bool(b) => Tree::Bool(*b),
            PropertyValue::Int(n) => Tree::Int(*n),
            PropertyValue::Float(f) => Tree::Float(*f),
            PropertyValue::String(s) => Tree::String(s.clone()),
            PropertyValue::List(items) => Tree::Sequence(items.iter().map(Tree::from).collect()),
        }
    }
}

impl From<&str> for Tree {
    fn from(s: &str) -> Self {
        Tree::String(s.to_string())
    }
}

impl From<String> for Tree {
    fn from(s: String) -> Self {
        Tree::String(s)
    }
}

impl From<i64> for Tree {
    fn from(n: i64) -> Self {
        Tree::Int(n)
    }
}

impl From<bool> for Tree {
    fn from(b: bool) -> Self {
        Tree::Bool(b)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Null => write!(f, "null"),
            Tree::Bool(b) => write!(f, "{}", b),
            Tree::Int(n) => write!(f, "{}", n),
            Tree::Float(x) => write!(f, "{:?}", x),
            Tree::String(s) => write!(f, "{:?}", s),
            Tree::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Tree::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Tree::Tagged(tag, inner) => write!(f, "{} {}", tag, inner),
            Tree::Shared(inner) => write!(f, "{}", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_through_shared() {
        let inner = Tree::shared(Tree::tagged("!x", Tree::Sequence(vec![])));
        let outer = Tree::Shared(Rc::clone(&inner));
        assert_eq!(outer.tag(), Some("!x"));
        assert_eq!(outer.kind_name(), "tagged value");
    }

    #[test]
    fn test_property_conversion() {
        let tree = Tree::from(&PropertyValue::from(vec!["a", "b"]));
        assert_eq!(
            tree,
            Tree::Sequence(vec![Tree::from("a"), Tree::from("b")])
        );
    }

    #[test]
    fn test_display() {
        let tree = Tree::tagged(
            "!gryaml.node",
            Tree::Sequence(vec![Tree::Mapping(Map::singleton("labels", Tree::Sequence(vec!["person".into()])))]),
        );
        assert_eq!(tree.to_string(), "!gryaml.node [{\"labels\": [\"person\"]}]");
    }
}
