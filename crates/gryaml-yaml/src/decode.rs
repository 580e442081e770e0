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

//! Document trees to values.
//!
//! Tagged subtrees are dispatched to the constructor registered for their
//! tag. A shared subtree (an anchored node referenced through aliases) is
//! decoded once, so every reference yields the same entity and a bound
//! factory persists it once.

use std::collections::HashMap;
use std::rc::Rc;

use gryaml_core::{EntityFactory, GraphError, Map, Node, Tree, Value};
use tracing::trace;

use crate::error::{Result, YamlError};
use crate::registry::{Constructor, Profile, Registry};

/// Decodes trees against a registry, building entities through a factory.
pub struct Decoder<'r, 'f> {
    registry: &'r Registry,
    factory: &'f mut EntityFactory,
    // Holds each shared subtree so its address cannot be reused as a key.
    shared: HashMap<*const Tree, (Rc<Tree>, Value)>,
}

impl<'r, 'f> Decoder<'r, 'f> {
    /// Create a decoder. Sharing spans every call on this decoder.
    pub fn new(registry: &'r Registry, factory: &'f mut EntityFactory) -> Self {
        Self {
            registry,
            factory,
            shared: HashMap::new(),
        }
    }

    /// Decode one tree.
    pub fn decode(&mut self, tree: &Tree) -> Result<Value> {
        match tree {
            Tree::Null => Ok(Value::Null),
            Tree::Bool(b) => Ok(Value::Bool(*b)),
            Tree::Int(n) => Ok(Value::Int(*n)),
            Tree::Float(f) => Ok(Value::Float(*f)),
            Tree::String(s) => Ok(Value::String(s.clone())),
            Tree::Sequence(items) => Ok(Value::Sequence(
                items.iter().map(|item| self.decode(item)).collect::<Result<_>>()?,
            )),
            Tree::Mapping(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map.iter() {
                    out.insert(key, self.decode(item)?);
                }
                Ok(Value::Mapping(out))
            }
            Tree::Tagged(tag, inner) => self.construct(tag, inner),
            Tree::Shared(inner) => {
                let key = Rc::as_ptr(inner);
                if let Some((_, value)) = self.shared.get(&key) {
                    return Ok(value.clone());
                }
                let value = self.decode(inner)?;
                self.shared.insert(key, (Rc::clone(inner), value.clone()));
                Ok(value)
            }
        }
    }

    fn construct(&mut self, tag: &str, inner: &Tree) -> Result<Value> {
        let Some(ctor) = self.registry.constructor(tag).cloned() else {
            return match self.registry.profile() {
                Profile::Safe => Err(YamlError::UnknownTag(tag.to_string())),
                Profile::Full => Ok(Value::Tagged(tag.to_string(), Box::new(self.decode(inner)?))),
            };
        };

        let content = self.decode(inner)?;
        match ctor {
            Constructor::Passthrough => Ok(content),
            Constructor::Node => {
                let args = expect_sequence(tag, &content)?;
                let node = self.factory.make_node(args)?;
                trace!(tag, args = args.len(), "constructed node");
                Ok(Value::Node(node))
            }
            Constructor::Relationship => {
                let items = expect_sequence(tag, &content)?;
                if !(3..=4).contains(&items.len()) {
                    return Err(GraphError::shape(
                        tag,
                        "3 or 4 elements",
                        format!("{} elements", items.len()),
                    )
                    .into());
                }
                let start = expect_node(tag, "start", &items[0])?;
                let rel_type = items[1].as_str().ok_or_else(|| {
                    GraphError::shape(tag, "a string relationship type", items[1].kind_name())
                })?;
                let end = expect_node(tag, "end", &items[2])?;
                let rel = self
                    .factory
                    .make_relationship(start, rel_type, end, items.get(3))?;
                trace!(tag, rel_type, "constructed relationship");
                Ok(Value::Relationship(rel))
            }
            Constructor::Custom(f) => f(content, &mut *self.factory),
        }
    }
}

fn expect_sequence<'v>(tag: &str, content: &'v Value) -> Result<&'v [Value]> {
    content
        .as_sequence()
        .ok_or_else(|| GraphError::shape(tag, "a sequence", content.kind_name()).into())
}

fn expect_node<'v>(tag: &str, role: &str, item: &'v Value) -> Result<&'v Node> {
    item.as_node().ok_or_else(|| {
        GraphError::shape(tag, format!("a node as {}", role), item.kind_name()).into()
    })
}
