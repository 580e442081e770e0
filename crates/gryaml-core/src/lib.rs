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

//! Graph entity model and entity factory for gryaml.
//!
//! This crate holds everything that does not depend on a particular text
//! format or database driver:
//!
//! - [`Node`] and [`Relationship`], shared handles onto live graph entities
//! - [`NodeView`] / [`RelationshipView`], the read-only views the document
//!   encoder is written against
//! - [`Tree`], the generic document tree, and [`Value`], its decoded form
//! - the arg-map convention ([`ArgName`], [`is_arg_map`], [`extract_properties`])
//! - [`EntityFactory`], which builds entities offline or persists them through
//!   a [`GraphStore`]
//! - [`MemoryGraph`], an in-process store
//!
//! # Example
//!
//! ```rust
//! use gryaml_core::{EntityFactory, Map, Value};
//!
//! let mut factory = EntityFactory::offline();
//! let labels = Value::Mapping(Map::singleton(
//!     "labels",
//!     Value::Sequence(vec![Value::from("person")]),
//! ));
//! let node = factory.make_node(&[labels]).unwrap();
//! assert!(node.has_label("person"));
//! assert!(!node.is_bound());
//! ```

mod adapter;
pub mod arg_map;
mod entity;
mod error;
mod factory;
mod map;
mod memory;
mod property;
mod store;
mod tree;
mod value;

pub use adapter::{NodeView, RelationshipView};
pub use arg_map::{
    extract_properties, find_arg_map, is_arg_map, labels_from_value, properties_from_value,
    to_arg_map, ArgName,
};
pub use entity::{EntityId, EntityKey, Node, Relationship};
pub use error::{GraphError, Result};
pub use factory::{EntityFactory, FactoryConfig, FactoryConfigBuilder, FactoryMode};
pub use map::Map;
pub use memory::{MemoryGraph, StoredRelationship};
pub use property::{properties, Properties, PropertyValue};
pub use store::{
    CreatedRelationship, Endpoint, GraphStore, Record, RecordNode, RecordRelationship, RecordValue,
};
pub use tree::Tree;
pub use value::Value;
