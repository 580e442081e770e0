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

//! # gryaml - graph entities as YAML documents
//!
//! gryaml writes graph database nodes and relationships as YAML and reads
//! them back, either as live entities persisted through a graph store or as
//! plain data.
//!
//! ## Quick Start
//!
//! ```rust
//! use gryaml::{dump, load, properties, Node, Relationship, Value};
//!
//! let bob = Node::new(["person"], properties([("name", "Bob")]));
//! let movie = Node::new(["movie"], properties([("title", "The Matrix")]));
//! let likes = Relationship::new(&bob, "LIKES", &movie, properties([("stars", 5i64)]));
//!
//! let yaml = dump(&Value::from(likes.clone())).unwrap();
//! let back = load(&yaml).unwrap();
//! assert_eq!(back.as_relationship().unwrap(), &likes);
//! ```
//!
//! ## Layers
//!
//! - entity model, arg-maps and the entity factory, re-exported at the root
//! - [`yaml`]: the tag codec (feature = "yaml", on by default)
//! - [`neo4j`]: a Cypher-backed graph store (feature = "neo4j")
//!
//! ## Rich and simple documents
//!
//! Rich documents tag entities with `!gryaml.node` / `!gryaml.rel` and load
//! back as entities. Simple documents carry no tags and load as plain data:
//!
//! ```rust
//! use gryaml::{dump_simple, properties, Node, Value};
//!
//! let bob = Node::new(["person"], properties([("name", "Bob")]));
//! let yaml = dump_simple(&Value::from(bob)).unwrap();
//! assert!(!yaml.contains('!'));
//! ```

pub use gryaml_core::{
    extract_properties, find_arg_map, is_arg_map, properties, to_arg_map, ArgName,
    CreatedRelationship, Endpoint, EntityFactory, EntityId, EntityKey, FactoryConfig,
    FactoryConfigBuilder, FactoryMode, GraphError, GraphStore, Map, MemoryGraph, Node, NodeView,
    Properties, PropertyValue, Record, RecordNode, RecordRelationship, RecordValue, Relationship,
    RelationshipView, StoredRelationship, Tree, Value,
};

mod error;
pub use error::{Error, Result, ResultExt};

/// YAML tag codec (requires `yaml` feature).
#[cfg(feature = "yaml")]
pub mod yaml {
    pub use gryaml_yaml::{
        decode, dump, dump_all, emit, emit_all, encode, from_yaml_value, load, load_all, parse,
        parse_all, to_yaml_value, tree_from_yaml_value, tree_to_yaml_value, Constructor,
        ConstructorFn, Decoder, DumpConfig, DumpConfigBuilder, Dumper, Encoder, EntityKind,
        LoadConfig, LoadConfigBuilder, Loader, Mode, Profile, Registry, RegistryBuilder,
        Representation, YamlError, DEFAULT_MAX_ALIASES, DEFAULT_MAX_DOCUMENT_SIZE,
        DEFAULT_MAX_NESTING_DEPTH, NODE_TAG, REL_TAG,
    };
}

/// Cypher-backed graph store (requires `neo4j` feature).
#[cfg(feature = "neo4j")]
pub mod neo4j {
    pub use gryaml_neo4j::{
        column_values, connect, cypher, records_to_values, ConnectionConfig,
        ConnectionConfigBuilder, CypherExecutor, CypherScript, CypherStatement, CypherStore,
        CypherValue, DriverVersion, Neo4jError, RecordConverter, Result as Neo4jResult,
        ScriptExecutor, StatementType, DEFAULT_MAX_STRING_LENGTH, DEFAULT_URI, ENV_DRIVER_VERSION,
        ENV_PASSWORD, ENV_URI, ENV_USER,
    };
}

/// Load one rich document into unbound entities.
///
/// ```rust
/// let value = gryaml::load("!gryaml.node [{labels: [person]}]").unwrap();
/// assert!(value.as_node().unwrap().has_label("person"));
/// ```
#[cfg(feature = "yaml")]
pub fn load(text: &str) -> Result<Value> {
    load_with(text, &mut EntityFactory::offline())
}

/// Load one rich document through `factory`, persisting entities when the
/// factory is bound.
#[cfg(feature = "yaml")]
pub fn load_with(text: &str, factory: &mut EntityFactory) -> Result<Value> {
    Ok(gryaml_yaml::load(text, &yaml::Registry::rich(), factory)?)
}

/// Load every document of a rich stream through `factory`.
#[cfg(feature = "yaml")]
pub fn load_all(text: &str, factory: &mut EntityFactory) -> Result<Vec<Value>> {
    Ok(gryaml_yaml::load_all(text, &yaml::Registry::rich(), factory)?)
}

/// Dump a value as a rich document.
#[cfg(feature = "yaml")]
pub fn dump(value: &Value) -> Result<String> {
    Ok(gryaml_yaml::dump(value, &yaml::Registry::rich())?)
}

/// Dump a value as a simple, tag-free document.
#[cfg(feature = "yaml")]
pub fn dump_simple(value: &Value) -> Result<String> {
    Ok(gryaml_yaml::dump(value, &yaml::Registry::simple())?)
}

/// Dump values as a rich multi-document stream.
#[cfg(feature = "yaml")]
pub fn dump_all(values: &[Value]) -> Result<String> {
    Ok(gryaml_yaml::dump_all(values, &yaml::Registry::rich())?)
}

/// Probe a server and return a factory bound to it.
#[cfg(feature = "neo4j")]
pub fn connect<E>(config: neo4j::ConnectionConfig, executor: E) -> Result<EntityFactory>
where
    E: neo4j::CypherExecutor + 'static,
{
    let store = gryaml_neo4j::connect(config, executor)?;
    Ok(EntityFactory::connected(store))
}

/// Like [`connect`], reading the configuration from the environment.
#[cfg(feature = "neo4j")]
pub fn connect_from_env<E>(executor: E) -> Result<EntityFactory>
where
    E: neo4j::CypherExecutor + 'static,
{
    connect(neo4j::ConnectionConfig::from_env()?, executor)
}

/// Run a query through a bound factory and return one value per record,
/// with entities shared by id.
#[cfg(feature = "neo4j")]
pub fn query_values(factory: &mut EntityFactory, statement: &str) -> Result<Vec<Value>> {
    let records = factory.query(statement)?;
    Ok(gryaml_neo4j::records_to_values(&records))
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(all(test, feature = "yaml"))]
mod tests {
    use super::*;

    #[test]
    fn test_load_node() {
        let value = load("!gryaml.node\n- labels: [person]\n- properties: {name: Bob}\n").unwrap();
        let node = value.as_node().unwrap();
        assert!(!node.is_bound());
        assert_eq!(node.property("name"), Some(PropertyValue::from("Bob")));
    }

    #[test]
    fn test_dump_rich_and_simple() {
        let bob = Value::from(Node::new(["person"], properties([("name", "Bob")])));
        assert!(dump(&bob).unwrap().starts_with("--- !gryaml.node\n"));
        assert_eq!(
            dump_simple(&bob).unwrap(),
            "- labels:\n    - person\n- properties:\n    name: Bob\n"
        );
    }

    #[test]
    fn test_load_with_bound_factory() {
        let graph = std::rc::Rc::new(std::cell::RefCell::new(MemoryGraph::new()));
        let mut factory = EntityFactory::connected(std::rc::Rc::clone(&graph));
        let value = load_with("!gryaml.node [{labels: [person]}]", &mut factory).unwrap();
        assert!(value.as_node().unwrap().is_bound());
        assert_eq!(graph.borrow().node_count(), 1);
    }

    #[test]
    fn test_errors_convert() {
        let err = load("!gryaml.rel [only-one]").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
        assert!(err.as_graph_error().is_some());
    }

    #[test]
    fn test_stream_round_trip() {
        let a = Value::from(Node::new(["a"], Properties::new()));
        let b = Value::from(Node::new(["b"], Properties::new()));
        let text = dump_all(&[a, b]).unwrap();
        let values = load_all(&text, &mut EntityFactory::offline()).unwrap();
        assert_eq!(values.len(), 2);
        assert!(values[1].as_node().unwrap().has_label("b"));
    }
}
