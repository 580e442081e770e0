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

//! End-to-end tests for dumping and loading graph entities.

use std::cell::RefCell;
use std::rc::Rc;

use gryaml_core::{
    properties, EntityFactory, FactoryConfig, GraphError, MemoryGraph, Node, Properties,
    PropertyValue, RecordValue, Relationship, Value,
};
use gryaml_test::fixtures::builders::{bob, GraphBuilder};
use gryaml_yaml::{
    dump, dump_all, emit, load, load_all, parse, Decoder, DumpConfig, Dumper, Encoder, LoadConfig,
    Loader, Mode, Profile, Registry, YamlError,
};

fn movie() -> Node {
    Node::new(["movie"], properties([("title", "The Matrix")]))
}

fn bound_factory() -> (EntityFactory, Rc<RefCell<MemoryGraph>>) {
    let graph = Rc::new(RefCell::new(MemoryGraph::new()));
    (EntityFactory::connected(Rc::clone(&graph)), graph)
}

// =============================================================================
// Rich mode
// =============================================================================

#[test]
fn rich_node_document() {
    let yaml = dump(&Value::from(bob()), &Registry::rich()).unwrap();
    assert_eq!(
        yaml,
        "--- !gryaml.node\n\
         - labels:\n    - person\n\
         - properties:\n    name: Bob\n    occupation: Comedian\n"
    );
}

#[test]
fn rich_relationship_document() {
    let likes = Relationship::new(&bob(), "LIKES", &movie(), properties([("stars", 5i64)]));
    let yaml = dump(&Value::from(likes), &Registry::rich()).unwrap();
    let expected = "\
--- !gryaml.rel
- !gryaml.node
  - labels:
      - person
  - properties:
      name: Bob
      occupation: Comedian
- LIKES
- !gryaml.node
  - labels:
      - movie
  - properties:
      title: The Matrix
- properties:
    stars: 5
";
    assert_eq!(yaml, expected);
}

#[test]
fn rich_round_trip_preserves_entities() {
    let registry = Registry::rich();
    let likes = Relationship::new(&bob(), "LIKES", &movie(), properties([("stars", 5i64)]));
    let value = Value::Sequence(vec![
        Value::from(likes.start().clone()),
        Value::from(likes.clone()),
    ]);

    let yaml = dump(&value, &registry).unwrap();
    let back = load(&yaml, &registry, &mut EntityFactory::offline()).unwrap();
    let items = back.as_sequence().unwrap();

    assert_eq!(items[0].as_node().unwrap(), &bob());
    let rel = items[1].as_relationship().unwrap();
    assert_eq!(rel, &likes);
    assert!(rel.start().same_entity(items[0].as_node().unwrap()));
}

#[test]
fn relationship_without_properties_has_three_elements() {
    let a = Node::new(["person"], properties([("name", "A")]));
    let b = Node::new(["person"], properties([("name", "B")]));
    let knows = Relationship::new(&a, "KNOWS", &b, Properties::new());

    let yaml = dump(&Value::from(knows), &Registry::simple()).unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let items = parsed.as_sequence().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1], serde_yaml::Value::String("KNOWS".to_string()));
}

#[test]
fn empty_node_parts_are_omitted() {
    let registry = Registry::rich();
    let unlabeled = Node::new(Vec::<String>::new(), properties([("k", "v")]));
    assert_eq!(
        dump(&Value::from(unlabeled), &registry).unwrap(),
        "--- !gryaml.node\n- properties:\n    k: v\n"
    );
    assert_eq!(
        dump(&Value::from(Node::empty()), &registry).unwrap(),
        "!gryaml.node []\n"
    );

    let back = load("!gryaml.node []\n", &registry, &mut EntityFactory::offline()).unwrap();
    let node = back.as_node().unwrap();
    assert!(node.labels().is_empty());
    assert!(node.properties().is_empty());
}

#[test]
fn argument_order_does_not_matter() {
    let registry = Registry::rich();
    let forward = "!gryaml.node [{labels: [person]}, {properties: {name: Bob}}]\n";
    let reverse = "!gryaml.node [{properties: {name: Bob}}, {labels: [person]}]\n";
    let a = load(forward, &registry, &mut EntityFactory::offline()).unwrap();
    let b = load(reverse, &registry, &mut EntityFactory::offline()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn relationship_properties_accept_both_forms() {
    let registry = Registry::rich();
    let bare = "!gryaml.rel [!gryaml.node [], R, !gryaml.node [], {since: 2001}]\n";
    let wrapped = "!gryaml.rel [!gryaml.node [], R, !gryaml.node [], {properties: {since: 2001}}]\n";
    for text in [bare, wrapped] {
        let value = load(text, &registry, &mut EntityFactory::offline()).unwrap();
        let rel = value.as_relationship().unwrap();
        assert_eq!(rel.property("since"), Some(PropertyValue::Int(2001)));
        assert_eq!(rel.properties().len(), 1);
    }
}

#[test]
fn null_relationship_properties_mean_none() {
    let text = "!gryaml.rel [!gryaml.node [], R, !gryaml.node [], null]\n";
    let value = load(text, &Registry::rich(), &mut EntityFactory::offline()).unwrap();
    assert!(value.as_relationship().unwrap().properties().is_empty());
}

// =============================================================================
// Identity sharing
// =============================================================================

#[test]
fn shared_node_is_anchored_once() {
    let graph = GraphBuilder::new()
        .node("hub", ["person"], [("name", "Hub")])
        .bare_node("a", ["thing"])
        .bare_node("b", ["thing"])
        .link("hub", "OWNS", "a")
        .link("hub", "OWNS", "b")
        .build();
    let rels: Vec<Value> = graph
        .relationships()
        .iter()
        .cloned()
        .map(Value::Relationship)
        .collect();

    let yaml = dump(&Value::Sequence(rels), &Registry::rich()).unwrap();
    assert_eq!(yaml.matches("&id001").count(), 1);
    assert_eq!(yaml.matches("*id001").count(), 1);
    assert_eq!(yaml.matches("name: Hub").count(), 1);
}

#[test]
fn one_encoder_dumps_each_node_it_is_given() {
    let registry = Registry::rich();
    let config = DumpConfig::default();
    let mut encoder = Encoder::new(&registry);
    for i in 0..50i64 {
        let node = Node::new(["person"], properties([("i", i)]));
        let tree = encoder.encode_node(&node).unwrap();
        let yaml = emit(&tree, &config).unwrap();
        assert!(yaml.contains(&format!("i: {}\n", i)), "node {}: {}", i, yaml);
    }
}

#[test]
fn one_encoder_sees_changed_properties_and_labels() {
    let registry = Registry::rich();
    let config = DumpConfig::default();
    let mut encoder = Encoder::new(&registry);
    let node = Node::new(["person"], Properties::new());
    let first = emit(&encoder.encode_node(&node).unwrap(), &config).unwrap();
    assert!(!first.contains("Bob"));

    node.set_property("name", "Bob");
    node.add_label("actor");
    let second = emit(&encoder.encode_node(&node).unwrap(), &config).unwrap();
    assert!(second.contains("name: Bob"));
    assert!(second.contains("- actor"));
}

#[test]
fn one_decoder_keeps_documents_apart() {
    let registry = Registry::rich();
    let config = LoadConfig::default();
    let mut factory = EntityFactory::offline();
    let mut decoder = Decoder::new(&registry, &mut factory);
    for i in 0..50i64 {
        let text = format!("- &a !gryaml.node\n  - properties:\n      i: {}\n- *a\n", i);
        let value = decoder.decode(&parse(&text, &config).unwrap()).unwrap();
        let items = value.as_sequence().unwrap();
        let first = items[0].as_node().unwrap();
        assert_eq!(first.property("i"), Some(PropertyValue::Int(i)), "document {}", i);
        assert!(first.same_entity(items[1].as_node().unwrap()));
    }
}

#[test]
fn shared_node_is_created_once_when_bound() {
    let text = "\
- &hub !gryaml.node
  - labels: [person]
  - properties: {name: Hub}
- !gryaml.rel [*hub, OWNS, !gryaml.node [{labels: [thing]}]]
- !gryaml.rel [*hub, OWNS, !gryaml.node [{labels: [thing]}]]
";
    let (mut factory, graph) = bound_factory();
    let value = load(text, &Registry::rich(), &mut factory).unwrap();

    let graph = graph.borrow();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.relationship_count(), 2);

    let items = value.as_sequence().unwrap();
    let hub = items[0].as_node().unwrap();
    let hub_id = hub.id().unwrap();
    for item in &items[1..] {
        let rel = item.as_relationship().unwrap();
        assert!(rel.start().same_entity(hub));
        assert_eq!(rel.start().id(), Some(hub_id));
    }
}

#[test]
fn query_records_encode_like_live_entities() {
    let (mut factory, graph) = bound_factory();
    let a = factory.create_node(["person"], properties([("name", "A")])).unwrap();
    let b = factory.create_node(["person"], properties([("name", "B")])).unwrap();
    let live = factory
        .create_relationship(&a, "KNOWS", &b, Properties::new())
        .unwrap();

    let registry = Registry::rich();
    let records = graph.borrow().records();
    let stored = records
        .iter()
        .find_map(|record| match record.get("r") {
            Some(RecordValue::Relationship(rel)) => Some(rel.clone()),
            _ => None,
        })
        .unwrap();

    let from_record = Encoder::new(&registry).encode_relationship(&stored).unwrap();
    let from_live = Encoder::new(&registry).encode_relationship(&live).unwrap();
    assert_eq!(from_record, from_live);
}

// =============================================================================
// Simple mode
// =============================================================================

#[test]
fn simple_mode_is_plain_yaml() {
    let likes = Relationship::new(&bob(), "LIKES", &movie(), properties([("stars", 5i64)]));
    let yaml = dump(&Value::from(likes), &Registry::simple()).unwrap();
    assert!(!yaml.contains('!'));

    let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let expected: serde_yaml::Value = serde_yaml::from_str(
        "
- - labels: [person]
  - properties: {name: Bob, occupation: Comedian}
- LIKES
- - labels: [movie]
  - properties: {title: The Matrix}
- properties: {stars: 5}
",
    )
    .unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn simple_mode_reads_tags_as_plain_sequences() {
    let text = "!gryaml.node [{labels: [person]}]\n";
    let value = load(text, &Registry::simple(), &mut EntityFactory::offline()).unwrap();
    assert!(value.as_node().is_none());
    assert_eq!(value.as_sequence().unwrap().len(), 1);
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn unregistered_registry_rejects_entities() {
    let mut registry = Registry::rich();
    assert!(registry.unregister());

    assert_eq!(
        dump(&Value::from(bob()), &registry).unwrap_err(),
        YamlError::NoRepresenter("node".to_string())
    );
    assert_eq!(
        load("!gryaml.node []\n", &registry, &mut EntityFactory::offline()).unwrap_err(),
        YamlError::UnknownTag("!gryaml.node".to_string())
    );

    registry.register(Mode::Rich);
    assert!(load("!gryaml.node []\n", &registry, &mut EntityFactory::offline()).is_ok());
}

#[test]
fn full_profile_keeps_unknown_tags() {
    let registry = Registry::builder()
        .mode(Mode::Rich)
        .profile(Profile::Full)
        .build();
    let text = "!point [1, 2]\n";
    let value = load(text, &registry, &mut EntityFactory::offline()).unwrap();
    assert!(matches!(&value, Value::Tagged(tag, _) if tag == "!point"));
    assert_eq!(dump(&value, &registry).unwrap(), "--- !point\n- 1\n- 2\n");
}

// =============================================================================
// Factory modes
// =============================================================================

#[test]
fn bound_factory_without_store_fails() {
    let mut factory = EntityFactory::with_config(FactoryConfig::new().bound(), None);
    let err = load("!gryaml.node []\n", &Registry::rich(), &mut factory).unwrap_err();
    assert!(matches!(err, YamlError::Graph(e) if e.is_connection_error()));
}

#[test]
fn strict_factory_rejects_unknown_arguments() {
    let mut factory = EntityFactory::with_config(FactoryConfig::new().strict(), None);
    let err = load(
        "!gryaml.node [{label: [person]}]\n",
        &Registry::rich(),
        &mut factory,
    )
    .unwrap_err();
    assert_eq!(
        err,
        YamlError::Graph(GraphError::UnknownArgument("label".to_string()))
    );

    let mut lenient = EntityFactory::offline();
    let value = load("!gryaml.node [{label: [person]}]\n", &Registry::rich(), &mut lenient).unwrap();
    assert!(value.as_node().unwrap().labels().is_empty());
}

// =============================================================================
// Streams and configuration
// =============================================================================

#[test]
fn multi_document_streams() {
    let registry = Registry::rich();
    let values = vec![Value::from(bob()), Value::from(movie())];
    let yaml = dump_all(&values, &registry).unwrap();
    assert_eq!(yaml.matches("--- !gryaml.node").count(), 2);

    let back = load_all(&yaml, &registry, &mut EntityFactory::offline()).unwrap();
    assert_eq!(back, values);

    let err = load(&yaml, &registry, &mut EntityFactory::offline()).unwrap_err();
    assert!(matches!(err, YamlError::Parse(_)));
}

#[test]
fn dumper_honours_config() {
    let registry = Registry::simple();
    let config = DumpConfig::builder().indent(4).explicit_start(true).build();
    let yaml = Dumper::with_config(&registry, config)
        .dump(&Value::from(bob()))
        .unwrap();
    assert!(yaml.starts_with("---\n- labels:\n"));
    assert!(yaml.contains("\n      name: Bob\n"));
}

#[test]
fn loader_enforces_limits() {
    let registry = Registry::rich();
    let mut factory = EntityFactory::offline();

    let shallow = LoadConfig::builder().max_nesting_depth(3).build();
    let err = Loader::with_config(&registry, shallow)
        .load("[[[[[1]]]]]\n", &mut factory)
        .unwrap_err();
    assert!(matches!(err, YamlError::MaxDepthExceeded { max_depth: 3 }));

    let few_aliases = LoadConfig::builder().max_aliases(2).build();
    let err = Loader::with_config(&registry, few_aliases)
        .load("- &a x\n- *a\n- *a\n- *a\n", &mut factory)
        .unwrap_err();
    assert!(matches!(err, YamlError::TooManyAliases { max_aliases: 2 }));
}
