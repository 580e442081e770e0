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

//! Property-based tests for the arg-map convention and the entity factory.

use std::cell::RefCell;
use std::rc::Rc;

use gryaml_core::{
    extract_properties, is_arg_map, ArgName, EntityFactory, Map, MemoryGraph, Node, Value,
};
use proptest::prelude::*;

fn labels_arg(labels: &[String]) -> Value {
    Value::Mapping(Map::singleton(
        "labels",
        Value::Sequence(labels.iter().map(|l| Value::from(l.as_str())).collect()),
    ))
}

fn properties_payload(props: &[(String, i64)]) -> Value {
    Value::Mapping(
        props
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(*v)))
            .collect(),
    )
}

fn properties_arg(props: &[(String, i64)]) -> Value {
    Value::Mapping(Map::singleton("properties", properties_payload(props)))
}

fn label_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,11}", 0..4)
}

fn property_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-z][a-z0-9_]{0,11}", any::<i64>()), 0..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: the order of the two arg-maps never changes the node.
    #[test]
    fn prop_node_argument_order_is_irrelevant(
        labels in label_strategy(),
        props in property_strategy(),
    ) {
        let mut factory = EntityFactory::offline();
        let forward = factory
            .make_node(&[labels_arg(&labels), properties_arg(&props)])
            .unwrap();
        let reverse = factory
            .make_node(&[properties_arg(&props), labels_arg(&labels)])
            .unwrap();
        prop_assert_eq!(forward, reverse);
    }

    /// Property: bare and wrapped relationship properties resolve identically.
    #[test]
    fn prop_relationship_properties_dual_form(props in property_strategy()) {
        let bare = properties_payload(&props);
        let wrapped = properties_arg(&props);
        prop_assert_eq!(
            extract_properties(Some(&bare)).unwrap(),
            extract_properties(Some(&wrapped)).unwrap()
        );
    }

    /// Property: a mapping is an arg-map only with exactly one recognized key.
    #[test]
    fn prop_arg_map_requires_single_entry(keys in prop::collection::btree_set("[a-z]{1,10}", 0..4)) {
        let map: Map<Value> = keys.iter().map(|k| (k.clone(), Value::Null)).collect();
        let value = Value::Mapping(map);
        for name in ArgName::ALL {
            let expected = keys.len() == 1 && keys.contains(name.as_str());
            prop_assert_eq!(is_arg_map(name, &value), expected);
        }
    }

    /// Property: a node shared by several relationships is persisted once.
    #[test]
    fn prop_shared_endpoint_created_once(fanout in 1usize..6) {
        let graph = Rc::new(RefCell::new(MemoryGraph::new()));
        let mut factory = EntityFactory::connected(Rc::clone(&graph));
        let hub = Node::new(["hub"], Default::default());
        for _ in 0..fanout {
            let spoke = Node::new(["spoke"], Default::default());
            factory.make_relationship(&hub, "LINKS", &spoke, None).unwrap();
        }
        prop_assert_eq!(graph.borrow().node_count(), fanout + 1);
        prop_assert_eq!(graph.borrow().relationship_count(), fanout);
    }
}
