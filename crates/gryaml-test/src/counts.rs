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

//! Counting helpers for loaded values.
//!
//! Entities are counted once however many times they are reachable, so a
//! node referenced by several relationships counts as one.

use gryaml_core::{Node, Relationship, Value};

/// Count distinct nodes, relationship endpoints included.
pub fn count_nodes(value: &Value) -> usize {
    distinct_nodes(value).len()
}

/// Count distinct relationships.
pub fn count_relationships(value: &Value) -> usize {
    let mut found: Vec<Relationship> = Vec::new();
    collect_relationships(value, &mut found);
    found.len()
}

/// Count distinct nodes carrying `label`.
pub fn count_with_label(value: &Value, label: &str) -> usize {
    distinct_nodes(value)
        .iter()
        .filter(|node| node.has_label(label))
        .count()
}

/// Count distinct nodes carrying property `key`.
pub fn count_with_property(value: &Value, key: &str) -> usize {
    distinct_nodes(value)
        .iter()
        .filter(|node| node.property(key).is_some())
        .count()
}

fn distinct_nodes(value: &Value) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::new();
    for node in value.nodes() {
        if !out.iter().any(|seen| seen.same_entity(&node)) {
            out.push(node);
        }
    }
    out
}

fn collect_relationships(value: &Value, out: &mut Vec<Relationship>) {
    match value {
        Value::Relationship(rel) => {
            if !out.iter().any(|seen| seen.same_entity(rel)) {
                out.push(rel.clone());
            }
        }
        Value::Sequence(items) => items.iter().for_each(|item| collect_relationships(item, out)),
        Value::Mapping(map) => map.iter().for_each(|(_, item)| collect_relationships(item, out)),
        Value::Tagged(_, inner) => collect_relationships(inner, out),
        _ => {}
    }
}
