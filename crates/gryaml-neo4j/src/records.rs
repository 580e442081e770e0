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

//! Convert query records into loaded values.
//!
//! Every record node and relationship becomes a bound entity. Entities are
//! cached by store id, so a node that appears in several records (as a
//! column of its own or as a relationship endpoint) is one shared [`Node`]
//! and dumps as one anchored document node.

use std::collections::HashMap;

use gryaml_core::{
    EntityId, Map, Node, Record, RecordNode, RecordRelationship, RecordValue, Relationship, Value,
};

/// Builds values from records, sharing entities by id across calls.
#[derive(Debug, Default)]
pub struct RecordConverter {
    nodes: HashMap<EntityId, Node>,
    relationships: HashMap<EntityId, Relationship>,
}

impl RecordConverter {
    /// Create a converter with an empty entity cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bound node for `record`. The first occurrence of an id decides
    /// its labels and properties.
    pub fn node(&mut self, record: &RecordNode) -> Node {
        self.nodes
            .entry(record.id)
            .or_insert_with(|| {
                Node::with_id(record.id, record.labels.iter().cloned(), record.properties.clone())
            })
            .clone()
    }

    /// The bound relationship for `record`, endpoints included.
    pub fn relationship(&mut self, record: &RecordRelationship) -> Relationship {
        if let Some(existing) = self.relationships.get(&record.id) {
            return existing.clone();
        }
        let start = self.node(&record.start);
        let end = self.node(&record.end);
        let rel = Relationship::with_id(
            record.id,
            &start,
            record.rel_type.clone(),
            &end,
            record.properties.clone(),
        );
        self.relationships.insert(record.id, rel.clone());
        rel
    }

    /// Convert one column value.
    pub fn value(&mut self, value: &RecordValue) -> Value {
        match value {
            RecordValue::Node(node) => Value::Node(self.node(node)),
            RecordValue::Relationship(rel) => Value::Relationship(self.relationship(rel)),
            RecordValue::Property(p) => Value::from(p.clone()),
            RecordValue::Null => Value::Null,
        }
    }

    /// Convert a record into a mapping of its columns, in return order.
    pub fn record(&mut self, record: &Record) -> Value {
        let mut map = Map::with_capacity(record.len());
        for (column, value) in record.iter() {
            map.insert(column, self.value(value));
        }
        Value::Mapping(map)
    }
}

/// Convert records into one mapping per record.
pub fn records_to_values(records: &[Record]) -> Vec<Value> {
    let mut converter = RecordConverter::new();
    records.iter().map(|r| converter.record(r)).collect()
}

/// Convert a single column of every record. Records without the column are
/// skipped.
pub fn column_values(records: &[Record], column: &str) -> Vec<Value> {
    let mut converter = RecordConverter::new();
    records
        .iter()
        .filter_map(|r| r.get(column))
        .map(|v| converter.value(v))
        .collect()
}
