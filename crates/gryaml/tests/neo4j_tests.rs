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

//! Round trips through a Cypher store bound via the root functions.

#![cfg(all(feature = "yaml", feature = "neo4j"))]

use gryaml::neo4j::{
    ConnectionConfig, CypherExecutor, CypherStatement, DriverVersion, Neo4jError, Neo4jResult,
    ScriptExecutor, StatementType, ENV_DRIVER_VERSION,
};
use gryaml::{
    connect, connect_from_env, dump, load_with, query_values, EntityId, Error, PropertyValue,
    Record, RecordNode, RecordRelationship, RecordValue,
};
use gryaml_test::fixtures;
use serial_test::serial;

#[test]
fn connect_binds_factory() {
    let mut factory = connect(ConnectionConfig::default(), ScriptExecutor::new("2.0.0")).unwrap();
    assert!(factory.is_connected());
    assert_eq!(factory.server_version().unwrap(), "2.0.0");
    let value = load_with(fixtures::relationships(), &mut factory).unwrap();
    assert!(value.nodes().iter().all(|node| node.is_bound()));
}

#[test]
fn connect_ignores_reported_server_version() {
    let mut factory = connect(ConnectionConfig::default(), ScriptExecutor::new("3.0.0")).unwrap();
    assert_eq!(factory.server_version().unwrap(), "3.0.0");
    let node = factory
        .create_node(["person"], gryaml::properties([("name", "Bob")]))
        .unwrap();
    assert!(node.is_bound());
}

struct Unreachable;

impl CypherExecutor for Unreachable {
    fn run(&mut self, _statement: &CypherStatement) -> Neo4jResult<Vec<Record>> {
        Err(Neo4jError::Executor("connection refused".to_string()))
    }

    fn server_version(&mut self) -> Neo4jResult<String> {
        Err(Neo4jError::Executor("connection refused".to_string()))
    }
}

#[test]
fn failed_probe_is_a_connection_error() {
    let err = connect(ConnectionConfig::default(), Unreachable).unwrap_err();
    assert!(err.is_connection_error());
}

#[test]
#[serial]
fn connect_from_env_pins_driver_version() {
    std::env::set_var(ENV_DRIVER_VERSION, "1.6");
    let factory = connect_from_env(ScriptExecutor::new("not a version"));
    std::env::remove_var(ENV_DRIVER_VERSION);

    let mut factory = factory.unwrap();
    let node = factory
        .create_node(["person"], gryaml::properties([("name", "Bob")]))
        .unwrap();
    assert!(node.is_bound());
}

#[test]
#[serial]
fn connect_from_env_rejects_bad_version() {
    std::env::set_var(ENV_DRIVER_VERSION, "9.9");
    let err = connect_from_env(ScriptExecutor::new("2.0")).unwrap_err();
    std::env::remove_var(ENV_DRIVER_VERSION);
    assert!(matches!(err, Error::Neo4j(Neo4jError::Config(_))));
}

struct Movies;

impl CypherExecutor for Movies {
    fn run(&mut self, statement: &CypherStatement) -> Neo4jResult<Vec<Record>> {
        if statement.statement_type != StatementType::Query {
            return Ok(vec![Record::new().with(
                "ok",
                RecordValue::Property(PropertyValue::Int(1)),
            )]);
        }
        let keanu = RecordNode::new(EntityId(1))
            .with_label("person")
            .with_property("name", "Keanu Reeves");
        let matrix = RecordNode::new(EntityId(2))
            .with_label("movie")
            .with_property("title", "The Matrix");
        let acted =
            RecordRelationship::new(EntityId(10), keanu.clone(), "ACTED_IN", matrix.clone());
        Ok(vec![Record::new()
            .with("p", RecordValue::Node(keanu))
            .with("r", RecordValue::Relationship(acted))
            .with("m", RecordValue::Node(matrix))])
    }

    fn server_version(&mut self) -> Neo4jResult<String> {
        Ok(DriverVersion::V2_0.to_string())
    }
}

#[test]
fn query_values_dump_with_shared_nodes() {
    let mut factory = connect(ConnectionConfig::default(), Movies).unwrap();
    let rows = query_values(
        &mut factory,
        "MATCH (p)-[r:ACTED_IN]->(m) RETURN p, r, m",
    )
    .unwrap();
    assert_eq!(rows.len(), 1);

    let text = dump(&gryaml::Value::Sequence(rows)).unwrap();
    assert_eq!(text.matches("name: Keanu Reeves").count(), 1);
    assert_eq!(text.matches("title: The Matrix").count(), 1);
    assert!(text.contains("!gryaml.rel"));
}
