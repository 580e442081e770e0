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

//! A [`GraphStore`] that persists entities by generating Cypher.
//!
//! The statements differ by the configured driver dialect:
//!
//! | Operation | 2.0 | 1.6 |
//! |-----------|-----|-----|
//! | labelled node | `CREATE (n:L {props})` | `CREATE (n {props})` then `SET n:L` |
//! | relationship | `MATCH` existing ends, `CREATE` new ends and the relationship | same, new ends labelled afterwards |
//!
//! Property values always travel as parameters. Labels and relationship
//! types are escaped into the query text.

use std::collections::BTreeSet;

use gryaml_core::{
    CreatedRelationship, EntityId, Endpoint, GraphStore, Properties, PropertyValue, Record,
    RecordValue,
};
use tracing::{debug, trace};

use crate::config::ConnectionConfig;
use crate::cypher::{
    checked_relationship_type, escape_labels, validate_properties, CypherStatement, CypherValue,
};
use crate::error::{Neo4jError, Result};
use crate::executor::CypherExecutor;
use crate::version::DriverVersion;

/// Statement used to check that the server answers.
pub const PROBE_QUERY: &str = "RETURN 1 AS ok";

/// Graph store backed by a [`CypherExecutor`].
#[derive(Debug)]
pub struct CypherStore<E> {
    executor: E,
    config: ConnectionConfig,
    version: DriverVersion,
    server_version: String,
}

/// Probe the server behind `executor` and wrap it in a store.
pub fn connect<E: CypherExecutor>(config: ConnectionConfig, executor: E) -> Result<CypherStore<E>> {
    CypherStore::connect(config, executor)
}

impl<E: CypherExecutor> CypherStore<E> {
    /// Probe the server behind `executor` and wrap it in a store.
    ///
    /// Fails with [`Neo4jError::ConnectionFailed`] when the probe or the
    /// version query fails. The dialect comes from
    /// [`ConnectionConfig::driver_version`]; the reported server version is
    /// kept for [`GraphStore::server_version`] only.
    pub fn connect(config: ConnectionConfig, mut executor: E) -> Result<Self> {
        executor
            .run(&CypherStatement::probe(PROBE_QUERY))
            .map_err(|e| Neo4jError::ConnectionFailed(format!("{}: {}", config.uri, e)))?;
        let server_version = executor
            .server_version()
            .map_err(|e| Neo4jError::ConnectionFailed(format!("{}: {}", config.uri, e)))?;

        let version = config.driver_version;
        debug!(uri = %config.uri, %version, server_version = %server_version, "connected cypher store");

        Ok(Self {
            executor,
            config,
            version,
            server_version,
        })
    }

    /// The dialect in use.
    pub fn version(&self) -> DriverVersion {
        self.version
    }

    /// The configuration the store was connected with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// The underlying executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The underlying executor, mutably.
    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// Consume the store, returning the executor.
    pub fn into_executor(self) -> E {
        self.executor
    }

    fn run(&mut self, statement: CypherStatement) -> Result<Vec<Record>> {
        trace!(query = %statement.query, "running cypher");
        self.executor.run(&statement)
    }

    fn insert_node(&mut self, labels: &BTreeSet<String>, properties: &Properties) -> Result<EntityId> {
        validate_properties(properties, &self.config)?;
        let escaped = escape_labels(labels)?;

        let labels = if self.version.creates_labelled_nodes() {
            escaped.as_str()
        } else {
            ""
        };
        let query = format!(
            "CREATE (n{} {}) RETURN id(n) AS id",
            labels,
            self.version.placeholder("props")
        );
        let records = self.run(
            CypherStatement::create_node(query).with_param("props", CypherValue::from(properties)),
        )?;
        let id = column_id(&records, "id")?;

        if !self.version.creates_labelled_nodes() {
            self.add_labels(id, &escaped)?;
        }
        Ok(id)
    }

    fn insert_relationship(
        &mut self,
        start: &Endpoint,
        rel_type: &str,
        end: &Endpoint,
        properties: &Properties,
    ) -> Result<CreatedRelationship> {
        validate_properties(properties, &self.config)?;
        let rel = checked_relationship_type(rel_type)?;

        let mut matches = Vec::new();
        let mut creates = Vec::new();
        let mut params = Vec::new();
        let mut pending_labels = Vec::new();

        for (var, endpoint) in [("a", start), ("b", end)] {
            match endpoint {
                Endpoint::Existing(id) => {
                    let param = format!("{}_id", var);
                    matches.push(format!(
                        "MATCH ({v}) WHERE id({v}) = {p}",
                        v = var,
                        p = self.version.placeholder(&param)
                    ));
                    params.push((param, CypherValue::Int(id.0)));
                }
                Endpoint::New { labels, properties } => {
                    validate_properties(properties, &self.config)?;
                    let escaped = escape_labels(labels)?;
                    let param = format!("{}_props", var);
                    let placeholder = self.version.placeholder(&param);
                    if self.version.creates_labelled_nodes() {
                        creates.push(format!("({}{} {})", var, escaped, placeholder));
                    } else {
                        creates.push(format!("({} {})", var, placeholder));
                        pending_labels.push((var, escaped));
                    }
                    params.push((param, CypherValue::from(properties)));
                }
            }
        }
        creates.push(format!(
            "(a)-[r{} {}]->(b)",
            rel,
            self.version.placeholder("props")
        ));
        params.push(("props".to_string(), CypherValue::from(properties)));

        let mut query = String::new();
        for clause in &matches {
            query.push_str(clause);
            query.push('\n');
        }
        query.push_str("CREATE ");
        query.push_str(&creates.join(", "));
        query.push_str("\nRETURN id(r) AS id, id(a) AS start, id(b) AS end");

        let records = self.run(CypherStatement::create_relationship(query).with_params(params))?;
        let created = CreatedRelationship {
            id: column_id(&records, "id")?,
            start: column_id(&records, "start")?,
            end: column_id(&records, "end")?,
        };

        for (var, escaped) in pending_labels {
            let id = if var == "a" { created.start } else { created.end };
            self.add_labels(id, &escaped)?;
        }
        trace!(id = created.id.0, rel_type, "created relationship");
        Ok(created)
    }

    fn add_labels(&mut self, id: EntityId, escaped: &str) -> Result<()> {
        if escaped.is_empty() {
            return Ok(());
        }
        let query = format!(
            "MATCH (n) WHERE id(n) = {} SET n{}",
            self.version.placeholder("id"),
            escaped
        );
        self.run(CypherStatement::set_labels(query).with_param("id", id.0))?;
        Ok(())
    }
}

/// Read an integer id from the first record.
fn column_id(records: &[Record], column: &str) -> Result<EntityId> {
    let record = records
        .first()
        .ok_or_else(|| Neo4jError::RecordParseError("statement returned no records".to_string()))?;
    match record.get(column) {
        Some(RecordValue::Property(PropertyValue::Int(id))) => Ok(EntityId(*id)),
        Some(other) => Err(Neo4jError::RecordParseError(format!(
            "column '{}' is not an integer id: {:?}",
            column, other
        ))),
        None => Err(Neo4jError::RecordParseError(format!(
            "missing column '{}'",
            column
        ))),
    }
}

impl<E: CypherExecutor> GraphStore for CypherStore<E> {
    fn server_version(&self) -> gryaml_core::Result<String> {
        Ok(self.server_version.clone())
    }

    fn create_node(
        &mut self,
        labels: &BTreeSet<String>,
        properties: &Properties,
    ) -> gryaml_core::Result<EntityId> {
        Ok(self.insert_node(labels, properties)?)
    }

    fn create_relationship(
        &mut self,
        start: &Endpoint,
        rel_type: &str,
        end: &Endpoint,
        properties: &Properties,
    ) -> gryaml_core::Result<CreatedRelationship> {
        Ok(self.insert_relationship(start, rel_type, end, properties)?)
    }

    fn query(&mut self, statement: &str) -> gryaml_core::Result<Vec<Record>> {
        Ok(self.run(CypherStatement::query(statement))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::StatementType;
    use crate::executor::ScriptExecutor;
    use gryaml_core::{properties, GraphError};

    fn labels(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn store(version: DriverVersion) -> CypherStore<ScriptExecutor> {
        let config = ConnectionConfig::default().with_driver_version(version);
        CypherStore::connect(config, ScriptExecutor::new("2.0.0")).unwrap()
    }

    #[derive(Debug)]
    struct Down;

    impl CypherExecutor for Down {
        fn run(&mut self, _: &CypherStatement) -> Result<Vec<Record>> {
            Err(Neo4jError::Executor("connection refused".to_string()))
        }

        fn server_version(&mut self) -> Result<String> {
            Err(Neo4jError::Executor("connection refused".to_string()))
        }
    }

    #[test]
    fn test_connect_uses_configured_version() {
        assert_eq!(store(DriverVersion::V2_0).version(), DriverVersion::V2_0);
        assert_eq!(store(DriverVersion::V1_6).version(), DriverVersion::V1_6);
        assert_eq!(store(DriverVersion::V1_6).server_version().unwrap(), "2.0.0");
    }

    #[test]
    fn test_connect_probes_first() {
        let s = store(DriverVersion::V2_0);
        let first = &s.executor().script().statements[0];
        assert_eq!(first.statement_type, StatementType::Probe);
        assert_eq!(first.query, PROBE_QUERY);
    }

    #[test]
    fn test_server_version_does_not_pick_dialect() {
        for reported in ["1.6.2", "3.0.0", "not a version"] {
            let s = connect(ConnectionConfig::default(), ScriptExecutor::new(reported)).unwrap();
            assert_eq!(s.version(), DriverVersion::V2_0);
            assert_eq!(s.server_version().unwrap(), reported);
        }
    }

    #[test]
    fn test_connect_failure_is_connection_error() {
        let err = connect(ConnectionConfig::default(), Down).unwrap_err();
        assert!(matches!(err, Neo4jError::ConnectionFailed(_)));
        assert!(GraphError::from(err).is_connection_error());
    }

    #[test]
    fn test_v2_node_single_statement() {
        let mut s = store(DriverVersion::V2_0);
        let id = s
            .create_node(&labels(&["person"]), &properties([("name", "Bob")]))
            .unwrap();
        assert_eq!(id, EntityId(0));
        let script = s.into_executor().into_script();
        assert_eq!(script.len(), 2);
        let stmt = &script.statements[1];
        assert_eq!(stmt.query, "CREATE (n:person {props}) RETURN id(n) AS id");
        assert_eq!(
            stmt.param("props"),
            Some(&CypherValue::from(&properties([("name", "Bob")])))
        );
    }

    #[test]
    fn test_v16_node_then_labels() {
        let mut s = store(DriverVersion::V1_6);
        let id = s
            .create_node(&labels(&["person", "actor"]), &Properties::new())
            .unwrap();
        let script = s.into_executor().into_script();
        let kinds: Vec<_> = script.statements.iter().map(|s| s.statement_type).collect();
        assert_eq!(
            kinds,
            vec![StatementType::Probe, StatementType::CreateNode, StatementType::SetLabels]
        );
        assert_eq!(script.statements[1].query, "CREATE (n {props}) RETURN id(n) AS id");
        let set = &script.statements[2];
        assert_eq!(set.query, "MATCH (n) WHERE id(n) = {id} SET n:actor:person");
        assert_eq!(set.param("id"), Some(&CypherValue::Int(id.0)));
    }

    #[test]
    fn test_v16_unlabelled_node_has_no_label_statement() {
        let mut s = store(DriverVersion::V1_6);
        s.create_node(&BTreeSet::new(), &Properties::new()).unwrap();
        assert_eq!(s.executor().script().len(), 2);
    }

    #[test]
    fn test_relationship_matches_existing_and_creates_new() {
        let mut s = store(DriverVersion::V2_0);
        let created = s
            .create_relationship(
                &Endpoint::Existing(EntityId(5)),
                "LIKES",
                &Endpoint::New {
                    labels: labels(&["movie"]),
                    properties: properties([("title", "The Matrix")]),
                },
                &properties([("stars", 5i64)]),
            )
            .unwrap();
        assert_eq!(created.start, EntityId(5));

        let script = s.into_executor().into_script();
        let stmt = &script.statements[1];
        assert_eq!(
            stmt.query,
            "MATCH (a) WHERE id(a) = {a_id}\n\
             CREATE (b:movie {b_props}), (a)-[r:LIKES {props}]->(b)\n\
             RETURN id(r) AS id, id(a) AS start, id(b) AS end"
        );
        assert_eq!(stmt.param("a_id"), Some(&CypherValue::Int(5)));
        assert_eq!(stmt.param("props"), Some(&CypherValue::from(&properties([("stars", 5i64)]))));
    }

    #[test]
    fn test_v16_relationship_labels_new_ends_afterwards() {
        let mut s = store(DriverVersion::V1_6);
        let created = s
            .create_relationship(
                &Endpoint::New {
                    labels: labels(&["person"]),
                    properties: Properties::new(),
                },
                "KNOWS",
                &Endpoint::New {
                    labels: BTreeSet::new(),
                    properties: Properties::new(),
                },
                &Properties::new(),
            )
            .unwrap();
        let script = s.into_executor().into_script();
        assert_eq!(
            script.statements[1].query,
            "CREATE (a {a_props}), (b {b_props}), (a)-[r:KNOWS {props}]->(b)\n\
             RETURN id(r) AS id, id(a) AS start, id(b) AS end"
        );
        assert_eq!(script.len(), 3);
        assert_eq!(
            script.statements[2].param("id"),
            Some(&CypherValue::Int(created.start.0))
        );
    }

    #[test]
    fn test_statements_use_brace_parameters() {
        for version in [DriverVersion::V1_6, DriverVersion::V2_0] {
            let mut s = store(version);
            s.create_node(&labels(&["person"]), &properties([("name", "Bob")]))
                .unwrap();
            s.create_relationship(
                &Endpoint::Existing(EntityId(1)),
                "KNOWS",
                &Endpoint::New {
                    labels: labels(&["person"]),
                    properties: Properties::new(),
                },
                &Properties::new(),
            )
            .unwrap();
            for stmt in &s.executor().script().statements[1..] {
                assert!(!stmt.query.contains('$'), "{}: {}", version, stmt.query);
                for name in stmt.parameters.keys() {
                    assert!(
                        stmt.query.contains(&format!("{{{}}}", name)),
                        "{}: {} lacks {{{}}}",
                        version,
                        stmt.query,
                        name
                    );
                }
            }
        }
    }

    #[test]
    fn test_hostile_names_are_quoted() {
        let mut s = store(DriverVersion::V2_0);
        s.create_relationship(
            &Endpoint::Existing(EntityId(1)),
            "X]->() DETACH DELETE a //",
            &Endpoint::Existing(EntityId(2)),
            &Properties::new(),
        )
        .unwrap();
        let query = &s.executor().script().statements[1].query;
        assert!(query.contains("[r:`X]->() DETACH DELETE a //` {props}]"));
    }

    #[test]
    fn test_empty_relationship_type_rejected() {
        let mut s = store(DriverVersion::V2_0);
        let err = s
            .create_relationship(
                &Endpoint::Existing(EntityId(1)),
                "",
                &Endpoint::Existing(EntityId(2)),
                &Properties::new(),
            )
            .unwrap_err();
        assert!(matches!(err, GraphError::Store(_)));
    }

    #[test]
    fn test_string_limit_enforced() {
        let config = ConnectionConfig::default().with_max_string_length(3);
        let mut s = connect(config, ScriptExecutor::new("2.0.0")).unwrap();
        let err = s
            .create_node(&labels(&["person"]), &properties([("name", "Robert")]))
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidProperty { ref key, .. } if key == "name"));
        assert_eq!(s.executor().script().len(), 1);
    }

    #[test]
    fn test_query_passthrough() {
        let mut s = store(DriverVersion::V2_0);
        assert!(s.query("MATCH (n) RETURN n").unwrap().is_empty());
        let last = s.executor().script().statements.last().unwrap();
        assert_eq!(last.statement_type, StatementType::Query);
    }

    #[test]
    fn test_missing_id_column() {
        assert!(matches!(
            column_id(&[], "id"),
            Err(Neo4jError::RecordParseError(_))
        ));
        let record = Record::new().with("id", RecordValue::Null);
        assert!(column_id(&[record], "id").is_err());
    }
}
