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

//! The seam between statement generation and a live server.
//!
//! A [`CypherExecutor`] ships one statement to a server and hands back the
//! records it answered with. [`ScriptExecutor`] is the offline executor: it
//! collects statements into a [`CypherScript`] and answers with synthetic
//! ids, for dry runs and for exporting a load as a Cypher script.

use gryaml_core::{PropertyValue, Record, RecordValue};
use tracing::trace;

use crate::cypher::{CypherScript, CypherStatement, CypherValue, StatementType};
use crate::error::Result;

/// Runs Cypher statements against a server.
pub trait CypherExecutor {
    /// Run one statement and return its records in order.
    fn run(&mut self, statement: &CypherStatement) -> Result<Vec<Record>>;

    /// The version string the server or driver reports.
    fn server_version(&mut self) -> Result<String>;
}

impl<E: CypherExecutor + ?Sized> CypherExecutor for Box<E> {
    fn run(&mut self, statement: &CypherStatement) -> Result<Vec<Record>> {
        (**self).run(statement)
    }

    fn server_version(&mut self) -> Result<String> {
        (**self).server_version()
    }
}

impl<E: CypherExecutor + ?Sized> CypherExecutor for &mut E {
    fn run(&mut self, statement: &CypherStatement) -> Result<Vec<Record>> {
        (**self).run(statement)
    }

    fn server_version(&mut self) -> Result<String> {
        (**self).server_version()
    }
}

/// Records statements instead of running them.
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    version: String,
    next_id: i64,
    script: CypherScript,
}

impl ScriptExecutor {
    /// A dry-run executor reporting `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            next_id: 0,
            script: CypherScript::new(),
        }
    }

    /// Statements run so far.
    pub fn script(&self) -> &CypherScript {
        &self.script
    }

    /// Consume the executor, returning its statements.
    pub fn into_script(self) -> CypherScript {
        self.script
    }

    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn endpoint(&mut self, statement: &CypherStatement, var: &str) -> i64 {
        match statement.param(&format!("{}_id", var)) {
            Some(CypherValue::Int(id)) => *id,
            _ => self.allocate(),
        }
    }
}

fn int(value: i64) -> RecordValue {
    RecordValue::Property(PropertyValue::Int(value))
}

impl CypherExecutor for ScriptExecutor {
    fn run(&mut self, statement: &CypherStatement) -> Result<Vec<Record>> {
        trace!(kind = ?statement.statement_type, "script executor: recording statement");
        self.script.add(statement.clone());
        Ok(match statement.statement_type {
            StatementType::CreateNode => {
                vec![Record::new().with("id", int(self.allocate()))]
            }
            StatementType::CreateRelationship => {
                let start = self.endpoint(statement, "a");
                let end = self.endpoint(statement, "b");
                let id = self.allocate();
                vec![Record::new()
                    .with("id", int(id))
                    .with("start", int(start))
                    .with("end", int(end))]
            }
            StatementType::Probe => vec![Record::new().with("ok", int(1))],
            StatementType::SetLabels | StatementType::Query => Vec::new(),
        })
    }

    fn server_version(&mut self) -> Result<String> {
        Ok(self.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_executor_records_statements() {
        let mut exec = ScriptExecutor::new("2.0.0");
        exec.run(&CypherStatement::probe("RETURN 1 AS ok")).unwrap();
        let records = exec
            .run(&CypherStatement::create_node("CREATE (n {props}) RETURN id(n) AS id"))
            .unwrap();
        assert_eq!(records[0].get("id"), Some(&int(0)));
        assert_eq!(exec.script().len(), 2);
        assert_eq!(exec.server_version().unwrap(), "2.0.0");
    }

    #[test]
    fn test_relationship_reuses_matched_ids() {
        let mut exec = ScriptExecutor::new("2.0");
        let stmt = CypherStatement::create_relationship("MATCH ... CREATE ...")
            .with_param("a_id", 7i64);
        let records = exec.run(&stmt).unwrap();
        let record = &records[0];
        assert_eq!(record.get("start"), Some(&int(7)));
        assert_eq!(record.get("end"), Some(&int(0)));
        assert_eq!(record.get("id"), Some(&int(1)));
    }

    #[test]
    fn test_boxed_executor() {
        let mut exec: Box<dyn CypherExecutor> = Box::new(ScriptExecutor::new("1.6"));
        assert_eq!(exec.server_version().unwrap(), "1.6");
        assert!(exec.run(&CypherStatement::query("MATCH (n) RETURN n")).unwrap().is_empty());
    }
}
