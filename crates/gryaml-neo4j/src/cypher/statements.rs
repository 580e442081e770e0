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

//! Statements sent to a Cypher server and the values they carry.

use std::collections::BTreeMap;

use gryaml_core::{Properties, PropertyValue};
use serde::{Deserialize, Serialize};

use super::escape::{escape_identifier, quote_string};
use crate::error::Result;

/// A statement parameter, serialized as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// List value.
    List(Vec<CypherValue>),
    /// Map value, such as a property map.
    Map(BTreeMap<String, CypherValue>),
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(v: Vec<T>) -> Self {
        CypherValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<&PropertyValue> for CypherValue {
    fn from(v: &PropertyValue) -> Self {
        match v {
            PropertyValue::Bool(b) => CypherValue::Bool(*b),
            PropertyValue::Int(i) => CypherValue::Int(*i),
            PropertyValue::Float(f) => CypherValue::Float(*f),
            PropertyValue::String(s) => CypherValue::String(s.clone()),
            PropertyValue::List(items) => {
                CypherValue::List(items.iter().map(CypherValue::from).collect())
            }
        }
    }
}

impl From<&Properties> for CypherValue {
    fn from(properties: &Properties) -> Self {
        CypherValue::Map(
            properties
                .iter()
                .map(|(k, v)| (k.clone(), CypherValue::from(v)))
                .collect(),
        )
    }
}

impl CypherValue {
    /// The value written as a Cypher literal.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Null => "null".to_string(),
            CypherValue::Bool(b) => b.to_string(),
            CypherValue::Int(i) => i.to_string(),
            CypherValue::Float(f) => float_literal(*f),
            CypherValue::String(s) => quote_string(s),
            CypherValue::List(items) => {
                let inner: Vec<String> = items.iter().map(CypherValue::to_cypher_literal).collect();
                format!("[{}]", inner.join(", "))
            }
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", escape_identifier(k), v.to_cypher_literal()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }
}

// Cypher has no NaN or infinity literals, so those are spelled as divisions.
fn float_literal(f: f64) -> String {
    if f.is_nan() {
        return "0.0/0.0".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "1.0/0.0" } else { "-1.0/0.0" }.to_string();
    }
    let s = f.to_string();
    if s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{}.0", s)
    }
}

/// What a statement does, and so what records it answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementType {
    /// Node creation. Returns an `id` column.
    CreateNode,
    /// Relationship creation. Returns `id`, `start` and `end` columns.
    CreateRelationship,
    /// Labels added to an existing node.
    SetLabels,
    /// Connectivity check.
    Probe,
    /// General query.
    Query,
}

/// One Cypher query with its parameters.
///
/// Parameters are referred to in the query text as `{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The Cypher query text.
    pub query: String,
    /// Parameter values by name.
    pub parameters: BTreeMap<String, CypherValue>,
    /// What the statement does.
    pub statement_type: StatementType,
}

impl CypherStatement {
    /// A statement of `statement_type` with no parameters.
    pub fn new(query: impl Into<String>, statement_type: StatementType) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
            statement_type,
        }
    }

    /// A node creation.
    pub fn create_node(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::CreateNode)
    }

    /// A relationship creation.
    pub fn create_relationship(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::CreateRelationship)
    }

    /// A label update.
    pub fn set_labels(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::SetLabels)
    }

    /// A connectivity check.
    pub fn probe(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::Probe)
    }

    /// A general query.
    pub fn query(query: impl Into<String>) -> Self {
        Self::new(query, StatementType::Query)
    }

    /// Bind one parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<CypherValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Bind several parameters.
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, CypherValue)>) -> Self {
        self.parameters.extend(params);
        self
    }

    /// Look up a parameter.
    pub fn param(&self, name: &str) -> Option<&CypherValue> {
        self.parameters.get(name)
    }

    /// The query with every bound `{name}` replaced by its literal.
    ///
    /// Braces that do not name a bound parameter are copied unchanged, and
    /// substituted literals are never scanned again.
    pub fn render_inline(&self) -> String {
        let mut out = String::with_capacity(self.query.len());
        let mut rest = self.query.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let bound = tail
                .find('}')
                .and_then(|close| self.parameters.get(&tail[1..close]).map(|v| (close, v)));
            match bound {
                Some((close, value)) => {
                    out.push_str(&value.to_cypher_literal());
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// The statement as a transactional HTTP request entry:
    /// `{"statement": ..., "parameters": {...}}`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "statement": self.query,
            "parameters": serde_json::to_value(&self.parameters)?,
        }))
    }
}

/// Statements in the order they were run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CypherScript {
    /// The statements.
    pub statements: Vec<CypherStatement>,
}

impl CypherScript {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement.
    pub fn add(&mut self, statement: CypherStatement) {
        self.statements.push(statement);
    }

    /// Statements of one type, in order.
    pub fn statements_of_type(&self, statement_type: StatementType) -> Vec<&CypherStatement> {
        self.statements
            .iter()
            .filter(|s| s.statement_type == statement_type)
            .collect()
    }

    /// The script as runnable text, parameters inlined, one statement per
    /// paragraph.
    pub fn render(&self) -> String {
        self.statements
            .iter()
            .map(|s| format!("{};", s.render_inline()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// The script as one transactional HTTP request body:
    /// `{"statements": [...]}`.
    pub fn to_request_body(&self) -> Result<serde_json::Value> {
        let statements = self
            .statements
            .iter()
            .map(CypherStatement::to_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(serde_json::json!({ "statements": statements }))
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether no statement has run.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
