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

//! Cypher-backed graph store for gryaml.
//!
//! [`CypherStore`] implements [`gryaml_core::GraphStore`] by generating
//! parameterized Cypher and handing it to a [`CypherExecutor`], so a bound
//! [`EntityFactory`](gryaml_core::EntityFactory) can persist every node and
//! relationship it loads. The executor is the only part that talks to a
//! server; [`ScriptExecutor`] stands in for one and records a script.
//!
//! # Driver versions
//!
//! The dialect is set by [`ConnectionConfig::driver_version`] (2.0 unless
//! configured). The version the server reports is not consulted.
//!
//! | Version | Labelled node creation |
//! |---------|------------------------|
//! | 1.6 | create, then `SET n:Label` |
//! | 2.0 | single `CREATE (n:Label {props})` |
//!
//! Any other value of `GRYAML_DRIVER_VERSION` is rejected when the
//! configuration is read.
//!
//! # Example
//!
//! ```rust
//! use gryaml_core::{properties, EntityFactory};
//! use gryaml_neo4j::{connect, ConnectionConfig, ScriptExecutor};
//!
//! let store = connect(ConnectionConfig::default(), ScriptExecutor::new("2.0.0")).unwrap();
//! let mut factory = EntityFactory::connected(store);
//! let bob = factory
//!     .create_node(["person"], properties([("name", "Bob")]))
//!     .unwrap();
//! assert!(bob.is_bound());
//! ```
//!
//! # Reading query results
//!
//! ```rust
//! use gryaml_core::{EntityId, Record, RecordNode, RecordValue};
//! use gryaml_neo4j::column_values;
//!
//! let records = vec![Record::new().with(
//!     "n",
//!     RecordValue::Node(RecordNode::new(EntityId(0)).with_label("person")),
//! )];
//! let nodes = column_values(&records, "n");
//! assert!(nodes[0].as_node().unwrap().is_bound());
//! ```

#![deny(missing_docs)]

mod config;
pub mod cypher;
mod error;
mod executor;
mod records;
mod store;
mod version;

pub use config::{
    ConnectionConfig, ConnectionConfigBuilder, DEFAULT_MAX_STRING_LENGTH, DEFAULT_URI,
    ENV_DRIVER_VERSION, ENV_PASSWORD, ENV_URI, ENV_USER,
};
pub use cypher::{CypherScript, CypherStatement, CypherValue, StatementType};
pub use error::{Neo4jError, Result};
pub use executor::{CypherExecutor, ScriptExecutor};
pub use records::{column_values, records_to_values, RecordConverter};
pub use store::{connect, CypherStore, PROBE_QUERY};
pub use version::DriverVersion;
