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

//! Driver versions and the Cypher dialect each one speaks.
//!
//! The dialect follows the client driver generation the deployment pairs
//! with its server. It is chosen by configuration; the version the server
//! reports is informational only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Neo4jError, Result};

/// A supported driver generation.
///
/// 1.6 cannot attach labels while creating a node, so labelled nodes are
/// created first and labelled by a second statement. 2.0 does both in one.
/// Both write parameters in the `{name}` form of the servers they talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverVersion {
    /// The 1.6 line.
    #[serde(rename = "1.6")]
    V1_6,
    /// The 2.0 line.
    #[default]
    #[serde(rename = "2.0")]
    V2_0,
}

impl DriverVersion {
    /// Resolve a version string such as `"2.0"`, `"2.0.3"` or `"v1.6.4"`.
    ///
    /// Only the major and minor parts are significant. 3.x and anything
    /// else are rejected.
    pub fn parse(version: &str) -> Result<Self> {
        let trimmed = version.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let mut parts = bare.split(|c: char| c == '.' || c == '-');
        match (parts.next(), parts.next()) {
            (Some("1"), Some("6")) => Ok(DriverVersion::V1_6),
            (Some("2"), Some("0")) => Ok(DriverVersion::V2_0),
            _ => Err(Neo4jError::UnsupportedVersion(trimmed.to_string())),
        }
    }

    /// The version as `major.minor`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverVersion::V1_6 => "1.6",
            DriverVersion::V2_0 => "2.0",
        }
    }

    /// The query text referring to parameter `name`.
    pub fn placeholder(&self, name: &str) -> String {
        match self {
            DriverVersion::V1_6 | DriverVersion::V2_0 => format!("{{{}}}", name),
        }
    }

    /// Whether a node can be created with its labels in a single statement.
    pub fn creates_labelled_nodes(&self) -> bool {
        matches!(self, DriverVersion::V2_0)
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverVersion {
    type Err = Neo4jError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
