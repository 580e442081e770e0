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

//! Connection configuration for the Cypher store.

use serde::{Deserialize, Serialize};

use crate::error::{Neo4jError, Result};
use crate::version::DriverVersion;

/// Default server address.
pub const DEFAULT_URI: &str = "http://localhost:7474/db/data/";

/// Default maximum string length for property values: 100 MB.
///
/// For stricter limits, use [`ConnectionConfig::for_untrusted_input`] which
/// enforces 1 MB.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024;

/// Environment variable holding the server address.
pub const ENV_URI: &str = "NEO4J_URI";
/// Environment variable holding the user name.
pub const ENV_USER: &str = "NEO4J_USER";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "NEO4J_PASSWORD";
/// Environment variable selecting the driver dialect.
pub const ENV_DRIVER_VERSION: &str = "GRYAML_DRIVER_VERSION";

/// How to reach a graph database and what to send it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server address.
    pub uri: String,

    /// User name, if the server requires authentication.
    pub user: Option<String>,

    /// Password. Never serialized.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,

    /// Driver dialect the statements are written in. The version the
    /// server reports never changes it.
    #[serde(default)]
    pub driver_version: DriverVersion,

    /// Maximum byte length of any string property sent to the server.
    /// `None` disables the check.
    pub max_string_length: Option<usize>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            user: None,
            password: None,
            driver_version: DriverVersion::default(),
            max_string_length: Some(DEFAULT_MAX_STRING_LENGTH),
        }
    }
}

impl ConnectionConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gryaml_neo4j::{ConnectionConfig, DriverVersion};
    /// let config = ConnectionConfig::builder()
    ///     .uri("http://graph:7474/db/data/")
    ///     .driver_version(DriverVersion::V1_6)
    ///     .build();
    /// assert_eq!(config.driver_version, DriverVersion::V1_6);
    /// ```
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    /// A configuration with a 1 MB string limit.
    pub fn for_untrusted_input() -> Self {
        Self {
            max_string_length: Some(1024 * 1024),
            ..Self::default()
        }
    }

    /// Read the configuration from `NEO4J_URI`, `NEO4J_USER`,
    /// `NEO4J_PASSWORD` and `GRYAML_DRIVER_VERSION`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(uri) = lookup(ENV_URI).filter(|v| !v.trim().is_empty()) {
            config.uri = uri;
        }
        config.user = lookup(ENV_USER).filter(|v| !v.is_empty());
        config.password = lookup(ENV_PASSWORD);
        if let Some(version) = lookup(ENV_DRIVER_VERSION).filter(|v| !v.trim().is_empty()) {
            let version = DriverVersion::parse(&version).map_err(|_| {
                Neo4jError::Config(format!(
                    "{} names an unsupported driver version '{}'",
                    ENV_DRIVER_VERSION, version
                ))
            })?;
            config.driver_version = version;
        }
        Ok(config)
    }

    /// Set the server address.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Set the driver dialect.
    pub fn with_driver_version(mut self, version: DriverVersion) -> Self {
        self.driver_version = version;
        self
    }

    /// Set the maximum string length for property values.
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(max);
        self
    }
}

/// Builder for [`ConnectionConfig`].
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    uri: Option<String>,
    user: Option<String>,
    password: Option<String>,
    driver_version: Option<DriverVersion>,
    max_string_length: Option<Option<usize>>,
}

impl ConnectionConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server address.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the credentials.
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Set the driver dialect.
    pub fn driver_version(mut self, version: DriverVersion) -> Self {
        self.driver_version = Some(version);
        self
    }

    /// Set maximum string length for property values.
    pub fn max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(Some(max));
        self
    }

    /// Remove the string length limit.
    pub fn no_string_length_limit(mut self) -> Self {
        self.max_string_length = Some(None);
        self
    }

    /// Build the configuration. Unset fields use their defaults.
    pub fn build(self) -> ConnectionConfig {
        let defaults = ConnectionConfig::default();
        ConnectionConfig {
            uri: self.uri.unwrap_or(defaults.uri),
            user: self.user.or(defaults.user),
            password: self.password.or(defaults.password),
            driver_version: self.driver_version.unwrap_or(defaults.driver_version),
            max_string_length: self.max_string_length.unwrap_or(defaults.max_string_length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.uri, DEFAULT_URI);
        assert_eq!(config.driver_version, DriverVersion::V2_0);
        assert_eq!(config.max_string_length, Some(DEFAULT_MAX_STRING_LENGTH));
    }

    #[test]
    fn test_builder() {
        let config = ConnectionConfig::builder()
            .uri("http://db:7474/db/data/")
            .credentials("neo4j", "secret")
            .driver_version(DriverVersion::V1_6)
            .no_string_length_limit()
            .build();
        assert_eq!(config.driver_version, DriverVersion::V1_6);
        assert_eq!(config.uri, "http://db:7474/db/data/");
        assert_eq!(config.user.as_deref(), Some("neo4j"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.max_string_length, None);
    }

    #[test]
    fn test_untrusted_input_limit() {
        assert_eq!(
            ConnectionConfig::for_untrusted_input().max_string_length,
            Some(1024 * 1024)
        );
    }

    #[test]
    fn test_password_is_not_serialized() {
        let config = ConnectionConfig::builder().credentials("u", "hunter2").build();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        let back: ConnectionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.password, None);
        assert_eq!(back.driver_version, DriverVersion::V2_0);
        assert_eq!(back.user.as_deref(), Some("u"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_URI, "http://other:7474/db/data/"),
            (ENV_USER, "reader"),
            (ENV_DRIVER_VERSION, "1.6.2"),
        ]
        .into_iter()
        .collect();
        let config =
            ConnectionConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.uri, "http://other:7474/db/data/");
        assert_eq!(config.user.as_deref(), Some("reader"));
        assert_eq!(config.password, None);
        assert_eq!(config.driver_version, DriverVersion::V1_6);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_version() {
        let err = ConnectionConfig::from_lookup(|key| {
            (key == ENV_DRIVER_VERSION).then(|| "3.0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Neo4jError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(ENV_URI, "http://env-host:7474/db/data/");
        std::env::set_var(ENV_DRIVER_VERSION, "1.6");
        std::env::remove_var(ENV_USER);
        std::env::remove_var(ENV_PASSWORD);

        let config = ConnectionConfig::from_env().unwrap();

        std::env::remove_var(ENV_URI);
        std::env::remove_var(ENV_DRIVER_VERSION);

        assert_eq!(config.uri, "http://env-host:7474/db/data/");
        assert_eq!(config.driver_version, DriverVersion::V1_6);
        assert_eq!(config.user, None);
    }

    #[test]
    #[serial]
    fn test_from_env_empty_uses_defaults() {
        std::env::remove_var(ENV_URI);
        std::env::remove_var(ENV_USER);
        std::env::remove_var(ENV_PASSWORD);
        std::env::remove_var(ENV_DRIVER_VERSION);

        assert_eq!(ConnectionConfig::from_env().unwrap(), ConnectionConfig::default());
    }
}
