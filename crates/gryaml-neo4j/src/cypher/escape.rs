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

//! Cypher string escaping and identifier validation.
//!
//! Labels and relationship types cannot be passed as statement parameters,
//! so they are spliced into the query text. Everything spliced goes through
//! this module: Unicode is normalized to NFC, invisible and control
//! characters are dropped, and anything that is not a plain identifier is
//! backtick-quoted.

use std::borrow::Cow;
use std::collections::BTreeSet;

use gryaml_core::{Properties, PropertyValue};
use unicode_normalization::UnicodeNormalization;

use crate::config::ConnectionConfig;
use crate::error::{Neo4jError, Result};

/// Validate string length against the configured limit.
///
/// # Examples
///
/// ```
/// # use gryaml_neo4j::cypher::validate_string_length;
/// # use gryaml_neo4j::ConnectionConfig;
/// let config = ConnectionConfig::default().with_max_string_length(1000);
/// assert!(validate_string_length("test", "name", &config).is_ok());
///
/// let huge = "x".repeat(10_000);
/// assert!(validate_string_length(&huge, "description", &config).is_err());
/// ```
pub fn validate_string_length(s: &str, property: &str, config: &ConnectionConfig) -> Result<()> {
    if let Some(max_length) = config.max_string_length {
        let length = s.len();
        if length > max_length {
            return Err(Neo4jError::StringLengthExceeded {
                length,
                max_length,
                property: property.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate every string in a property map, list items included.
pub fn validate_properties(properties: &Properties, config: &ConnectionConfig) -> Result<()> {
    fn check(value: &PropertyValue, key: &str, config: &ConnectionConfig) -> Result<()> {
        match value {
            PropertyValue::String(s) => validate_string_length(s, key, config),
            PropertyValue::List(items) => items.iter().try_for_each(|item| check(item, key, config)),
            _ => Ok(()),
        }
    }
    properties
        .iter()
        .try_for_each(|(key, value)| check(value, key, config))
}

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars().any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string value for use inside a quoted Cypher literal.
///
/// Returns the input unchanged, without allocating, when nothing needs
/// escaping.
///
/// ```
/// # use gryaml_neo4j::cypher::escape_string;
/// assert!(matches!(escape_string("user_name"), std::borrow::Cow::Borrowed(_)));
/// assert_eq!(escape_string("it's"), "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value for Cypher with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Check if a string is a plain Cypher identifier: a letter or underscore
/// followed by letters, digits and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate and return a Cypher identifier, or error if invalid.
pub fn validate_identifier(s: &str) -> Result<&str> {
    if is_valid_identifier(s) {
        Ok(s)
    } else {
        Err(Neo4jError::InvalidIdentifier(s.to_string()))
    }
}

/// Normalize a string to NFC (Canonical Composition) form.
///
/// ```
/// # use gryaml_neo4j::cypher::normalize_unicode;
/// let composed = "caf\u{e9}";
/// let decomposed = "cafe\u{301}";
/// assert_eq!(normalize_unicode(composed), normalize_unicode(decomposed));
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

/// Control, zero-width and bidirectional formatting characters.
fn is_dangerous_unicode(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'
                | '\u{200C}'
                | '\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'
                | '\u{202B}'
                | '\u{202C}'
                | '\u{202D}'
                | '\u{202E}'
                | '\u{2066}'
                | '\u{2067}'
                | '\u{2068}'
                | '\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

fn sanitize(s: &str) -> String {
    normalize_unicode(s)
        .chars()
        .filter(|c| !is_dangerous_unicode(*c))
        .collect()
}

fn quote_if_needed(sanitized: String) -> String {
    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape an identifier for Cypher using backticks if needed.
///
/// ```
/// # use gryaml_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("name"), "name");
/// assert_eq!(escape_identifier("123name"), "`123name`");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    quote_if_needed(sanitize(s))
}

/// Escape a label, prefixed with `:`.
///
/// ```
/// # use gryaml_neo4j::cypher::escape_label;
/// assert_eq!(escape_label("person"), ":person");
/// assert_eq!(escape_label("My-Label"), ":`My-Label`");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", quote_if_needed(sanitize(s)))
}

/// Escape a relationship type, prefixed with `:`.
///
/// ```
/// # use gryaml_neo4j::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("KNOWS"), ":KNOWS");
/// assert_eq!(escape_relationship_type("knows-about"), ":`knows-about`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", quote_if_needed(sanitize(s)))
}

/// Escape a label set as a `:A:B` chain, in set order.
///
/// A label that is empty once sanitized is rejected rather than emitted as
/// an empty quoted name.
pub fn escape_labels(labels: &BTreeSet<String>) -> Result<String> {
    let mut out = String::new();
    for label in labels {
        let sanitized = sanitize(label);
        if sanitized.is_empty() {
            return Err(Neo4jError::InvalidIdentifier(label.clone()));
        }
        out.push(':');
        out.push_str(&quote_if_needed(sanitized));
    }
    Ok(out)
}

/// Escape a relationship type, rejecting one that is empty once sanitized.
pub fn checked_relationship_type(rel_type: &str) -> Result<String> {
    if sanitize(rel_type).is_empty() {
        return Err(Neo4jError::InvalidIdentifier(rel_type.to_string()));
    }
    Ok(escape_relationship_type(rel_type))
}

/// Check if a string is a Cypher reserved keyword.
fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "COUNT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DO"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FILTER"
            | "FOREACH"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MANDATORY"
            | "MATCH"
            | "MERGE"
            | "NODE"
            | "NONE"
            | "NOT"
            | "NULL"
            | "OF"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REDUCE"
            | "RELATIONSHIP"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SINGLE"
            | "SKIP"
            | "SOME"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UNWIND"
            | "USING"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}
