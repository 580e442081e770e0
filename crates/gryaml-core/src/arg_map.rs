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

//! The arg-map convention.
//!
//! Entity arguments are written as single-key mappings inside a sequence,
//! e.g. `{labels: [person]}` or `{properties: {name: Bob}}`. The key names
//! the argument; the value is its payload. Position carries no meaning.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{GraphError, Result};
use crate::map::Map;
use crate::property::Properties;
use crate::tree::Tree;
use crate::value::Value;

/// Recognized argument names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgName {
    /// `labels`: a sequence of label strings.
    Labels,
    /// `properties`: a mapping of property values.
    Properties,
}

impl ArgName {
    /// Every recognized name, in emission order.
    pub const ALL: [ArgName; 2] = [ArgName::Labels, ArgName::Properties];

    /// The key used in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ArgName::Labels => "labels",
            ArgName::Properties => "properties",
        }
    }

    /// Look up a name by its document key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == key)
    }
}

impl fmt::Display for ArgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff `value` is a mapping with exactly one entry, keyed by `name`.
pub fn is_arg_map(name: ArgName, value: &Value) -> bool {
    arg_payload(name, value).is_some()
}

/// The payload of an arg-map named `name`.
pub fn arg_payload(name: ArgName, value: &Value) -> Option<&Value> {
    match value {
        Value::Mapping(map) => match map.single_entry() {
            Some((key, payload)) if key == name.as_str() => Some(payload),
            _ => None,
        },
        _ => None,
    }
}

/// The payload of the first `name` arg-map in `args`.
///
/// Later duplicates are ignored.
pub fn find_arg_map(name: ArgName, args: &[Value]) -> Option<&Value> {
    args.iter().find_map(|arg| arg_payload(name, arg))
}

/// Build the document form of an arg-map.
pub fn to_arg_map(name: ArgName, payload: Tree) -> Tree {
    Tree::Mapping(Map::singleton(name.as_str(), payload))
}

/// Resolve relationship properties given either as a bare mapping or as a
/// `properties` arg-map. Absent or null means no properties.
///
/// A bare mapping whose only key is `properties` is read as the arg-map form.
pub fn extract_properties(value: Option<&Value>) -> Result<Properties> {
    match value {
        None | Some(Value::Null) => Ok(Properties::new()),
        Some(value) => match arg_payload(ArgName::Properties, value) {
            Some(payload) => properties_from_value(payload),
            None => properties_from_value(value),
        },
    }
}

/// Convert a `labels` payload into a label set.
pub fn labels_from_value(value: &Value) -> Result<BTreeSet<String>> {
    match value {
        Value::Null => Ok(BTreeSet::new()),
        Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) if s.is_empty() => {
                    Err(GraphError::InvalidLabels("label must not be empty".to_string()))
                }
                Value::String(s) => Ok(s.clone()),
                other => Err(GraphError::InvalidLabels(format!(
                    "expected a string label, found {}",
                    other.kind_name()
                ))),
            })
            .collect(),
        other => Err(GraphError::InvalidLabels(format!(
            "expected a sequence of strings, found {}",
            other.kind_name()
        ))),
    }
}

/// Convert a `properties` payload into a property map.
///
/// Null values are dropped; a graph property cannot hold null.
pub fn properties_from_value(value: &Value) -> Result<Properties> {
    let map = match value {
        Value::Null => return Ok(Properties::new()),
        Value::Mapping(map) => map,
        other => {
            return Err(GraphError::property(
                ArgName::Properties.as_str(),
                format!("expected a mapping, found {}", other.kind_name()),
            ))
        }
    };

    let mut props = Properties::new();
    for (key, item) in map.iter() {
        if item.is_null() {
            continue;
        }
        let prop = item.to_property().ok_or_else(|| {
            GraphError::property(
                key,
                format!("{} cannot be stored as a property", describe(item)),
            )
        })?;
        props.insert(key.to_string(), prop);
    }
    Ok(props)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Sequence(_) => "a list holding nested or null items".to_string(),
        other => format!("a {}", other.kind_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyValue;

    fn arg(name: &str, payload: Value) -> Value {
        Value::Mapping(Map::singleton(name, payload))
    }

    fn labels(items: &[&str]) -> Value {
        Value::Sequence(items.iter().map(|s| Value::from(*s)).collect())
    }

    #[test]
    fn test_is_arg_map() {
        assert!(is_arg_map(ArgName::Labels, &arg("labels", labels(&["a"]))));
        assert!(!is_arg_map(ArgName::Properties, &arg("labels", labels(&["a"]))));
        assert!(!is_arg_map(ArgName::Labels, &Value::from("labels")));

        let two: Map<Value> = [("labels", Value::Null), ("properties", Value::Null)]
            .into_iter()
            .collect();
        assert!(!is_arg_map(ArgName::Labels, &Value::Mapping(two)));
    }

    #[test]
    fn test_find_first_match_wins() {
        let args = vec![
            arg("labels", labels(&["first"])),
            arg("labels", labels(&["second"])),
        ];
        let found = find_arg_map(ArgName::Labels, &args).and_then(|v| labels_from_value(v).ok());
        assert_eq!(found, Some(BTreeSet::from(["first".to_string()])));
    }

    #[test]
    fn test_arg_name_lookup() {
        assert_eq!(ArgName::from_key("labels"), Some(ArgName::Labels));
        assert_eq!(ArgName::from_key("properties"), Some(ArgName::Properties));
        assert_eq!(ArgName::from_key("kwargs"), None);
    }

    #[test]
    fn test_extract_properties_dual_form() {
        let bare: Map<Value> = [("since", Value::from(1999i64))].into_iter().collect();
        let bare = Value::Mapping(bare);
        let wrapped = arg("properties", bare.clone());

        let expected = extract_properties(Some(&bare)).unwrap();
        assert_eq!(expected.get("since"), Some(&PropertyValue::Int(1999)));
        assert_eq!(extract_properties(Some(&wrapped)).unwrap(), expected);
        assert!(extract_properties(None).unwrap().is_empty());
        assert!(extract_properties(Some(&Value::Null)).unwrap().is_empty());
    }

    #[test]
    fn test_extract_properties_rejects_scalars() {
        let err = extract_properties(Some(&Value::from(3i64))).unwrap_err();
        assert!(matches!(err, GraphError::InvalidProperty { .. }));
    }

    #[test]
    fn test_labels_validation() {
        assert!(labels_from_value(&Value::Null).unwrap().is_empty());
        assert!(matches!(
            labels_from_value(&Value::from("person")),
            Err(GraphError::InvalidLabels(_))
        ));
        assert!(matches!(
            labels_from_value(&Value::Sequence(vec![Value::from(1i64)])),
            Err(GraphError::InvalidLabels(_))
        ));
        assert!(matches!(
            labels_from_value(&labels(&[""])),
            Err(GraphError::InvalidLabels(_))
        ));
    }

    #[test]
    fn test_labels_deduplicate() {
        let set = labels_from_value(&labels(&["b", "a", "b"])).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_properties_drop_nulls_and_reject_nesting() {
        let map: Map<Value> = [("name", Value::from("Bob")), ("age", Value::Null)]
            .into_iter()
            .collect();
        let props = properties_from_value(&Value::Mapping(map)).unwrap();
        assert_eq!(props.len(), 1);

        let nested: Map<Value> = [("inner", Value::Mapping(Map::new()))].into_iter().collect();
        let err = properties_from_value(&Value::Mapping(nested)).unwrap_err();
        assert_eq!(
            err,
            GraphError::property("inner", "a mapping cannot be stored as a property")
        );
    }

    #[test]
    fn test_to_arg_map() {
        let tree = to_arg_map(ArgName::Labels, Tree::Sequence(vec![Tree::from("x")]));
        assert_eq!(tree.as_mapping().map(|m| m.len()), Some(1));
        assert!(tree.as_mapping().and_then(|m| m.get("labels")).is_some());
    }
}
