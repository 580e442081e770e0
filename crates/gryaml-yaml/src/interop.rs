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

//! Conversion between document trees and `serde_yaml` values.
//!
//! `serde_yaml` has no notion of anchors, so shared subtrees are expanded on
//! the way out and every occurrence becomes its own subtree on the way in.

use gryaml_core::{Map, Tree};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Number, Value as YamlValue};

use crate::error::{Result, YamlError};

/// Convert a tree into a `serde_yaml` value.
pub fn tree_to_yaml_value(tree: &Tree) -> Result<YamlValue> {
    Ok(match tree {
        Tree::Null => YamlValue::Null,
        Tree::Bool(b) => YamlValue::Bool(*b),
        Tree::Int(n) => YamlValue::Number(Number::from(*n)),
        Tree::Float(f) => YamlValue::Number(Number::from(*f)),
        Tree::String(s) => YamlValue::String(s.clone()),
        Tree::Sequence(items) => YamlValue::Sequence(
            items
                .iter()
                .map(tree_to_yaml_value)
                .collect::<Result<_>>()?,
        ),
        Tree::Mapping(map) => {
            let mut out = Mapping::with_capacity(map.len());
            for (key, item) in map.iter() {
                out.insert(YamlValue::String(key.to_string()), tree_to_yaml_value(item)?);
            }
            YamlValue::Mapping(out)
        }
        Tree::Tagged(tag, inner) => {
            if tag.trim_start_matches('!').is_empty() {
                return Err(YamlError::Emit(format!("invalid tag '{}'", tag)));
            }
            YamlValue::Tagged(Box::new(TaggedValue {
                tag: Tag::new(tag.as_str()),
                value: tree_to_yaml_value(inner)?,
            }))
        }
        Tree::Shared(inner) => tree_to_yaml_value(inner)?,
    })
}

/// Convert a `serde_yaml` value into a tree.
///
/// Scalar keys are stringified; collection keys are rejected.
pub fn tree_from_yaml_value(value: &YamlValue) -> Result<Tree> {
    Ok(match value {
        YamlValue::Null => Tree::Null,
        YamlValue::Bool(b) => Tree::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Tree::Int(i)
            } else if let Some(f) = n.as_f64() {
                Tree::Float(f)
            } else {
                return Err(YamlError::Parse(format!("Invalid number: {:?}", n)));
            }
        }
        YamlValue::String(s) => Tree::String(s.clone()),
        YamlValue::Sequence(items) => Tree::Sequence(
            items
                .iter()
                .map(tree_from_yaml_value)
                .collect::<Result<_>>()?,
        ),
        YamlValue::Mapping(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key_text(key)?, tree_from_yaml_value(item)?);
            }
            Tree::Mapping(out)
        }
        YamlValue::Tagged(tagged) => {
            Tree::tagged(tagged.tag.to_string(), tree_from_yaml_value(&tagged.value)?)
        }
    })
}

fn key_text(key: &YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => key_text(&tagged.value),
        YamlValue::Sequence(_) => Err(YamlError::NonStringKey {
            key_type: "sequence".to_string(),
        }),
        YamlValue::Mapping(_) => Err(YamlError::NonStringKey {
            key_type: "mapping".to_string(),
        }),
    }
}
