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

//! YAML text to document trees.
//!
//! Parsing is event driven over `yaml-rust2`. Anchored nodes become
//! [`Tree::Shared`] and every alias to them clones the same `Rc`, so identity
//! survives parsing. Core-schema tags (`!!str`, `!!seq`, ...) are applied and
//! dropped; any other tag is kept as [`Tree::Tagged`].

use std::collections::HashMap;
use std::rc::Rc;

use gryaml_core::{Map, Tree};
use tracing::trace;
use yaml_rust2::parser::{Event, EventReceiver, Parser, Tag};
use yaml_rust2::scanner::TScalarStyle;

use crate::config::LoadConfig;
use crate::error::{Result, YamlError};

/// Prefix shared by every YAML core-schema tag.
pub const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Parse a stream into one tree per document.
pub fn parse_all(text: &str, config: &LoadConfig) -> Result<Vec<Tree>> {
    if text.len() > config.max_document_size {
        return Err(YamlError::DocumentTooLarge {
            size: text.len(),
            max_size: config.max_document_size,
        });
    }

    let mut builder = TreeBuilder::new(config);
    let mut parser = Parser::new(text.chars());
    parser
        .load(&mut builder, true)
        .map_err(|e| YamlError::Parse(e.to_string()))?;
    builder.finish()
}

/// Parse a stream that must hold at most one document.
///
/// An empty stream parses as [`Tree::Null`].
pub fn parse(text: &str, config: &LoadConfig) -> Result<Tree> {
    let mut documents = parse_all(text, config)?;
    match documents.len() {
        0 => Ok(Tree::Null),
        1 => Ok(documents.remove(0)),
        n => Err(YamlError::Parse(format!(
            "expected a single document, found {} documents",
            n
        ))),
    }
}

/// Full tag name, expanding the `!!` shorthand.
pub(crate) fn tag_name(tag: &Tag) -> String {
    if tag.handle == "!!" {
        format!("{}{}", CORE_TAG_PREFIX, tag.suffix)
    } else {
        format!("{}{}", tag.handle, tag.suffix)
    }
}

/// Resolve an untagged plain scalar with the YAML core schema.
pub(crate) fn resolve_plain(raw: &str) -> Tree {
    match raw {
        "" | "~" | "null" | "Null" | "NULL" => return Tree::Null,
        "true" | "True" | "TRUE" => return Tree::Bool(true),
        "false" | "False" | "FALSE" => return Tree::Bool(false),
        ".nan" | ".NaN" | ".NAN" => return Tree::Float(f64::NAN),
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
            return Tree::Float(f64::INFINITY)
        }
        "-.inf" | "-.Inf" | "-.INF" => return Tree::Float(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(n) = parse_int(raw) {
        return Tree::Int(n);
    }
    if is_decimal(raw) || is_float(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return Tree::Float(f);
        }
    }
    Tree::String(raw.to_string())
}

fn split_sign(raw: &str) -> (bool, &str) {
    match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    }
}

fn is_decimal(raw: &str) -> bool {
    let (_, body) = split_sign(raw);
    !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit())
}

fn parse_int(raw: &str) -> Option<i64> {
    let (negative, body) = split_sign(raw);
    let magnitude = if let Some(hex) = body.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(oct) = body.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()?
    } else if is_decimal(raw) {
        return raw.parse::<i64>().ok();
    } else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn is_float(raw: &str) -> bool {
    let (_, body) = split_sign(raw);
    let bytes = body.as_bytes();
    let mut digits = false;
    let mut dot = false;
    let mut exponent = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => digits = true,
            b'.' if !dot && !exponent => dot = true,
            b'e' | b'E' if digits && !exponent => {
                exponent = true;
                if matches!(bytes.get(i + 1), Some(b'+') | Some(b'-')) {
                    i += 1;
                }
                if !matches!(bytes.get(i + 1), Some(b'0'..=b'9')) {
                    return false;
                }
            }
            _ => return false,
        }
        i += 1;
    }
    digits && (dot || exponent)
}

fn resolve_tagged_scalar(raw: String, tag: &str) -> Result<Tree> {
    let Some(core) = tag.strip_prefix(CORE_TAG_PREFIX) else {
        if tag == "!" {
            return Ok(Tree::String(raw));
        }
        return Ok(Tree::tagged(tag, Tree::String(raw)));
    };
    let invalid = |kind: &str, raw: &str| YamlError::Parse(format!("invalid !!{} value '{}'", kind, raw));
    match core {
        "str" => Ok(Tree::String(raw)),
        "null" => Ok(Tree::Null),
        "bool" => match resolve_plain(&raw) {
            Tree::Bool(b) => Ok(Tree::Bool(b)),
            _ => Err(invalid("bool", &raw)),
        },
        "int" => parse_int(&raw).map(Tree::Int).ok_or_else(|| invalid("int", &raw)),
        "float" => match resolve_plain(&raw) {
            Tree::Float(f) => Ok(Tree::Float(f)),
            Tree::Int(n) => Ok(Tree::Float(n as f64)),
            _ => Err(invalid("float", &raw)),
        },
        _ => Ok(Tree::tagged(tag, Tree::String(raw))),
    }
}

fn apply_collection_tag(tree: Tree, tag: Option<String>) -> Tree {
    match tag {
        Some(tag) if !tag.starts_with(CORE_TAG_PREFIX) && tag != "!" => Tree::tagged(tag, tree),
        _ => tree,
    }
}

enum Frame {
    Sequence {
        anchor: usize,
        tag: Option<String>,
        items: Vec<Tree>,
    },
    Mapping {
        anchor: usize,
        tag: Option<String>,
        entries: Map<Tree>,
        key: Option<String>,
    },
}

struct TreeBuilder<'a> {
    config: &'a LoadConfig,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Rc<Tree>>,
    root: Option<Tree>,
    documents: Vec<Tree>,
    aliases: usize,
    error: Option<YamlError>,
}

impl<'a> TreeBuilder<'a> {
    fn new(config: &'a LoadConfig) -> Self {
        Self {
            config,
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            documents: Vec::new(),
            aliases: 0,
            error: None,
        }
    }

    fn finish(self) -> Result<Vec<Tree>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.documents),
        }
    }

    fn expecting_key(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Mapping { key: None, .. }))
    }

    fn handle(&mut self, ev: Event) -> Result<()> {
        match ev {
            Event::Scalar(raw, style, anchor, tag) => {
                if self.expecting_key() {
                    if anchor != 0 {
                        self.anchors.insert(anchor, Rc::new(Tree::String(raw.clone())));
                    }
                    return self.set_key(raw);
                }
                let tree = match tag.as_ref().map(tag_name) {
                    Some(tag) => resolve_tagged_scalar(raw, &tag)?,
                    None if matches!(style, TScalarStyle::Plain) => resolve_plain(&raw),
                    None => Tree::String(raw),
                };
                self.complete(tree, anchor)
            }
            Event::SequenceStart(anchor, tag) => {
                self.open()?;
                self.stack.push(Frame::Sequence {
                    anchor,
                    tag: tag.as_ref().map(tag_name),
                    items: Vec::new(),
                });
                Ok(())
            }
            Event::MappingStart(anchor, tag) => {
                self.open()?;
                self.stack.push(Frame::Mapping {
                    anchor,
                    tag: tag.as_ref().map(tag_name),
                    entries: Map::new(),
                    key: None,
                });
                Ok(())
            }
            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence { anchor, tag, items }) => {
                    self.complete(apply_collection_tag(Tree::Sequence(items), tag), anchor)
                }
                Some(Frame::Mapping {
                    anchor,
                    tag,
                    entries,
                    ..
                }) => self.complete(apply_collection_tag(Tree::Mapping(entries), tag), anchor),
                None => Err(YamlError::Parse("unbalanced collection end".to_string())),
            },
            Event::Alias(id) => {
                self.aliases += 1;
                if self.aliases > self.config.max_aliases {
                    return Err(YamlError::TooManyAliases {
                        max_aliases: self.config.max_aliases,
                    });
                }
                let shared = self.anchors.get(&id).cloned().ok_or(YamlError::UnresolvedAlias)?;
                if self.expecting_key() {
                    let key = scalar_key(&shared)?;
                    return self.set_key(key);
                }
                self.insert(Tree::Shared(shared))
            }
            Event::DocumentEnd => {
                let root = self.root.take().unwrap_or(Tree::Null);
                trace!(kind = root.kind_name(), "parsed document");
                self.documents.push(root);
                self.anchors.clear();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn open(&mut self) -> Result<()> {
        if self.expecting_key() {
            return Err(YamlError::NonStringKey {
                key_type: "collection".to_string(),
            });
        }
        if self.stack.len() >= self.config.max_nesting_depth {
            return Err(YamlError::MaxDepthExceeded {
                max_depth: self.config.max_nesting_depth,
            });
        }
        Ok(())
    }

    fn set_key(&mut self, raw: String) -> Result<()> {
        if let Some(Frame::Mapping { key, .. }) = self.stack.last_mut() {
            *key = Some(raw);
        }
        Ok(())
    }

    fn complete(&mut self, tree: Tree, anchor: usize) -> Result<()> {
        if anchor == 0 {
            return self.insert(tree);
        }
        let shared = Rc::new(tree);
        self.anchors.insert(anchor, Rc::clone(&shared));
        self.insert(Tree::Shared(shared))
    }

    fn insert(&mut self, tree: Tree) -> Result<()> {
        match self.stack.last_mut() {
            None => self.root = Some(tree),
            Some(Frame::Sequence { items, .. }) => items.push(tree),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                Some(k) => {
                    entries.insert(k, tree);
                }
                None => {
                    return Err(YamlError::NonStringKey {
                        key_type: tree.kind_name().to_string(),
                    })
                }
            },
        }
        Ok(())
    }
}

fn scalar_key(tree: &Tree) -> Result<String> {
    match tree.resolve() {
        Tree::String(s) => Ok(s.clone()),
        Tree::Int(n) => Ok(n.to_string()),
        Tree::Bool(b) => Ok(b.to_string()),
        Tree::Float(f) => Ok(f.to_string()),
        Tree::Null => Ok("null".to_string()),
        other => Err(YamlError::NonStringKey {
            key_type: other.kind_name().to_string(),
        }),
    }
}

impl EventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(ev) {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(text: &str) -> Tree {
        parse(text, &LoadConfig::default()).unwrap()
    }

    #[test]
    fn test_plain_scalar_resolution() {
        assert_eq!(resolve_plain("~"), Tree::Null);
        assert_eq!(resolve_plain(""), Tree::Null);
        assert_eq!(resolve_plain("true"), Tree::Bool(true));
        assert_eq!(resolve_plain("-42"), Tree::Int(-42));
        assert_eq!(resolve_plain("0x1f"), Tree::Int(31));
        assert_eq!(resolve_plain("0o17"), Tree::Int(15));
        assert_eq!(resolve_plain("1.5"), Tree::Float(1.5));
        assert_eq!(resolve_plain("1e3"), Tree::Float(1000.0));
        assert_eq!(resolve_plain(".inf"), Tree::Float(f64::INFINITY));
        assert_eq!(resolve_plain("yes"), Tree::from("yes"));
        assert_eq!(resolve_plain("1.2.3"), Tree::from("1.2.3"));
        assert_eq!(resolve_plain("e5"), Tree::from("e5"));
        assert_eq!(resolve_plain("Bob"), Tree::from("Bob"));
    }

    #[test]
    fn test_quoted_scalars_stay_strings() {
        let tree = one("- '42'\n- \"true\"\n- 42\n");
        assert_eq!(
            tree,
            Tree::Sequence(vec![Tree::from("42"), Tree::from("true"), Tree::Int(42)])
        );
    }

    #[test]
    fn test_mapping_keeps_document_order() {
        let tree = one("zeta: 1\nalpha: 2\n");
        let keys: Vec<_> = tree.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_numeric_keys_are_verbatim() {
        let tree = one("1: one\n0x10: sixteen\n");
        let keys: Vec<_> = tree.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["1", "0x10"]);
    }

    #[test]
    fn test_local_tags_are_kept() {
        let tree = one("--- !gryaml.node\n- labels: [person]\n");
        assert_eq!(tree.tag(), Some("!gryaml.node"));
    }

    #[test]
    fn test_core_tags_are_applied() {
        let tree = one("- !!str 42\n- !!int '7'\n- !!seq [a]\n");
        let items = tree.as_sequence().unwrap();
        assert_eq!(items[0], Tree::from("42"));
        assert_eq!(items[1], Tree::Int(7));
        assert_eq!(items[2], Tree::Sequence(vec![Tree::from("a")]));
    }

    #[test]
    fn test_alias_shares_rc() {
        let tree = one("- &a [x]\n- *a\n");
        let items = tree.as_sequence().unwrap();
        match (&items[0], &items[1]) {
            (Tree::Shared(a), Tree::Shared(b)) => assert!(Rc::ptr_eq(a, b)),
            other => panic!("expected shared subtrees, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_alias_is_an_error() {
        let err = parse("- *nowhere\n", &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, YamlError::Parse(_) | YamlError::UnresolvedAlias));
    }

    #[test]
    fn test_collection_key_rejected() {
        let err = parse("? [a, b]\n: value\n", &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, YamlError::NonStringKey { .. }));
    }

    #[test]
    fn test_multiple_documents() {
        let docs = parse_all("--- 1\n--- 2\n", &LoadConfig::default()).unwrap();
        assert_eq!(docs, vec![Tree::Int(1), Tree::Int(2)]);
        assert!(parse("--- 1\n--- 2\n", &LoadConfig::default()).is_err());
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(one(""), Tree::Null);
    }

    #[test]
    fn test_limits() {
        let config = LoadConfig::builder().max_document_size(4).build();
        assert!(matches!(
            parse("abcdefgh", &config),
            Err(YamlError::DocumentTooLarge { .. })
        ));

        let config = LoadConfig::builder().max_nesting_depth(2).build();
        assert!(matches!(
            parse("[[[1]]]", &config),
            Err(YamlError::MaxDepthExceeded { .. })
        ));

        let config = LoadConfig::builder().max_aliases(1).build();
        assert!(matches!(
            parse("- &a 1\n- *a\n- *a\n", &config),
            Err(YamlError::TooManyAliases { .. })
        ));
    }
}
