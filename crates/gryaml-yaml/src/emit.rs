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

//! Document trees to YAML text.
//!
//! Output is block style. A [`Tree::Shared`] subtree reached more than once is
//! written in full at its first occurrence under an anchor (`&id001`) and as
//! an alias (`*id001`) everywhere after.

use std::collections::HashMap;
use std::rc::Rc;

use gryaml_core::{Map, Tree};

use crate::config::DumpConfig;
use crate::error::{Result, YamlError};
use crate::parse::{resolve_plain, CORE_TAG_PREFIX};

/// Emit a single document.
pub fn emit(tree: &Tree, config: &DumpConfig) -> Result<String> {
    emit_all(std::slice::from_ref(tree), config)
}

/// Emit a stream of documents separated by `---`.
pub fn emit_all(trees: &[Tree], config: &DumpConfig) -> Result<String> {
    let mut out = String::new();
    for (index, tree) in trees.iter().enumerate() {
        let mut emitter = Emitter::new(config, &mut out);
        emitter.count(tree);
        emitter.write(tree, 0, Position::Root {
            marker: index > 0 || config.explicit_start,
        })?;
    }
    Ok(out)
}

#[derive(Clone, Copy)]
enum Position {
    /// Start of a document.
    Root { marker: bool },
    /// Right after `- `.
    Item,
    /// Right after `key:`.
    Value,
}

struct Emitter<'a> {
    config: &'a DumpConfig,
    out: &'a mut String,
    counts: HashMap<*const Tree, usize>,
    anchors: HashMap<*const Tree, String>,
    next_anchor: usize,
}

impl<'a> Emitter<'a> {
    fn new(config: &'a DumpConfig, out: &'a mut String) -> Self {
        Self {
            config,
            out,
            counts: HashMap::new(),
            anchors: HashMap::new(),
            next_anchor: 1,
        }
    }

    fn count(&mut self, tree: &Tree) {
        match tree {
            Tree::Shared(rc) => {
                let seen = self.counts.entry(Rc::as_ptr(rc)).or_insert(0);
                *seen += 1;
                if *seen == 1 {
                    self.count(rc);
                }
            }
            Tree::Sequence(items) => items.iter().for_each(|item| self.count(item)),
            Tree::Mapping(map) => map.iter().for_each(|(_, value)| self.count(value)),
            Tree::Tagged(_, inner) => self.count(inner),
            _ => {}
        }
    }

    fn write(&mut self, tree: &Tree, indent: usize, position: Position) -> Result<()> {
        let mut anchor: Option<String> = None;
        let mut tag: Option<&str> = None;
        let mut node = tree;
        loop {
            match node {
                Tree::Shared(rc) => {
                    let ptr = Rc::as_ptr(rc);
                    if let Some(name) = self.anchors.get(&ptr) {
                        if anchor.is_some() || tag.is_some() {
                            return Err(YamlError::Emit(
                                "an alias cannot carry an anchor or tag".to_string(),
                            ));
                        }
                        let alias = format!("*{}", name);
                        self.scalar_line(&alias, position);
                        return Ok(());
                    }
                    if self.counts.get(&ptr).copied().unwrap_or(0) > 1 {
                        if anchor.is_some() {
                            return Err(YamlError::Emit(
                                "a node cannot carry two anchors".to_string(),
                            ));
                        }
                        let name = format!("{}{:03}", self.config.anchor_prefix, self.next_anchor);
                        self.next_anchor += 1;
                        self.anchors.insert(ptr, name.clone());
                        anchor = Some(name);
                    }
                    node = &**rc;
                }
                Tree::Tagged(name, inner) => {
                    if tag.is_some() {
                        return Err(YamlError::Emit("a node cannot carry two tags".to_string()));
                    }
                    tag = Some(name.as_str());
                    node = &**inner;
                }
                _ => break,
            }
        }

        let mut props = Vec::new();
        if let Some(anchor) = anchor {
            props.push(format!("&{}", anchor));
        }
        if let Some(tag) = tag {
            props.push(format_tag(tag));
        }
        let props = props.join(" ");

        match node {
            Tree::Sequence(items) if !items.is_empty() => {
                let compact = self.open_block(&props, position);
                for (i, item) in items.iter().enumerate() {
                    if !(compact && i == 0) {
                        self.pad(indent);
                    }
                    self.out.push_str("- ");
                    self.write(item, indent + 2, Position::Item)?;
                }
                Ok(())
            }
            Tree::Mapping(map) if !map.is_empty() => {
                let compact = self.open_block(&props, position);
                self.write_entries(map, indent, compact)
            }
            scalar => {
                let text = scalar_text(scalar);
                let line = if props.is_empty() {
                    text
                } else {
                    format!("{} {}", props, text)
                };
                self.scalar_line(&line, position);
                Ok(())
            }
        }
    }

    fn write_entries(&mut self, map: &Map<Tree>, indent: usize, compact: bool) -> Result<()> {
        for (i, (key, value)) in map.iter().enumerate() {
            if !(compact && i == 0) {
                self.pad(indent);
            }
            self.out.push_str(&key_text(key));
            self.out.push(':');
            self.write(value, indent + self.config.indent, Position::Value)?;
        }
        Ok(())
    }

    /// Write whatever precedes the entries of a block collection. Returns true
    /// when the first entry continues the current line.
    fn open_block(&mut self, props: &str, position: Position) -> bool {
        match position {
            Position::Root { marker } => {
                if !props.is_empty() {
                    self.out.push_str("--- ");
                    self.out.push_str(props);
                    self.out.push('\n');
                } else if marker {
                    self.out.push_str("---\n");
                }
                false
            }
            Position::Item => {
                if props.is_empty() {
                    true
                } else {
                    self.out.push_str(props);
                    self.out.push('\n');
                    false
                }
            }
            Position::Value => {
                if !props.is_empty() {
                    self.out.push(' ');
                    self.out.push_str(props);
                }
                self.out.push('\n');
                false
            }
        }
    }

    fn scalar_line(&mut self, text: &str, position: Position) {
        match position {
            Position::Root { marker: true } => {
                self.out.push_str("--- ");
            }
            Position::Value => self.out.push(' '),
            _ => {}
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }
}

fn format_tag(tag: &str) -> String {
    if let Some(core) = tag.strip_prefix(CORE_TAG_PREFIX) {
        format!("!!{}", core)
    } else if tag.starts_with('!') {
        tag.to_string()
    } else {
        format!("!<{}>", tag)
    }
}

fn scalar_text(tree: &Tree) -> String {
    match tree {
        Tree::Null => "null".to_string(),
        Tree::Bool(b) => b.to_string(),
        Tree::Int(n) => n.to_string(),
        Tree::Float(f) if f.is_nan() => ".nan".to_string(),
        Tree::Float(f) if f.is_infinite() && *f > 0.0 => ".inf".to_string(),
        Tree::Float(f) if f.is_infinite() => "-.inf".to_string(),
        Tree::Float(f) => format!("{:?}", f),
        Tree::String(s) => string_text(s),
        Tree::Sequence(_) => "[]".to_string(),
        Tree::Mapping(_) => "{}".to_string(),
        // Wrappers are unwrapped by the caller.
        Tree::Tagged(_, inner) => scalar_text(inner),
        Tree::Shared(inner) => scalar_text(inner),
    }
}

fn key_text(key: &str) -> String {
    string_text(key)
}

fn string_text(s: &str) -> String {
    if is_plain_safe(s) {
        s.to_string()
    } else {
        quote(s)
    }
}

/// YAML 1.1 booleans that older readers would not load as strings.
const LEGACY_BOOLEANS: &[&str] = &["y", "n", "yes", "no", "on", "off"];

fn is_plain_safe(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if s.trim() != s || !matches!(resolve_plain(s), Tree::String(_)) {
        return false;
    }
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) || s.starts_with("...") {
        return false;
    }
    if LEGACY_BOOLEANS.contains(&s.to_ascii_lowercase().as_str()) || s.starts_with("0b") {
        return false;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return false;
    }
    !s.chars().any(|c| {
        c.is_control() || matches!(c, ',' | '[' | ']' | '{' | '}' | '\u{feff}' | '\u{2028}' | '\u{2029}')
    })
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() || matches!(c, '\u{feff}' | '\u{2028}' | '\u{2029}') => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
