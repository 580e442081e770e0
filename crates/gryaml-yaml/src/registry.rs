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

//! Tag registration.
//!
//! A [`Registry`] decides how entities are represented when encoding and which
//! constructor runs for a tag when decoding. Registration is explicit and
//! reversible: [`Registry::register`] remembers every entry it displaces and
//! [`Registry::unregister`] puts them back.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use gryaml_core::{EntityFactory, Value};
use tracing::debug;

use crate::error::Result;

/// Tag carried by encoded nodes.
pub const NODE_TAG: &str = "!gryaml.node";

/// Tag carried by encoded relationships.
pub const REL_TAG: &str = "!gryaml.rel";

/// The kinds of entity a representer can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Graph nodes.
    Node,
    /// Graph relationships.
    Relationship,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("node"),
            EntityKind::Relationship => f.write_str("relationship"),
        }
    }
}

/// How an entity kind is written into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    /// A sequence under the given tag.
    Tagged(String),
    /// A plain sequence; readers need no tag support.
    Native,
}

/// User-supplied constructor: receives the decoded tagged value.
pub type ConstructorFn = Rc<dyn Fn(Value, &mut EntityFactory) -> Result<Value>>;

/// What runs when a tag is decoded.
#[derive(Clone)]
pub enum Constructor {
    /// Build a node from arg-maps.
    Node,
    /// Build a relationship from `[start, type, end, properties?]`.
    Relationship,
    /// Drop the tag and decode the content as plain data.
    Passthrough,
    /// Run a custom function.
    Custom(ConstructorFn),
}

impl Constructor {
    /// Wrap a closure as a custom constructor.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value, &mut EntityFactory) -> Result<Value> + 'static,
    {
        Constructor::Custom(Rc::new(f))
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constructor::Node => f.write_str("Node"),
            Constructor::Relationship => f.write_str("Relationship"),
            Constructor::Passthrough => f.write_str("Passthrough"),
            Constructor::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Round-trip fidelity of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Entities are written under gryaml tags and read back as live entities.
    Rich,
    /// Entities are written as plain sequences; gryaml tags in input are read
    /// as plain sequences and no entities are built.
    Simple,
}

/// Handling of tags that have no constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Reject them.
    #[default]
    Safe,
    /// Keep them as [`Value::Tagged`].
    Full,
}

#[derive(Debug, Clone, Default)]
struct Displaced {
    representers: Vec<(EntityKind, Option<Representation>)>,
    constructors: Vec<(String, Option<Constructor>)>,
}

/// Representers and constructors used by encoding and decoding.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    profile: Profile,
    mode: Option<Mode>,
    representers: BTreeMap<EntityKind, Representation>,
    constructors: BTreeMap<String, Constructor>,
    displaced: Option<Displaced>,
}

impl Registry {
    /// An empty registry.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// A safe registry with rich-mode handlers registered.
    pub fn rich() -> Self {
        Self::builder().mode(Mode::Rich).build()
    }

    /// A safe registry with simple-mode handlers registered.
    pub fn simple() -> Self {
        Self::builder().mode(Mode::Simple).build()
    }

    /// Create a builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The unknown-tag policy.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// The currently registered mode, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Install the node and relationship handlers for `mode`.
    ///
    /// Registering again first undoes the previous registration.
    pub fn register(&mut self, mode: Mode) {
        self.unregister();

        let (node_rep, rel_rep, node_ctor, rel_ctor) = match mode {
            Mode::Rich => (
                Representation::Tagged(NODE_TAG.to_string()),
                Representation::Tagged(REL_TAG.to_string()),
                Constructor::Node,
                Constructor::Relationship,
            ),
            Mode::Simple => (
                Representation::Native,
                Representation::Native,
                Constructor::Passthrough,
                Constructor::Passthrough,
            ),
        };

        let mut displaced = Displaced::default();
        for (kind, rep) in [(EntityKind::Node, node_rep), (EntityKind::Relationship, rel_rep)] {
            displaced
                .representers
                .push((kind, self.representers.insert(kind, rep)));
        }
        for (tag, ctor) in [(NODE_TAG, node_ctor), (REL_TAG, rel_ctor)] {
            displaced
                .constructors
                .push((tag.to_string(), self.constructors.insert(tag.to_string(), ctor)));
        }
        self.displaced = Some(displaced);
        self.mode = Some(mode);
        debug!(?mode, "registered gryaml handlers");
    }

    /// Remove what [`register`](Self::register) installed and restore the
    /// entries it displaced. Returns false if nothing was registered.
    pub fn unregister(&mut self) -> bool {
        let Some(displaced) = self.displaced.take() else {
            return false;
        };
        for (kind, previous) in displaced.representers {
            match previous {
                Some(rep) => self.representers.insert(kind, rep),
                None => self.representers.remove(&kind),
            };
        }
        for (tag, previous) in displaced.constructors {
            match previous {
                Some(ctor) => self.constructors.insert(tag, ctor),
                None => self.constructors.remove(&tag),
            };
        }
        debug!(mode = ?self.mode, "unregistered gryaml handlers");
        self.mode = None;
        true
    }

    /// Install a constructor for `tag`, returning the one it replaces.
    pub fn add_constructor(&mut self, tag: impl Into<String>, ctor: Constructor) -> Option<Constructor> {
        self.constructors.insert(tag.into(), ctor)
    }

    /// Remove the constructor for `tag`.
    pub fn remove_constructor(&mut self, tag: &str) -> Option<Constructor> {
        self.constructors.remove(tag)
    }

    /// The constructor for `tag`.
    pub fn constructor(&self, tag: &str) -> Option<&Constructor> {
        self.constructors.get(tag)
    }

    /// Install a representer for `kind`, returning the one it replaces.
    pub fn add_representer(&mut self, kind: EntityKind, rep: Representation) -> Option<Representation> {
        self.representers.insert(kind, rep)
    }

    /// Remove the representer for `kind`.
    pub fn remove_representer(&mut self, kind: EntityKind) -> Option<Representation> {
        self.representers.remove(&kind)
    }

    /// The representer for `kind`.
    pub fn representer(&self, kind: EntityKind) -> Option<&Representation> {
        self.representers.get(&kind)
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    mode: Option<Mode>,
    profile: Profile,
}

impl RegistryBuilder {
    /// Register handlers for `mode` on build.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the unknown-tag policy.
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        let mut registry = Registry::new(self.profile);
        if let Some(mode) = self.mode {
            registry.register(mode);
        }
        registry
    }
}
