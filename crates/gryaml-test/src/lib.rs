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

//! Shared test fixtures and utilities for gryaml.
//!
//! This crate provides sample documents, entity builders, error fixtures and
//! counting helpers used by the tests of every gryaml crate.
//!
//! # Quick Start
//!
//! ```rust
//! use gryaml_test::fixtures;
//! use gryaml_test::fixtures::builders::GraphBuilder;
//!
//! // Sample documents
//! let text = fixtures::relationships();
//! assert!(text.contains("!gryaml.rel"));
//!
//! // Build entities directly
//! let graph = GraphBuilder::new()
//!     .node("bob", ["person"], [("name", "Bob")])
//!     .node("matrix", ["movie"], [("title", "The Matrix")])
//!     .relationship("bob", "LIKES", "matrix", [("stars", 5i64)])
//!     .build();
//! assert_eq!(graph.relationships().len(), 1);
//! ```

/// A list of named sample documents.
pub type SampleList = Vec<(&'static str, &'static str)>;

/// Sample documents, builders and error fixtures.
pub mod fixtures;

/// Counting utilities for loaded values.
pub mod counts;

pub use counts::{count_nodes, count_relationships, count_with_label, count_with_property};
pub use fixtures::*;
