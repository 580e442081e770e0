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

//! YAML sample documents.

/// Three tagged nodes: arguments in both orders and a node without labels.
///
/// Two nodes carry the `person` label and two carry an `occupation`
/// property.
pub fn node_parameter_permutations() -> &'static str {
    include_str!("../../samples/node-parameter-permutations.yaml")
}

/// Three tagged nodes and two relationships that alias them.
///
/// Lana Wachowski `DIRECTED` The Matrix; Keanu Reeves `ACTED_IN` it.
pub fn relationships() -> &'static str {
    include_str!("../../samples/relationships.yaml")
}

/// Nine nodes and nine relationships around two movies.
pub fn nodes_and_relationships() -> &'static str {
    include_str!("../../samples/nodes-and-relationships.yaml")
}

/// Two nodes and one relationship written without tags.
pub fn simple_relationships() -> &'static str {
    include_str!("../../samples/simple-relationships.yaml")
}

/// Number of top-level items in [`nodes_and_relationships`].
pub const MOVIE_GRAPH_ITEMS: usize = 18;

/// Number of distinct nodes in [`nodes_and_relationships`].
pub const MOVIE_GRAPH_NODES: usize = 9;
