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

//! Sample documents.
//!
//! - **samples**: YAML documents in rich and simple form
//! - **errors**: malformed documents for error handling tests
//! - **builders**: fluent construction of nodes and relationships

pub mod builders;
pub mod errors;
mod samples;

pub use samples::*;

use crate::SampleList;

/// Returns every well-formed sample as `(name, text)`.
pub fn all() -> SampleList {
    vec![
        ("node_parameter_permutations", node_parameter_permutations()),
        ("relationships", relationships()),
        ("nodes_and_relationships", nodes_and_relationships()),
        ("simple_relationships", simple_relationships()),
    ]
}
