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

//! Cypher statement building.
//!
//! Values always travel as statement parameters; only labels and
//! relationship types are spliced into query text, and only after escaping.

pub mod escape;
pub mod statements;

pub use escape::{
    checked_relationship_type, escape_identifier, escape_label, escape_labels,
    escape_relationship_type, escape_string, is_valid_identifier, normalize_unicode,
    quote_string, validate_identifier, validate_properties, validate_string_length,
};

pub use statements::{CypherScript, CypherStatement, CypherValue, StatementType};
