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

//! Malformed documents.
//!
//! Each sample is well-formed YAML that must still be rejected by a rich-mode
//! load, except for [`invalid_yaml_samples`], which no YAML parser accepts.

/// Tagged relationships of the wrong shape.
pub fn malformed_relationship_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("too_short", "!gryaml.rel [!gryaml.node [], KNOWS]\n"),
        (
            "too_long",
            "!gryaml.rel [!gryaml.node [], KNOWS, !gryaml.node [], {}, {}]\n",
        ),
        ("start_not_node", "!gryaml.rel [a, KNOWS, !gryaml.node []]\n"),
        ("end_not_node", "!gryaml.rel [!gryaml.node [], KNOWS, b]\n"),
        (
            "type_not_string",
            "!gryaml.rel [!gryaml.node [], 42, !gryaml.node []]\n",
        ),
        ("not_a_sequence", "!gryaml.rel {start: a}\n"),
    ]
}

/// Tagged nodes whose arguments cannot become labels or properties.
pub fn malformed_node_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("labels_not_sequence", "!gryaml.node [{labels: person}]\n"),
        ("label_not_string", "!gryaml.node [{labels: [1]}]\n"),
        ("empty_label", "!gryaml.node [{labels: ['']}]\n"),
        ("properties_not_mapping", "!gryaml.node [{properties: [a]}]\n"),
        ("nested_property", "!gryaml.node [{properties: {a: {b: c}}}]\n"),
        ("node_not_sequence", "!gryaml.node {labels: [x]}\n"),
    ]
}

/// Tags no registry handles by default.
pub fn unknown_tag_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("local_tag", "!custom [1, 2]\n"),
        ("uri_tag", "!<tag:example.com,2024:thing> x\n"),
    ]
}

/// Text that is not YAML.
pub fn invalid_yaml_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("unclosed_flow", "[a, b\n"),
        ("nested_mapping_value", "a: b: c\n"),
        ("undefined_alias", "- *missing\n"),
        ("unclosed_quote", "\"open\n"),
    ]
}
