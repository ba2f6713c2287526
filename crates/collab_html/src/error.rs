// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::model::AttrValue;

/// A problem the importer recovered from.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ImportWarning {
    /// A mention chip's `data-component-props` was not valid JSON and was
    /// dropped from the element.
    #[error("dropped malformed data-component-props {value:?}: {reason}")]
    MalformedComponentProps { value: String, reason: String },
}

/// The HTML could not be parsed under
/// [`ParseMode::Strict`](crate::ParseMode::Strict).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("html parse failed: {}", .parse_errors.join("; "))]
pub struct HtmlParseError {
    pub parse_errors: Vec<String>,
}

/// An attribute value had an unexpected type for the key it is stored
/// under.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("attribute `{key}` has unexpected value {value}")]
pub struct AttributeTypeError {
    pub key: String,
    pub value: AttrValue,
}
