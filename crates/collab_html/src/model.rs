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

//! In-memory form of the shared document tree.
//!
//! A [`Fragment`] holds an ordered list of [`Node`]s; each node is either
//! an [`Element`] with a semantic name, attributes and children, or a
//! [`TextRun`] carrying literal text and one [`MarkSet`].
//!
//! The CRDT backend projects its shared tree into these types for export,
//! and the model is itself a [`DocumentWriter`](crate::DocumentWriter) so
//! HTML can be imported without a CRDT document at all.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Number, Value};

use crate::marks::MarkSet;

/// Element attributes, iterated alphabetically.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    String(String),
    Number(Number),
    Boolean(bool),
    /// A JSON object or array, e.g. a mention chip's `componentProps`.
    Json(Value),
}

impl AttrValue {
    /// Infer the type of a raw HTML attribute value.
    ///
    /// Values that parse as a JSON number, boolean, object or array keep
    /// that type; a JSON string literal is unwrapped; anything else,
    /// including `null`, stays the raw string.
    pub fn infer(raw: &str) -> AttrValue {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Null) | Err(_) => AttrValue::String(raw.to_owned()),
            Ok(value) => AttrValue::from(value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as it appears inside an HTML attribute, before escaping.
    pub fn to_attribute_string(&self) -> String {
        match self {
            AttrValue::String(s) => s.clone(),
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Boolean(b) => b.to_string(),
            AttrValue::Json(v) => v.to_string(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_attribute_string())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => AttrValue::Boolean(b),
            Value::Number(n) => AttrValue::Number(n),
            Value::String(s) => AttrValue::String(s),
            other => AttrValue::Json(other),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Boolean(value)
    }
}

/// A contiguous span of text with one set of marks.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub marks: MarkSet,
}

impl TextRun {
    pub fn new(text: impl Into<String>, marks: MarkSet) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, MarkSet::new())
    }
}

/// A named structural or inline-component node.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(TextRun),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<TextRun> for Node {
    fn from(value: TextRun) -> Self {
        Node::Text(value)
    }
}

/// The root container of a conversion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment {
    pub children: Vec<Node>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
