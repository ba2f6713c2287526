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

//! Attribute Mapper: per-node rules translating between raw HTML
//! attributes and element attributes.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::ImportWarning;
use crate::model::{AttrValue, Attributes, Element};
use crate::node_names::{
    heading_level_for_tag, node_name, tag_for_semantic_name,
};

pub const LEVEL: &str = "level";
pub const COMPONENT_PROPS: &str = "componentProps";
pub const SRC: &str = "src";
pub const ALT: &str = "alt";
pub const HREF: &str = "href";
pub const MENTION_NAME: &str = "name";
pub const MENTION_TYPE: &str = "type";

pub const DATA_COMPONENT_PROPS: &str = "data-component-props";
pub const DATA_NAME: &str = "data-name";
pub const DATA_TYPE: &str = "data-type";

/// Keys handled by a dedicated rule and never emitted as generic
/// attributes.
const RESERVED_KEYS: [&str; 4] = [LEVEL, COMPONENT_PROPS, SRC, ALT];

/// Build the attribute map for an element created from tag `tag` with
/// semantic name `name`.
pub fn import_attributes(
    tag: &str,
    name: &str,
    raw: &[(String, String)],
    warnings: &mut Vec<ImportWarning>,
) -> Attributes {
    let mut attributes = Attributes::new();

    match name {
        node_name::IMAGE => {
            for (key, value) in raw {
                if key == SRC || key == ALT {
                    attributes
                        .insert(key.clone(), AttrValue::from(value.as_str()));
                }
            }
        }
        node_name::MENTION_CHIP => {
            for (key, value) in raw {
                match key.as_str() {
                    DATA_NAME => {
                        attributes.insert(
                            MENTION_NAME.to_owned(),
                            value.as_str().into(),
                        );
                    }
                    DATA_TYPE => {
                        attributes.insert(
                            MENTION_TYPE.to_owned(),
                            value.as_str().into(),
                        );
                    }
                    DATA_COMPONENT_PROPS => {
                        match serde_json::from_str::<Value>(value) {
                            Ok(props) => {
                                attributes.insert(
                                    COMPONENT_PROPS.to_owned(),
                                    props.into(),
                                );
                            }
                            Err(e) => {
                                tracing::warn!(
                                    value = %value,
                                    error = %e,
                                    "dropping malformed data-component-props"
                                );
                                warnings.push(
                                    ImportWarning::MalformedComponentProps {
                                        value: value.clone(),
                                        reason: e.to_string(),
                                    },
                                );
                            }
                        }
                    }
                    _ => {
                        attributes.insert(key.clone(), AttrValue::infer(value));
                    }
                }
            }
        }
        _ if tag == "a" => {
            for (key, value) in raw {
                if key == HREF {
                    attributes
                        .insert(key.clone(), AttrValue::from(value.as_str()));
                }
            }
        }
        _ => {
            for (key, value) in raw {
                if key == DATA_COMPONENT_PROPS
                    && serde_json::from_str::<Value>(value).is_err()
                {
                    tracing::debug!(
                        %tag,
                        value = %value,
                        "keeping malformed data-component-props as text"
                    );
                }
                attributes.insert(key.clone(), AttrValue::infer(value));
            }
        }
    }

    if name == node_name::HEADING {
        if let Some(level) = heading_level_for_tag(tag) {
            attributes
                .insert(LEVEL.to_owned(), AttrValue::String(level.to_string()));
        }
    }

    attributes
}

/// Re-type an attribute stored as text, the way [`import_attributes`]
/// types it for an element named `name`.
///
/// Text produced by [`AttrValue::to_attribute_string`] for a value typed
/// on import comes back as the same value.
pub fn attribute_from_text(name: &str, key: &str, text: &str) -> AttrValue {
    match (name, key) {
        (node_name::MENTION_CHIP, COMPONENT_PROPS) => {
            serde_json::from_str::<Value>(text)
                .map(AttrValue::from)
                .unwrap_or_else(|_| AttrValue::from(text))
        }
        (node_name::MENTION_CHIP, MENTION_NAME | MENTION_TYPE)
        | (node_name::HEADING, LEVEL)
        | (node_name::IMAGE | node_name::EXTERNAL_IMAGE, SRC | ALT)
        | ("a", HREF) => AttrValue::from(text),
        _ => AttrValue::infer(text),
    }
}

/// How an element's tag is closed on export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementShape {
    /// `<tag …>children</tag>`
    Container,
    /// `<tag …>` with no closing tag and no children.
    Void,
    /// `<tag …></tag>`: children are never serialized.
    Atom,
}

/// The HTML form of an element, with attribute values not yet escaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlElement<'a> {
    pub tag: Cow<'a, str>,
    pub attributes: Vec<(Cow<'a, str>, String)>,
    pub shape: ElementShape,
}

/// Resolve the output tag, attributes and shape of `element`.
pub fn export_attributes(element: &Element) -> HtmlElement<'_> {
    let name = element.name.as_str();
    match name {
        node_name::HEADING => HtmlElement {
            tag: Cow::Owned(format!("h{}", heading_level(element))),
            attributes: generic_attributes(element),
            shape: ElementShape::Container,
        },
        node_name::MENTION_CHIP => {
            let mut attributes = Vec::new();
            if let Some(props) = element.attribute(COMPONENT_PROPS) {
                attributes.push((
                    Cow::Borrowed(DATA_COMPONENT_PROPS),
                    props.to_attribute_string(),
                ));
            }
            if let Some(kind) = element.attribute(MENTION_TYPE) {
                attributes.push((
                    Cow::Borrowed(DATA_TYPE),
                    kind.to_attribute_string(),
                ));
            }
            if let Some(label) = element.attribute(MENTION_NAME) {
                attributes.push((
                    Cow::Borrowed(DATA_NAME),
                    label.to_attribute_string(),
                ));
            }
            HtmlElement {
                tag: Cow::Borrowed("span"),
                attributes,
                shape: ElementShape::Atom,
            }
        }
        node_name::IMAGE | node_name::EXTERNAL_IMAGE => {
            let attributes = [SRC, ALT]
                .into_iter()
                .map(|key| {
                    let value = element
                        .attribute(key)
                        .map(AttrValue::to_attribute_string)
                        .unwrap_or_default();
                    (Cow::Borrowed(key), value)
                })
                .collect();
            HtmlElement {
                tag: Cow::Borrowed("img"),
                attributes,
                shape: ElementShape::Void,
            }
        }
        node_name::HARD_BREAK | node_name::HORIZONTAL_RULE => HtmlElement {
            tag: Cow::Borrowed(tag_for_semantic_name(name)),
            attributes: Vec::new(),
            shape: ElementShape::Void,
        },
        _ => HtmlElement {
            tag: Cow::Borrowed(tag_for_semantic_name(name)),
            attributes: generic_attributes(element),
            shape: ElementShape::Container,
        },
    }
}

/// The heading level in `1..=6`, falling back to 1.
fn heading_level(element: &Element) -> u8 {
    let level = element.attribute(LEVEL).and_then(|value| match value {
        AttrValue::String(s) => s.parse::<u8>().ok(),
        AttrValue::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        _ => None,
    });
    match level {
        Some(level @ 1..=6) => level,
        None if element.attribute(LEVEL).is_none() => 1,
        _ => {
            tracing::debug!(
                level = ?element.attribute(LEVEL),
                "heading level out of range"
            );
            1
        }
    }
}

fn generic_attributes(element: &Element) -> Vec<(Cow<'_, str>, String)> {
    element
        .attributes
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            (Cow::Borrowed(key.as_str()), value.to_attribute_string())
        })
        .collect()
}
