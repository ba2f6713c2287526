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

//! Typed view of mention chips.
//!
//! A chip's `componentProps` maps each entity kind to an id string, or to
//! `false` when the chip does not reference that kind.

use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::attributes::{COMPONENT_PROPS, MENTION_NAME};
use crate::error::AttributeTypeError;
use crate::model::{AttrValue, Element, Fragment, Node};
use crate::node_names::node_name;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum MentionKind {
    Actor,
    Event,
    Article,
    Tag,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mention {
    pub kind: MentionKind,
    pub id: String,
    pub name: Option<String>,
}

impl Mention {
    /// The mentions carried by one chip, in [`MentionKind`] order.
    ///
    /// A chip without `componentProps` yields nothing. A payload that is
    /// not a JSON object is an error.
    pub fn from_element(
        element: &Element,
    ) -> Result<Vec<Mention>, AttributeTypeError> {
        let Some(props) = element.attribute(COMPONENT_PROPS) else {
            return Ok(Vec::new());
        };
        let type_error = || AttributeTypeError {
            key: COMPONENT_PROPS.to_owned(),
            value: props.clone(),
        };

        let parsed;
        let object: &Map<String, Value> = match props {
            AttrValue::Json(Value::Object(object)) => object,
            AttrValue::String(raw) => {
                parsed = serde_json::from_str::<Value>(raw)
                    .map_err(|_| type_error())?;
                parsed.as_object().ok_or_else(type_error)?
            }
            _ => return Err(type_error()),
        };

        let name = element
            .attribute(MENTION_NAME)
            .map(AttrValue::to_attribute_string);
        let mentions = MentionKind::iter()
            .filter_map(|kind| match object.get(kind.as_ref()) {
                Some(Value::String(id)) => Some(Mention {
                    kind,
                    id: id.clone(),
                    name: name.clone(),
                }),
                _ => None,
            })
            .collect();
        Ok(mentions)
    }
}

/// Every mention in `fragment`, in document order.
///
/// Chips whose payload cannot be read are skipped.
pub fn collect_mentions(fragment: &Fragment) -> Vec<Mention> {
    let mut mentions = Vec::new();
    collect_from(&fragment.children, &mut mentions);
    mentions
}

fn collect_from(nodes: &[Node], mentions: &mut Vec<Mention>) {
    for element in nodes.iter().filter_map(Node::as_element) {
        if element.name == node_name::MENTION_CHIP {
            match Mention::from_element(element) {
                Ok(found) => mentions.extend(found),
                Err(e) => tracing::debug!(
                    error = %e,
                    "skipping unreadable mention chip"
                ),
            }
        } else {
            collect_from(&element.children, mentions);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    fn chip(props: AttrValue, name: &str) -> Element {
        Element::new(node_name::MENTION_CHIP)
            .with_attribute(COMPONENT_PROPS, props)
            .with_attribute(MENTION_NAME, name)
    }

    fn json_chip(props: Value, name: &str) -> Node {
        chip(AttrValue::Json(props), name).into()
    }

    #[test]
    fn single_entity_chip() {
        let element = chip(
            AttrValue::Json(json!({
                "actor": "a1",
                "event": false,
                "article": false,
                "tag": false
            })),
            "Ada",
        );
        assert_eq!(
            Mention::from_element(&element).unwrap(),
            vec![Mention {
                kind: MentionKind::Actor,
                id: "a1".to_owned(),
                name: Some("Ada".to_owned()),
            }]
        );
    }

    #[test]
    fn several_entities_come_out_in_kind_order() {
        let element =
            chip(AttrValue::Json(json!({"tag": "t", "event": "e"})), "x");
        let kinds: Vec<MentionKind> = Mention::from_element(&element)
            .unwrap()
            .into_iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(kinds, [MentionKind::Event, MentionKind::Tag]);
    }

    #[test]
    fn string_payload_is_parsed() {
        let element = chip(AttrValue::from(r#"{"article":"p9"}"#), "Post");
        let mentions = Mention::from_element(&element).unwrap();
        assert_eq!(mentions[0].kind, MentionKind::Article);
        assert_eq!(mentions[0].id, "p9");
    }

    #[test]
    fn non_object_payload_is_an_error() {
        let element = chip(AttrValue::Number(4.into()), "x");
        let err = Mention::from_element(&element).unwrap_err();
        assert_eq!(err.key, COMPONENT_PROPS);
        assert_eq!(err.value, AttrValue::Number(4.into()));
    }

    #[test]
    fn collects_across_the_tree_and_skips_bad_chips() {
        let list_item = Element::new(node_name::LIST_ITEM)
            .with_children(vec![json_chip(json!({"tag": "t1"}), "rust")]);
        let fragment = Fragment::with_children(vec![
            Element::new(node_name::PARAGRAPH)
                .with_children(vec![
                    json_chip(json!({"actor": "a1"}), "Ada"),
                    chip(AttrValue::from("not json"), "Bad").into(),
                ])
                .into(),
            Element::new(node_name::BULLET_LIST)
                .with_children(vec![list_item.into()])
                .into(),
        ]);
        let ids: Vec<String> = collect_mentions(&fragment)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["a1", "t1"]);
    }

    #[test]
    fn kinds_parse_from_their_payload_keys() {
        assert_eq!(
            MentionKind::from_str("article").unwrap(),
            MentionKind::Article
        );
        assert_eq!(MentionKind::Tag.to_string(), "tag");
    }
}
