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

//! Conversions between mark sets and yrs formatting attributes.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Number, Value};
use yrs::types::Attrs;
use yrs::Any;

use crate::marks::{MarkKind, MarkSet, MarkValue};

/// Largest integer an f64 holds exactly.
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Formatting attributes for a text run.
pub(crate) fn marks_to_attrs(marks: &MarkSet) -> Attrs {
    marks
        .iter()
        .map(|(kind, value)| {
            let any = match value {
                MarkValue::Flag => Any::Bool(true),
                MarkValue::Attributes(attrs) => Any::Map(Arc::new(
                    attrs
                        .iter()
                        .map(|(k, v)| {
                            (k.clone(), Any::String(v.as_str().into()))
                        })
                        .collect::<HashMap<String, Any>>(),
                )),
            };
            (Arc::from(kind.as_ref()), any)
        })
        .collect()
}

/// Read formatting attributes back into a mark set. Keys outside the mark
/// vocabulary and `null`/`false` values are ignored.
pub(crate) fn attrs_to_marks(attrs: &Attrs) -> MarkSet {
    attrs
        .iter()
        .filter_map(|(key, value)| {
            let Ok(kind) = MarkKind::from_str(key) else {
                tracing::trace!(%key, "ignoring foreign formatting attribute");
                return None;
            };
            match value {
                Any::Null | Any::Undefined | Any::Bool(false) => None,
                Any::Map(map) => {
                    let attrs = map
                        .iter()
                        .map(|(k, v)| (k.clone(), mark_attribute_text(v)))
                        .collect();
                    Some((kind, MarkValue::Attributes(attrs)))
                }
                _ => Some((kind, MarkValue::Flag)),
            }
        })
        .collect()
}

/// Mark attributes written by other clients may hold any value; they are
/// read as the text an HTML attribute would carry.
fn mark_attribute_text(value: &Any) -> String {
    match value {
        Any::String(s) => s.to_string(),
        other => any_to_json(other).to_string(),
    }
}

fn any_to_json(any: &Any) -> Value {
    match any {
        Any::Null | Any::Undefined => Value::Null,
        Any::Bool(b) => Value::Bool(*b),
        Any::Number(n) => f64_to_json(*n),
        Any::BigInt(i) => Value::from(*i),
        Any::String(s) => Value::String(s.to_string()),
        Any::Buffer(bytes) => {
            Value::Array(bytes.iter().map(|b| Value::from(*b)).collect())
        }
        Any::Array(items) => {
            Value::Array(items.iter().map(any_to_json).collect())
        }
        Any::Map(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), any_to_json(v)))
                .collect(),
        ),
    }
}

/// Integral values come back as integers: `3.0` reads as `3`.
fn f64_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn map(pairs: Vec<(&str, Any)>) -> Any {
        Any::Map(Arc::new(
            pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        ))
    }

    #[test]
    fn mark_sets_map_to_formatting_attributes() {
        let link: BTreeMap<String, String> =
            [("href".to_owned(), "https://x".to_owned())]
                .into_iter()
                .collect();
        let marks = MarkSet::new()
            .with(MarkKind::Bold, MarkValue::Flag)
            .with(MarkKind::Link, MarkValue::Attributes(link));
        let attrs = marks_to_attrs(&marks);
        assert_eq!(attrs.get("bold"), Some(&Any::Bool(true)));
        assert!(matches!(attrs.get("link"), Some(Any::Map(_))));
        assert_eq!(attrs_to_marks(&attrs), marks);
    }

    #[test]
    fn foreign_and_cleared_formatting_is_ignored() {
        let attrs: Attrs = [
            (Arc::from("color"), Any::String("red".into())),
            (Arc::from("italic"), Any::Bool(false)),
            (Arc::from("strike"), Any::Null),
            (Arc::from("code"), Any::Bool(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            attrs_to_marks(&attrs),
            MarkSet::new().with(MarkKind::Code, MarkValue::Flag)
        );
    }

    #[test]
    fn non_string_mark_attributes_read_as_text() {
        let attrs: Attrs = [(
            Arc::from("link"),
            map(vec![
                ("href", Any::String("https://x".into())),
                ("data-width", Any::Number(3.0)),
                ("data-ratio", Any::Number(1.5)),
                ("data-id", Any::BigInt(9_007_199_254_740_993)),
                ("data-open", Any::Bool(true)),
                ("data-tags", Any::Array(vec![Any::Number(1.0)].into())),
            ]),
        )]
        .into_iter()
        .collect();

        let marks = attrs_to_marks(&attrs);
        let Some(MarkValue::Attributes(link)) = marks.get(MarkKind::Link)
        else {
            panic!("expected link attributes, got {marks:?}");
        };
        assert_eq!(link["href"], "https://x");
        assert_eq!(link["data-width"], "3");
        assert_eq!(link["data-ratio"], "1.5");
        assert_eq!(link["data-id"], "9007199254740993");
        assert_eq!(link["data-open"], "true");
        assert_eq!(link["data-tags"], "[1]");
    }
}
