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

//! Inline formatting marks.
//!
//! A [`MarkSet`] is the set of marks applied uniformly to one text run.
//! Sets are immutable from the point of view of the importer: descending
//! into a nested mark element produces a new set via [`MarkSet::with`],
//! so sibling branches never observe each other's marks.

use std::collections::BTreeMap;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Attributes on a mark element that never become part of the mark value.
pub const PRESENTATIONAL_ATTRIBUTES: [&str; 3] = ["class", "style", "id"];

/// Attribute keys that lead a mark's attribute list on export, in order.
/// Any other key follows alphabetically.
const LEADING_MARK_ATTRIBUTES: [&str; 3] = ["href", "target", "rel"];

/// The fixed mark vocabulary.
///
/// Declaration order is the canonical export order: the first present
/// mark becomes the outermost wrapping tag.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Link,
}

/// The value carried by a mark: either a bare `true` or an object of
/// attributes (e.g. a link's `href`/`target`/`rel`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkValue {
    Flag,
    Attributes(BTreeMap<String, String>),
}

impl MarkValue {
    /// Build a mark value from the raw attributes of a mark element.
    ///
    /// Presentational attributes are dropped. If nothing remains the mark
    /// is a plain flag.
    pub fn from_html_attributes(attrs: &[(String, String)]) -> Self {
        let kept: BTreeMap<String, String> = attrs
            .iter()
            .filter(|(k, _)| !PRESENTATIONAL_ATTRIBUTES.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if kept.is_empty() {
            MarkValue::Flag
        } else {
            MarkValue::Attributes(kept)
        }
    }

    /// The attributes to render on the wrapping tag, `href`, `target` and
    /// `rel` first, everything else alphabetically.
    pub fn canonical_attributes(&self) -> Vec<(&str, &str)> {
        let MarkValue::Attributes(attrs) = self else {
            return Vec::new();
        };

        let mut ordered: Vec<(&str, &str)> = LEADING_MARK_ATTRIBUTES
            .iter()
            .filter_map(|key| attrs.get_key_value(*key))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        ordered.extend(
            attrs
                .iter()
                .filter(|(k, _)| !LEADING_MARK_ATTRIBUTES.contains(&k.as_str()))
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        ordered
    }
}

/// The marks active on a single text run, iterated in canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkSet(BTreeMap<MarkKind, MarkValue>);

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, kind: MarkKind) -> Option<&MarkValue> {
        self.0.get(&kind)
    }

    pub fn contains(&self, kind: MarkKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// Marks in canonical order.
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = (MarkKind, &MarkValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Return a new set with `kind` merged in. An existing value for the
    /// same mark is replaced; other marks are kept.
    pub fn with(&self, kind: MarkKind, value: MarkValue) -> MarkSet {
        let mut merged = self.0.clone();
        merged.insert(kind, value);
        MarkSet(merged)
    }
}

impl FromIterator<(MarkKind, MarkValue)> for MarkSet {
    fn from_iter<I: IntoIterator<Item = (MarkKind, MarkValue)>>(
        iter: I,
    ) -> Self {
        MarkSet(iter.into_iter().collect())
    }
}
