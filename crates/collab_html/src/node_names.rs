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

//! Static tables between HTML tags and the tree's semantic names.
//!
//! Tags missing from the tables pass through unchanged in both
//! directions, so custom nodes survive a round trip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::marks::MarkKind;

/// Semantic node names used by the shared tree.
pub mod node_name {
    pub const PARAGRAPH: &str = "paragraph";
    pub const HEADING: &str = "heading";
    pub const BULLET_LIST: &str = "bulletList";
    pub const ORDERED_LIST: &str = "orderedList";
    pub const LIST_ITEM: &str = "listItem";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const CODE_BLOCK: &str = "codeBlock";
    pub const HARD_BREAK: &str = "hardBreak";
    pub const HORIZONTAL_RULE: &str = "horizontalRule";
    pub const IMAGE: &str = "image";
    pub const EXTERNAL_IMAGE: &str = "externalImageNode";
    pub const MENTION_CHIP: &str = "mentionChip";
}

static HEADING_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^h([1-6])$")
        .unwrap_or_else(|e| panic!("bad heading regex: {e}"))
});

/// Semantic name for an HTML tag. Unknown tags are returned as-is.
pub fn semantic_name_for_tag(tag: &str) -> &str {
    if heading_level_for_tag(tag).is_some() {
        return node_name::HEADING;
    }
    match tag {
        "p" => node_name::PARAGRAPH,
        "ul" => node_name::BULLET_LIST,
        "ol" => node_name::ORDERED_LIST,
        "li" => node_name::LIST_ITEM,
        "blockquote" => node_name::BLOCKQUOTE,
        "pre" => node_name::CODE_BLOCK,
        "br" => node_name::HARD_BREAK,
        "hr" => node_name::HORIZONTAL_RULE,
        "img" => node_name::IMAGE,
        other => other,
    }
}

/// HTML tag for a semantic name. Unknown names are returned as-is.
///
/// Headings map to `h1` here; the heading level is applied by the
/// attribute mapper.
pub fn tag_for_semantic_name(name: &str) -> &str {
    match name {
        node_name::PARAGRAPH => "p",
        node_name::HEADING => "h1",
        node_name::BULLET_LIST => "ul",
        node_name::ORDERED_LIST => "ol",
        node_name::LIST_ITEM => "li",
        node_name::BLOCKQUOTE => "blockquote",
        node_name::CODE_BLOCK => "pre",
        node_name::HARD_BREAK => "br",
        node_name::HORIZONTAL_RULE => "hr",
        node_name::IMAGE | node_name::EXTERNAL_IMAGE => "img",
        node_name::MENTION_CHIP => "span",
        other => other,
    }
}

/// The level of an `h1`..`h6` tag.
pub fn heading_level_for_tag(tag: &str) -> Option<u8> {
    HEADING_TAG
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The mark introduced by an inline formatting tag, if it is one.
pub fn mark_for_tag(tag: &str) -> Option<MarkKind> {
    match tag {
        "strong" => Some(MarkKind::Bold),
        "em" => Some(MarkKind::Italic),
        "u" => Some(MarkKind::Underline),
        "strike" => Some(MarkKind::Strike),
        "code" => Some(MarkKind::Code),
        "a" => Some(MarkKind::Link),
        _ => None,
    }
}

/// The tag that wraps text carrying `mark`.
pub fn tag_for_mark(mark: MarkKind) -> &'static str {
    match mark {
        MarkKind::Bold => "strong",
        MarkKind::Italic => "em",
        MarkKind::Underline => "u",
        MarkKind::Strike => "strike",
        MarkKind::Code => "code",
        MarkKind::Link => "a",
    }
}

/// Document wrappers that are walked through without creating a node.
pub fn is_transparent_wrapper(tag: &str) -> bool {
    matches!(tag, "html" | "head" | "body")
}
