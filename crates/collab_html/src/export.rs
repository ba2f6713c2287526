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

//! Document tree to HTML.

use crate::attributes::{export_attributes, ElementShape, MENTION_NAME};
use crate::escape::{escape_text, push_attribute};
use crate::model::{Element, Fragment, Node, TextRun};
use crate::node_names::{node_name, tag_for_mark};

/// Serialize the children of `fragment`.
pub fn export_html(fragment: &Fragment) -> String {
    export_nodes(&fragment.children)
}

/// Serialize `nodes` in order.
pub fn export_nodes(nodes: &[Node]) -> String {
    let mut html = String::new();
    for node in nodes {
        fmt_node(node, &mut html);
    }
    html
}

impl Fragment {
    pub fn to_html(&self) -> String {
        export_html(self)
    }
}

impl Element {
    /// Serialize this element, including its own tag.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        fmt_element(self, &mut html);
        html
    }
}

impl TextRun {
    /// The run's text, escaped and wrapped in its mark tags.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        fmt_text_run(self, &mut html);
        html
    }
}

fn fmt_node(node: &Node, html: &mut String) {
    match node {
        Node::Element(element) => fmt_element(element, html),
        Node::Text(run) => fmt_text_run(run, html),
    }
}

fn fmt_element(element: &Element, html: &mut String) {
    let resolved = export_attributes(element);

    html.push('<');
    html.push_str(&resolved.tag);
    for (key, value) in &resolved.attributes {
        push_attribute(html, key, value);
    }
    html.push('>');

    match resolved.shape {
        ElementShape::Void => {}
        ElementShape::Atom => {
            html.push_str("</");
            html.push_str(&resolved.tag);
            html.push('>');
        }
        ElementShape::Container => {
            for child in &element.children {
                fmt_node(child, html);
            }
            html.push_str("</");
            html.push_str(&resolved.tag);
            html.push('>');
        }
    }
}

/// The first mark in canonical order ends up outermost.
fn fmt_text_run(run: &TextRun, html: &mut String) {
    let mut wrapped = escape_text(&run.text).into_owned();
    for (kind, value) in run.marks.iter().rev() {
        let tag = tag_for_mark(kind);
        let mut open = String::from("<");
        open.push_str(tag);
        for (key, attr) in value.canonical_attributes() {
            push_attribute(&mut open, key, attr);
        }
        open.push('>');
        wrapped = format!("{open}{wrapped}</{tag}>");
    }
    html.push_str(&wrapped);
}

/// Render `fragment` as plain text.
///
/// Block elements end with a newline, hard breaks become newlines and
/// mention chips render their display name. Marks and images contribute
/// nothing beyond their text.
pub fn to_plain_text(fragment: &Fragment) -> String {
    let mut text = String::new();
    for node in &fragment.children {
        plain_text_node(node, &mut text);
    }
    text.truncate(text.trim_end_matches('\n').len());
    text
}

fn plain_text_node(node: &Node, text: &mut String) {
    let element = match node {
        Node::Text(run) => {
            text.push_str(&run.text);
            return;
        }
        Node::Element(element) => element,
    };

    match element.name.as_str() {
        node_name::HARD_BREAK | node_name::HORIZONTAL_RULE => text.push('\n'),
        node_name::IMAGE | node_name::EXTERNAL_IMAGE => {}
        node_name::MENTION_CHIP => {
            if let Some(name) = element.attribute(MENTION_NAME) {
                text.push_str(&name.to_attribute_string());
            }
        }
        name => {
            for child in &element.children {
                plain_text_node(child, text);
            }
            if is_text_block(name) && !text.ends_with('\n') {
                text.push('\n');
            }
        }
    }
}

fn is_text_block(name: &str) -> bool {
    matches!(
        name,
        node_name::PARAGRAPH
            | node_name::HEADING
            | node_name::LIST_ITEM
            | node_name::BLOCKQUOTE
            | node_name::CODE_BLOCK
    )
}
