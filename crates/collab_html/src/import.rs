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

//! HTML to document tree.
//!
//! The input is parsed by html5ever into a [`PaDom`], which is then
//! walked once in document order. Structural elements are appended to
//! the [`DocumentWriter`] before their children are visited. Inline mark
//! tags never become elements: their text is emitted as runs carrying
//! the union of every enclosing mark.

use crate::attributes::{import_attributes, DATA_COMPONENT_PROPS};
use crate::error::{HtmlParseError, ImportWarning};
use crate::marks::{MarkSet, MarkValue};
use crate::model::Fragment;
use crate::node_names::{
    is_transparent_wrapper, mark_for_tag, node_name, semantic_name_for_tag,
};
use crate::options::{ImportOptions, ParseMode};
use crate::parser::{
    PaDom, PaDomCreator, PaDomHandle, PaDomNode, PaNodeContainer,
};
use crate::writer::DocumentWriter;

/// What an import recovered from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    pub warnings: Vec<ImportWarning>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Parse `html` and append the resulting nodes to `writer`'s root, after
/// any children it already has.
///
/// Input that does not start with a tag is treated as the content of a
/// single paragraph. Malformed mention payloads are dropped and reported
/// in the returned [`ImportReport`]; only [`ParseMode::Strict`] makes the
/// import fail.
pub fn import_html<W>(
    html: &str,
    writer: &mut W,
    options: &ImportOptions,
) -> Result<ImportReport, HtmlParseError>
where
    W: DocumentWriter,
{
    let normalized = normalize(html);
    let creation = PaDomCreator::parse(&normalized);

    if !creation.parse_errors.is_empty() {
        match options.parse_mode {
            ParseMode::Strict => {
                return Err(HtmlParseError {
                    parse_errors: creation.parse_errors,
                })
            }
            ParseMode::Permissive => {
                for error in &creation.parse_errors {
                    tracing::debug!(%error, "tolerating html parse error");
                }
            }
        }
    }

    let mut importer = HtmlImporter {
        dom: &creation.dom,
        writer,
        warnings: Vec::new(),
    };
    importer.import();

    Ok(ImportReport {
        warnings: importer.warnings,
    })
}

impl Fragment {
    /// Import `html` into a new fragment with default options.
    pub fn from_html(html: &str) -> Result<Fragment, HtmlParseError> {
        let mut fragment = Fragment::new();
        import_html(html, &mut fragment, &ImportOptions::default())?;
        Ok(fragment)
    }
}

/// Bare text or inline content becomes a paragraph.
fn normalize(html: &str) -> std::borrow::Cow<'_, str> {
    if html.trim_start().starts_with('<') {
        html.into()
    } else {
        format!("<p>{html}</p>").into()
    }
}

struct HtmlImporter<'a, W: DocumentWriter> {
    dom: &'a PaDom,
    writer: &'a mut W,
    warnings: Vec<ImportWarning>,
}

impl<'a, W: DocumentWriter> HtmlImporter<'a, W> {
    fn import(&mut self) {
        let start = self
            .dom
            .find_container("body")
            .unwrap_or_else(|| self.dom.document_handle().clone());
        let root = self.writer.root();
        self.convert_children(&start, &root, true);
    }

    /// Convert the children of `source` into children of `parent`.
    /// `top_level` holds while `parent` is the conversion root.
    fn convert_children(
        &mut self,
        source: &PaDomHandle,
        parent: &W::Handle,
        top_level: bool,
    ) {
        let dom = self.dom;
        for child in dom.children_of(source) {
            match dom.get_node(child) {
                PaDomNode::Container(container) => {
                    if is_transparent_wrapper(container.tag()) {
                        self.convert_children(child, parent, top_level);
                    } else {
                        self.convert_container(child, container, parent);
                    }
                }
                PaDomNode::Text(text) => {
                    if top_level && text.content.trim().is_empty() {
                        continue;
                    }
                    self.writer
                        .append_text(parent, &text.content, &MarkSet::new());
                }
                PaDomNode::Document(_) => {
                    panic!("Found a document inside a document!")
                }
                PaDomNode::Comment => {}
            }
        }
    }

    fn convert_container(
        &mut self,
        handle: &PaDomHandle,
        container: &PaNodeContainer,
        parent: &W::Handle,
    ) {
        let tag = container.tag();
        if let Some(mark) = mark_for_tag(tag) {
            let marks = MarkSet::new()
                .with(mark, MarkValue::from_html_attributes(&container.attrs));
            self.convert_marked_children(handle, parent, &marks);
            return;
        }

        let is_chip =
            tag == "span" && container.has_attr(DATA_COMPONENT_PROPS);
        let name = if is_chip {
            node_name::MENTION_CHIP
        } else {
            semantic_name_for_tag(tag)
        };
        let attributes =
            import_attributes(tag, name, &container.attrs, &mut self.warnings);
        let element = self.writer.append_element(parent, name, &attributes);
        self.convert_children(handle, &element, false);
    }

    /// Emit the text under a mark element with `marks` active.
    fn convert_marked_children(
        &mut self,
        source: &PaDomHandle,
        parent: &W::Handle,
        marks: &MarkSet,
    ) {
        let dom = self.dom;
        for child in dom.children_of(source) {
            match dom.get_node(child) {
                PaDomNode::Text(text) => {
                    if !text.content.is_empty() {
                        self.writer.append_text(parent, &text.content, marks);
                    }
                }
                PaDomNode::Container(container) => {
                    let Some(mark) = mark_for_tag(container.tag()) else {
                        // Structural content inside a mark loses the mark.
                        self.convert_container(child, container, parent);
                        continue;
                    };
                    let value =
                        MarkValue::from_html_attributes(&container.attrs);
                    let nested = marks.with(mark, value);
                    self.convert_marked_children(child, parent, &nested);
                }
                PaDomNode::Document(_) => {
                    panic!("Found a document inside a document!")
                }
                PaDomNode::Comment => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::marks::MarkKind;
    use crate::model::{AttrValue, Element, Node, TextRun};

    fn import(html: &str) -> Fragment {
        Fragment::from_html(html).unwrap()
    }

    fn flag(kinds: &[MarkKind]) -> MarkSet {
        kinds.iter().map(|k| (*k, MarkValue::Flag)).collect()
    }

    fn paragraph(children: Vec<Node>) -> Node {
        Element::new(node_name::PARAGRAPH)
            .with_children(children)
            .into()
    }

    #[test]
    fn plain_paragraph() {
        assert_eq!(
            import("<p>Hello world</p>").children,
            vec![paragraph(vec![TextRun::plain("Hello world").into()])]
        );
    }

    #[test]
    fn bare_text_is_wrapped_in_a_paragraph() {
        assert_eq!(
            import("just text").children,
            vec![paragraph(vec![TextRun::plain("just text").into()])]
        );
    }

    #[test]
    fn bare_text_with_inline_marks_is_wrapped_too() {
        assert_eq!(
            import("a <em>b</em>").children,
            vec![paragraph(vec![
                TextRun::plain("a ").into(),
                TextRun::new("b", flag(&[MarkKind::Italic])).into(),
            ])]
        );
    }

    #[test]
    fn empty_input_gives_an_empty_paragraph() {
        assert_eq!(import("").children, vec![paragraph(vec![])]);
    }

    #[test]
    fn marks_split_text_into_runs() {
        assert_eq!(
            import("<p>This is <strong>bold</strong> text</p>").children,
            vec![paragraph(vec![
                TextRun::plain("This is ").into(),
                TextRun::new("bold", flag(&[MarkKind::Bold])).into(),
                TextRun::plain(" text").into(),
            ])]
        );
    }

    #[test]
    fn nested_marks_compose() {
        let expected = vec![paragraph(vec![TextRun::new(
            "x",
            flag(&[MarkKind::Bold, MarkKind::Italic]),
        )
        .into()])];
        let nested = import("<p><strong><em>x</em></strong></p>");
        assert_eq!(nested.children, expected);
        let reversed = import("<p><em><strong>x</strong></em></p>");
        assert_eq!(reversed.children, expected);
    }

    #[test]
    fn sibling_mark_branches_do_not_share_marks() {
        let bold_italic = flag(&[MarkKind::Bold, MarkKind::Italic]);
        let bold_underline = flag(&[MarkKind::Bold, MarkKind::Underline]);
        assert_eq!(
            import("<p><strong><em>a</em><u>b</u>c</strong></p>").children,
            vec![paragraph(vec![
                TextRun::new("a", bold_italic).into(),
                TextRun::new("b", bold_underline).into(),
                TextRun::new("c", flag(&[MarkKind::Bold])).into(),
            ])]
        );
    }

    #[test]
    fn inner_mark_of_the_same_kind_replaces_the_outer_value() {
        let fragment = import(
            r#"<p><code data-lang="a"><code data-lang="b">x</code></code></p>"#,
        );
        let p = fragment.children[0].as_element().unwrap();
        let marks = &p.children[0].as_text().unwrap().marks;
        let Some(MarkValue::Attributes(attrs)) = marks.get(MarkKind::Code)
        else {
            panic!("expected code attributes, got {marks:?}");
        };
        assert_eq!(attrs["data-lang"], "b");
        assert_eq!(marks.len(), 1);
    }

    #[test]
    fn link_mark_keeps_its_attributes() {
        let fragment = import(
            concat!(
                r#"<p><a href="https://example.com" target="_blank" "#,
                r#"rel="noopener" class="x">example</a></p>"#,
            ),
        );
        let p = fragment.children[0].as_element().unwrap();
        let run = p.children[0].as_text().unwrap();
        let Some(MarkValue::Attributes(attrs)) = run.marks.get(MarkKind::Link)
        else {
            panic!("expected link attributes");
        };
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs["href"], "https://example.com");
        assert_eq!(attrs["target"], "_blank");
        assert_eq!(attrs["rel"], "noopener");
    }

    #[test]
    fn presentational_attributes_collapse_to_a_flag() {
        let fragment = import(
            concat!(
                r#"<p><strong class="bold-class" style="font-weight: 900" "#,
                r#"id="bold-1">bold</strong></p>"#,
            ),
        );
        assert_eq!(
            fragment.children,
            vec![paragraph(vec![
                TextRun::new("bold", flag(&[MarkKind::Bold])).into()
            ])]
        );
    }

    #[test]
    fn empty_marks_produce_no_runs() {
        assert_eq!(
            import("<p>Text with <strong></strong> empty mark</p>").children,
            vec![paragraph(vec![
                TextRun::plain("Text with ").into(),
                TextRun::plain(" empty mark").into(),
            ])]
        );
    }

    #[test]
    fn structural_element_inside_a_mark_loses_the_mark() {
        let fragment = import("<p><strong>a<span>b</span></strong></p>");
        assert_eq!(
            fragment.children,
            vec![paragraph(vec![
                TextRun::new("a", flag(&[MarkKind::Bold])).into(),
                Element::new("span")
                    .with_children(vec![TextRun::plain("b").into()])
                    .into(),
            ])]
        );
    }

    #[test]
    fn top_level_whitespace_is_dropped_but_inner_whitespace_kept() {
        let fragment = import("<p>a</p>\n  <p> </p>\n");
        assert_eq!(
            fragment.children,
            vec![
                paragraph(vec![TextRun::plain("a").into()]),
                paragraph(vec![TextRun::plain(" ").into()]),
            ]
        );
    }

    #[test]
    fn document_wrappers_are_transparent() {
        assert_eq!(
            import("<html><head></head><body><p>x</p></body></html>").children,
            vec![paragraph(vec![TextRun::plain("x").into()])]
        );
    }

    #[test]
    fn headings_record_their_level() {
        let fragment = import("<h2>Heading 2</h2>");
        assert_eq!(
            fragment.children,
            vec![Node::from(
                Element::new(node_name::HEADING)
                    .with_attribute("level", "2")
                    .with_children(vec![TextRun::plain("Heading 2").into()])
            )]
        );
    }

    #[test]
    fn lists_and_blocks_map_to_semantic_names() {
        let fragment = import(
            concat!(
                "<ul><li><p>a</p></li></ul><ol><li>b</li></ol>",
                "<blockquote>c</blockquote><pre><code>d</code></pre><hr>",
            ),
        );
        let names: Vec<&str> = fragment
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                node_name::BULLET_LIST,
                node_name::ORDERED_LIST,
                node_name::BLOCKQUOTE,
                node_name::CODE_BLOCK,
                node_name::HORIZONTAL_RULE,
            ]
        );
        let code_block = fragment.children[3].as_element().unwrap();
        assert_eq!(
            code_block.children,
            vec![Node::from(TextRun::new("d", flag(&[MarkKind::Code])))]
        );
    }

    #[test]
    fn mention_chip_is_recognised_by_its_payload() {
        let fragment = import(
            concat!(
                r#"<p><span data-component-props="#,
                r#""{&quot;actor&quot;:&quot;a1&quot;}" "#,
                r#"data-type="actor" data-name="Ada"></span></p>"#,
            ),
        );
        let p = fragment.children[0].as_element().unwrap();
        assert_eq!(
            p.children,
            vec![Node::from(
                Element::new(node_name::MENTION_CHIP)
                    .with_attribute(
                        "componentProps",
                        AttrValue::Json(json!({"actor": "a1"})),
                    )
                    .with_attribute("name", "Ada")
                    .with_attribute("type", "actor")
            )]
        );
    }

    #[test]
    fn span_without_payload_stays_a_span() {
        let fragment = import(r#"<p><span data-name="x">y</span></p>"#);
        let span = fragment.children[0].as_element().unwrap().children[0]
            .as_element()
            .unwrap();
        assert_eq!(span.name, "span");
        assert_eq!(span.attribute("data-name"), Some(&AttrValue::from("x")));
    }

    #[test]
    fn malformed_payload_is_reported_and_import_continues() {
        let mut fragment = Fragment::new();
        let report = import_html(
            concat!(
                r#"<p><span data-component-props="{nope" "#,
                r#"data-name="Ada"></span>after</p>"#,
            ),
            &mut fragment,
            &ImportOptions::default(),
        )
        .unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.is_clean());
        let p = fragment.children[0].as_element().unwrap();
        let chip = p.children[0].as_element().unwrap();
        assert_eq!(chip.name, node_name::MENTION_CHIP);
        assert!(chip.attribute("componentProps").is_none());
        assert_eq!(p.children[1], Node::from(TextRun::plain("after")));
    }

    #[test]
    fn unknown_tags_pass_through() {
        let fragment = import(r#"<custom-node data-x="1">hi</custom-node>"#);
        assert_eq!(
            fragment.children,
            vec![Node::from(
                Element::new("custom-node")
                    .with_attribute("data-x", AttrValue::Number(1.into()))
                    .with_children(vec![TextRun::plain("hi").into()])
            )]
        );
    }

    #[test]
    fn import_appends_after_existing_children() {
        let mut fragment = import("<p>one</p>");
        let options = ImportOptions::default();
        import_html("<p>two</p>", &mut fragment, &options).unwrap();
        assert_eq!(fragment.children.len(), 2);
    }

    #[test]
    fn strict_mode_rejects_parse_errors() {
        let mut fragment = Fragment::new();
        let options = ImportOptions::strict();
        let err = import_html("<p>a</div></p>", &mut fragment, &options)
            .unwrap_err();
        assert!(!err.parse_errors.is_empty());
        assert!(fragment.is_empty());
    }

    #[test]
    fn permissive_mode_recovers_from_parse_errors() {
        assert_eq!(
            import("<p>a</div></p>").children,
            vec![paragraph(vec![TextRun::plain("a").into()])]
        );
    }

    #[test]
    fn strict_mode_accepts_well_formed_input() {
        let mut fragment = Fragment::new();
        let options = ImportOptions::strict();
        let html = "<p>a <em>b</em></p>";
        let report = import_html(html, &mut fragment, &options).unwrap();
        assert!(report.is_clean());
        assert_eq!(fragment.children.len(), 1);
    }
}
