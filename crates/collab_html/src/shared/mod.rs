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

//! The yrs backend.
//!
//! Elements are stored as [`XmlElementRef`]s named by their semantic
//! name. XML attributes hold text, so each attribute is stored as its
//! HTML attribute string and re-typed when the tree is projected. Every
//! text run is its own [`XmlTextRef`] whose content carries the run's
//! marks as formatting attributes.
//!
//! Import writes through a [`TransactionMut`] owned by the caller, so a
//! whole import is applied to the shared document as one change.

mod convert;

use yrs::types::text::YChange;
use yrs::{
    Doc, Out, ReadTxn, Text, Transact, TransactionMut, Xml, XmlElementPrelim,
    XmlElementRef, XmlFragment, XmlFragmentRef, XmlOut, XmlTextPrelim,
    XmlTextRef,
};

use crate::attributes::attribute_from_text;
use crate::error::HtmlParseError;
use crate::export::export_html;
use crate::import::{import_html, ImportReport};
use crate::marks::MarkSet;
use crate::model::{Attributes, Element, Fragment, Node, TextRun};
use crate::options::ImportOptions;
use crate::writer::DocumentWriter;

use convert::{attrs_to_marks, marks_to_attrs};

/// A shared node that can hold children.
#[derive(Clone, Debug)]
pub enum SharedParent {
    Fragment(XmlFragmentRef),
    Element(XmlElementRef),
}

impl From<XmlFragmentRef> for SharedParent {
    fn from(fragment: XmlFragmentRef) -> Self {
        SharedParent::Fragment(fragment)
    }
}

impl From<XmlElementRef> for SharedParent {
    fn from(element: XmlElementRef) -> Self {
        SharedParent::Element(element)
    }
}

impl SharedParent {
    fn push_element(
        &self,
        txn: &mut TransactionMut,
        name: &str,
    ) -> XmlElementRef {
        let prelim = XmlElementPrelim::empty(name);
        match self {
            SharedParent::Fragment(f) => f.push_back(txn, prelim),
            SharedParent::Element(e) => e.push_back(txn, prelim),
        }
    }

    fn push_text(&self, txn: &mut TransactionMut) -> XmlTextRef {
        let prelim = XmlTextPrelim::new("");
        match self {
            SharedParent::Fragment(f) => f.push_back(txn, prelim),
            SharedParent::Element(e) => e.push_back(txn, prelim),
        }
    }

    fn children<T: ReadTxn>(&self, txn: &T) -> Vec<XmlOut> {
        match self {
            SharedParent::Fragment(f) => f.children(txn).collect(),
            SharedParent::Element(e) => e.children(txn).collect(),
        }
    }
}

/// A [`DocumentWriter`] appending to a yrs XML tree inside one
/// transaction.
pub struct SharedWriter<'t, 'doc> {
    txn: &'t mut TransactionMut<'doc>,
    root: SharedParent,
}

impl<'t, 'doc> SharedWriter<'t, 'doc> {
    pub fn new(
        txn: &'t mut TransactionMut<'doc>,
        root: impl Into<SharedParent>,
    ) -> Self {
        Self {
            txn,
            root: root.into(),
        }
    }
}

impl DocumentWriter for SharedWriter<'_, '_> {
    type Handle = SharedParent;

    fn root(&self) -> Self::Handle {
        self.root.clone()
    }

    fn append_element(
        &mut self,
        parent: &Self::Handle,
        name: &str,
        attributes: &Attributes,
    ) -> Self::Handle {
        // Attached first: attributes and children address the element
        // through its shared identity.
        let element = parent.push_element(self.txn, name);
        for (key, value) in attributes {
            element.insert_attribute(
                self.txn,
                key.as_str(),
                value.to_attribute_string(),
            );
        }
        SharedParent::Element(element)
    }

    fn append_text(
        &mut self,
        parent: &Self::Handle,
        text: &str,
        marks: &MarkSet,
    ) {
        let node = parent.push_text(self.txn);
        if text.is_empty() {
            return;
        }
        if marks.is_empty() {
            node.insert(self.txn, 0, text);
        } else {
            let attrs = marks_to_attrs(marks);
            node.insert_with_attributes(self.txn, 0, text, attrs);
        }
    }
}

/// Import `html` under `root` within the caller's transaction.
pub fn import_html_into(
    txn: &mut TransactionMut,
    root: impl Into<SharedParent>,
    html: &str,
    options: &ImportOptions,
) -> Result<ImportReport, HtmlParseError> {
    let mut writer = SharedWriter::new(txn, root);
    import_html(html, &mut writer, options)
}

/// Import `html` under `root` in a single new transaction on `doc`.
pub fn import_html_into_doc(
    doc: &Doc,
    root: impl Into<SharedParent>,
    html: &str,
    options: &ImportOptions,
) -> Result<ImportReport, HtmlParseError> {
    let mut txn = doc.transact_mut();
    import_html_into(&mut txn, root, html, options)
}

/// Read the children of `root` into a [`Fragment`].
pub fn project<T: ReadTxn>(txn: &T, root: &SharedParent) -> Fragment {
    Fragment::with_children(project_children(txn, root))
}

/// Serialize the children of `root`.
pub fn export_html_from<T: ReadTxn>(txn: &T, root: &SharedParent) -> String {
    export_html(&project(txn, root))
}

fn project_children<T: ReadTxn>(txn: &T, parent: &SharedParent) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in parent.children(txn) {
        match child {
            XmlOut::Element(element) => {
                nodes.push(Node::Element(project_element(txn, element)));
            }
            XmlOut::Text(text) => project_text(txn, &text, &mut nodes),
            XmlOut::Fragment(fragment) => {
                let parent = SharedParent::Fragment(fragment);
                nodes.extend(project_children(txn, &parent));
            }
        }
    }
    nodes
}

fn project_element<T: ReadTxn>(txn: &T, element: XmlElementRef) -> Element {
    let mut projected = Element::new(element.tag().to_string());
    for (key, text) in element.attributes(txn) {
        let value = attribute_from_text(&projected.name, key, &text);
        projected.attributes.insert(key.to_owned(), value);
    }
    projected.children =
        project_children(txn, &SharedParent::Element(element));
    projected
}

/// One run per formatting segment of `text`.
fn project_text<T: ReadTxn>(txn: &T, text: &XmlTextRef, nodes: &mut Vec<Node>) {
    for diff in text.diff(txn, YChange::identity) {
        let Out::Any(yrs::Any::String(chunk)) = &diff.insert else {
            tracing::trace!("ignoring embedded value in text");
            continue;
        };
        let marks = diff
            .attributes
            .as_deref()
            .map(attrs_to_marks)
            .unwrap_or_default();
        nodes.push(Node::Text(TextRun::new(chunk.to_string(), marks)));
    }
}
