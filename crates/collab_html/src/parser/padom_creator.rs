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

use std::borrow::Cow;
use std::cell::{Ref, RefCell};

use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, QualName};

use super::{paqual_name, PaDom, PaDomHandle, PaDomNode, PaNodeText};

/// The arena built from one input plus every parse error html5ever
/// recovered from while building it.
#[derive(Clone, Debug)]
pub(crate) struct PaDomCreation {
    pub(crate) dom: PaDom,
    pub(crate) parse_errors: Vec<String>,
}

pub(crate) struct PaDomCreator {
    state: RefCell<PaDomCreation>,
}

impl PaDomCreator {
    /// Parse `html` as a fragment in a `<body>` context.
    pub fn parse(html: &str) -> PaDomCreation {
        parse_fragment(
            PaDomCreator::default(),
            Default::default(),
            paqual_name("body"),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }

    fn append_text_at(
        dom: &mut PaDom,
        parent: &PaDomHandle,
        index: usize,
        text: &str,
    ) {
        // html5ever may deliver one text node in several chunks.
        let previous = index
            .checked_sub(1)
            .and_then(|i| dom.children_of(parent).get(i).cloned());
        if let Some(previous) = previous {
            if let PaDomNode::Text(p) = dom.get_mut_node(&previous) {
                p.content.push_str(text);
                return;
            }
        }

        let new_handle = dom.add_node(PaDomNode::Text(PaNodeText {
            content: text.to_owned(),
        }));
        if let Some(children) = dom.children_mut(parent) {
            children.insert(index, new_handle);
        }
    }

    fn detach(dom: &mut PaDom, target: &PaDomHandle) {
        if let Some((parent, index)) = dom.parent_of(target) {
            if let Some(children) = dom.children_mut(&parent) {
                children.remove(index);
            }
        }
    }
}

impl Default for PaDomCreator {
    fn default() -> Self {
        Self {
            state: RefCell::new(PaDomCreation {
                dom: PaDom::new(),
                parse_errors: Vec::new(),
            }),
        }
    }
}

impl TreeSink for PaDomCreator {
    type Handle = PaDomHandle;
    type Output = PaDomCreation;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        self.state.into_inner()
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document_handle().clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| state.dom.get_node(target).name())
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle {
        self.state
            .borrow_mut()
            .dom
            .create_element(name, attrs, flags)
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(PaDomNode::Comment)
    }

    fn create_pi(
        &self,
        _target: StrTendril,
        _data: StrTendril,
    ) -> Self::Handle {
        self.state.borrow_mut().dom.add_node(PaDomNode::Comment)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let dom = &mut self.state.borrow_mut().dom;
        match child {
            NodeOrText::AppendNode(child) => match dom.children_mut(parent) {
                Some(children) => children.push(child),
                None => {
                    tracing::debug!(?parent, "dropping node appended to a leaf")
                }
            },
            NodeOrText::AppendText(tendril) => {
                let index = dom.children_of(parent).len();
                Self::append_text_at(dom, parent, index, tendril.as_ref());
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.state.borrow().dom.parent_of(element).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Doctypes carry nothing the tree can represent
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are treated as ordinary children
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        let Some((parent, index)) = dom.parent_of(sibling) else {
            tracing::debug!(?sibling, "sibling has no parent");
            return;
        };
        match new_node {
            NodeOrText::AppendNode(node) => {
                Self::detach(dom, &node);
                // Detaching may have shifted the sibling
                let index = dom
                    .children_of(&parent)
                    .iter()
                    .position(|c| c == sibling)
                    .unwrap_or(index);
                if let Some(children) = dom.children_mut(&parent) {
                    children.insert(index, node);
                }
            }
            NodeOrText::AppendText(tendril) => {
                Self::append_text_at(dom, &parent, index, tendril.as_ref());
            }
        }
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        if let PaDomNode::Container(node) = dom.get_mut_node(target) {
            for attr in attrs {
                let attr_name = attr.name.local.as_ref();
                if !node.has_attr(attr_name) {
                    let value = attr.value.as_ref().to_owned();
                    node.attrs.push((attr_name.to_owned(), value));
                }
            }
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        Self::detach(&mut self.state.borrow_mut().dom, target);
    }

    fn reparent_children(
        &self,
        node: &Self::Handle,
        new_parent: &Self::Handle,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        let moved = dom
            .children_mut(node)
            .map(std::mem::take)
            .unwrap_or_default();
        if let Some(children) = dom.children_mut(new_parent) {
            children.extend(moved);
        }
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err(String::from("declarative shadow roots are not supported"))
    }
}
