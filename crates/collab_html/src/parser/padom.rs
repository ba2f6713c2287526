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

use html5ever::tree_builder::ElementFlags;
use html5ever::{Attribute, QualName};

use super::{paqual_name, PaDomHandle, PaNodeContainer, PaNodeText};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PaDomNode {
    Document(PaNodeContainer),
    Container(PaNodeContainer),
    Text(PaNodeText),
    /// Comments and processing instructions. Kept so html5ever has a
    /// handle to hold, never converted.
    Comment,
}

impl PaDomNode {
    pub(crate) fn name(&self) -> &QualName {
        match self {
            PaDomNode::Document(c) | PaDomNode::Container(c) => &c.name,
            PaDomNode::Text(_) | PaDomNode::Comment => {
                panic!("Only elements have names! {:?}", self)
            }
        }
    }

    fn children(&self) -> Option<&Vec<PaDomHandle>> {
        match self {
            PaDomNode::Document(c) | PaDomNode::Container(c) => {
                Some(&c.children)
            }
            PaDomNode::Text(_) | PaDomNode::Comment => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<PaDomHandle>> {
        match self {
            PaDomNode::Document(c) | PaDomNode::Container(c) => {
                Some(&mut c.children)
            }
            PaDomNode::Text(_) | PaDomNode::Comment => None,
        }
    }
}

/// Arena of parsed nodes.
///
/// Nodes detached during tree construction stay in the arena but are
/// unreachable from the document, so walks never see them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaDom {
    nodes: Vec<PaDomNode>,
    document_handle: PaDomHandle,
}

impl PaDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![PaDomNode::Document(PaNodeContainer {
                name: paqual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            })],
            document_handle: PaDomHandle(0),
        }
    }

    pub(crate) fn document_handle(&self) -> &PaDomHandle {
        &self.document_handle
    }

    pub(crate) fn add_node(&mut self, node: PaDomNode) -> PaDomHandle {
        self.nodes.push(node);
        PaDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn get_node(&self, handle: &PaDomHandle) -> &PaDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(
        &mut self,
        handle: &PaDomHandle,
    ) -> &mut PaDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> PaDomHandle {
        self.add_node(PaDomNode::Container(PaNodeContainer {
            name,
            attrs: attrs
                .into_iter()
                .map(|a| {
                    let key = a.name.local.as_ref().to_owned();
                    (key, a.value.as_ref().to_owned())
                })
                .collect(),
            children: Vec::new(),
        }))
    }

    pub(crate) fn children_of(&self, handle: &PaDomHandle) -> &[PaDomHandle] {
        self.get_node(handle)
            .children()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn children_mut(
        &mut self,
        handle: &PaDomHandle,
    ) -> Option<&mut Vec<PaDomHandle>> {
        self.get_mut_node(handle).children_mut()
    }

    /// The container holding `child`, with the child's index in it.
    pub(crate) fn parent_of(
        &self,
        child: &PaDomHandle,
    ) -> Option<(PaDomHandle, usize)> {
        self.nodes.iter().enumerate().find_map(|(i, node)| {
            node.children()
                .and_then(|children| children.iter().position(|c| c == child))
                .map(|pos| (PaDomHandle(i), pos))
        })
    }

    /// First container named `local_name` reachable from the document, in
    /// document order.
    pub(crate) fn find_container(
        &self,
        local_name: &str,
    ) -> Option<PaDomHandle> {
        let mut stack = vec![self.document_handle.clone()];
        while let Some(handle) = stack.pop() {
            if let PaDomNode::Container(c) = self.get_node(&handle) {
                if c.tag() == local_name {
                    return Some(handle);
                }
            }
            stack.extend(self.children_of(&handle).iter().rev().cloned());
        }
        None
    }
}

impl Default for PaDom {
    fn default() -> Self {
        Self::new()
    }
}
