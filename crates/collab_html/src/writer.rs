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

//! The seam between the importer and the tree it populates.

use crate::marks::MarkSet;
use crate::model::{Attributes, Element, Fragment, Node, TextRun};

/// A tree the importer can append to.
///
/// Implementations backed by a replicated structure must attach each
/// element to its parent before anything is written into it: children
/// are addressed through their parent's identity, which has to exist in
/// the shared structure first. The importer only ever calls
/// [`append_element`](DocumentWriter::append_element) with a parent
/// handle it already holds, and only recurses into the returned handle
/// afterwards.
pub trait DocumentWriter {
    type Handle: Clone;

    /// The node the conversion appends into.
    fn root(&self) -> Self::Handle;

    /// Attach a new element as the last child of `parent` and return its
    /// handle.
    fn append_element(
        &mut self,
        parent: &Self::Handle,
        name: &str,
        attributes: &Attributes,
    ) -> Self::Handle;

    /// Attach a new text run as the last child of `parent`.
    fn append_text(
        &mut self,
        parent: &Self::Handle,
        text: &str,
        marks: &MarkSet,
    );
}

/// Path of child indices from a [`Fragment`] to one of its elements.
/// The empty path is the fragment itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeHandle(Vec<usize>);

impl NodeHandle {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[usize] {
        &self.0
    }

    pub fn child_handle(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }
}

impl Fragment {
    fn children_at_mut(&mut self, handle: &NodeHandle) -> &mut Vec<Node> {
        let mut children = &mut self.children;
        for &index in handle.path() {
            children = match children.get_mut(index) {
                Some(Node::Element(Element { children, .. })) => children,
                other => panic!(
                    "Handle {:?} does not point at an element: {:?}",
                    handle, other
                ),
            };
        }
        children
    }
}

impl DocumentWriter for Fragment {
    type Handle = NodeHandle;

    fn root(&self) -> Self::Handle {
        NodeHandle::root()
    }

    fn append_element(
        &mut self,
        parent: &Self::Handle,
        name: &str,
        attributes: &Attributes,
    ) -> Self::Handle {
        let children = self.children_at_mut(parent);
        children.push(Node::Element(Element {
            name: name.to_owned(),
            attributes: attributes.clone(),
            children: Vec::new(),
        }));
        parent.child_handle(children.len() - 1)
    }

    fn append_text(
        &mut self,
        parent: &Self::Handle,
        text: &str,
        marks: &MarkSet,
    ) {
        self.children_at_mut(parent)
            .push(Node::Text(TextRun::new(text, marks.clone())));
    }
}
