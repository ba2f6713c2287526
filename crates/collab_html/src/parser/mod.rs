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

//! Adapter over html5ever.
//!
//! html5ever drives a [`TreeSink`](html5ever::tree_builder::TreeSink) that
//! builds a [`PaDom`]: an arena of nodes where containers refer to their
//! children by [`PaDomHandle`]. The importer walks the finished arena.

mod padom;
mod padom_creator;
mod panode_container;

use html5ever::{LocalName, Namespace, QualName};

pub(crate) use padom::{PaDom, PaDomNode};
pub(crate) use padom_creator::PaDomCreator;
pub(crate) use panode_container::PaNodeContainer;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PaDomHandle(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeText {
    pub(crate) content: String,
}

pub(crate) fn paqual_name(name: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(name),
    )
}
