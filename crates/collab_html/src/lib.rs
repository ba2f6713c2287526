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

//! Conversion between HTML and a collaborative rich-text tree.
//!
//! A document is a [`Fragment`] of [`Element`]s and [`TextRun`]s. Import
//! parses HTML and appends nodes through a [`DocumentWriter`], which is
//! implemented by the in-memory model and, with the `yrs-backend`
//! feature, by a yrs XML tree. Export serializes a tree back to HTML.

pub mod attributes;
mod error;
mod escape;
mod export;
mod import;
mod marks;
mod mentions;
mod model;
pub mod node_names;
mod options;
mod parser;
#[cfg(feature = "yrs-backend")]
pub mod shared;
mod writer;

pub use crate::error::{AttributeTypeError, HtmlParseError, ImportWarning};
pub use crate::escape::{escape_attribute, escape_text};
pub use crate::export::{export_html, export_nodes, to_plain_text};
pub use crate::import::{import_html, ImportReport};
pub use crate::marks::{MarkKind, MarkSet, MarkValue, PRESENTATIONAL_ATTRIBUTES};
pub use crate::mentions::{collect_mentions, Mention, MentionKind};
pub use crate::model::{AttrValue, Attributes, Element, Fragment, Node, TextRun};
pub use crate::node_names::node_name;
pub use crate::options::{ImportOptions, ParseMode};
pub use crate::writer::{DocumentWriter, NodeHandle};
