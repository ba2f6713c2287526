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

/// How html5ever parse errors are treated during import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Log parse errors and convert the tree html5ever recovered.
    #[default]
    Permissive,
    /// Fail the import, before anything is written, if html5ever reports
    /// any parse error.
    Strict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub parse_mode: ParseMode,
}

impl ImportOptions {
    pub fn strict() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
        }
    }
}
