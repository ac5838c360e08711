// Dweve EasyXML - Path-Keyed Streaming XML Dispatch
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Namespace prefix tracking and alias rewriting.
//!
//! Declarations (`xmlns:p="uri"`) push a URI onto the prefix's binding
//! stack for the lifetime of the declaring element. A prefixed name whose
//! prefix is bound to a URI with a registered alias is rewritten to
//! `alias_local`; anything else passes through unchanged.

use std::borrow::Cow;
use std::collections::HashMap;

const XMLNS: &str = "xmlns";
const XML_PREFIX: &str = "xml";
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Per-parse namespace state.
#[derive(Debug)]
pub(crate) struct NamespaceTable<'a> {
    aliases: &'a HashMap<String, String>,
    bindings: HashMap<String, Vec<String>>,
    opened: Vec<Vec<String>>,
}

impl<'a> NamespaceTable<'a> {
    /// Empty table resolving against `aliases` (URI to alias).
    pub(crate) fn new(aliases: &'a HashMap<String, String>) -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(XML_PREFIX.to_string(), vec![XML_NAMESPACE.to_string()]);
        Self {
            aliases,
            bindings,
            opened: Vec::new(),
        }
    }

    /// Open an element: bind every namespace declared in `attributes`.
    pub(crate) fn enter(&mut self, attributes: &[(String, String)]) {
        let mut opened = Vec::new();
        for (name, uri) in attributes {
            let prefix = if name == XMLNS {
                ""
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                prefix
            } else {
                continue;
            };
            self.bindings
                .entry(prefix.to_string())
                .or_default()
                .push(uri.clone());
            opened.push(prefix.to_string());
        }
        self.opened.push(opened);
    }

    /// Close an element: unbind the declarations it opened.
    pub(crate) fn leave(&mut self) {
        let Some(opened) = self.opened.pop() else {
            return;
        };
        for prefix in opened {
            if let Some(stack) = self.bindings.get_mut(&prefix) {
                stack.pop();
                if stack.is_empty() {
                    self.bindings.remove(&prefix);
                }
            }
        }
    }

    /// URI currently bound to `prefix` (`""` for the default namespace).
    pub(crate) fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .get(prefix)
            .and_then(|stack| stack.last())
            .map(String::as_str)
    }

    /// Rewrite a prefixed name to `alias_local` when its URI has an alias.
    pub(crate) fn resolve<'n>(&self, name: &'n str) -> Cow<'n, str> {
        let Some((prefix, local)) = name.split_once(':') else {
            return Cow::Borrowed(name);
        };
        if prefix.is_empty() {
            return Cow::Borrowed(name);
        }
        match self.uri(prefix).and_then(|uri| self.aliases.get(uri)) {
            Some(alias) => Cow::Owned(format!("{}_{}", alias, local)),
            None => Cow::Borrowed(name),
        }
    }
}
