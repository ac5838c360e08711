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

//! Static parameter binding for element handlers.
//!
//! An element handler declares up front which values it wants, in order:
//! optionally a fresh child scope in position 0, then attributes that are
//! either required or fall back to a default. At dispatch time the
//! declaration is bound against the element's (normalized) attributes.
//!
//! Attribute names are normalized before binding by replacing `-`, `.` and
//! `:` with `_`, so `xml:lang` binds to a parameter named `xml_lang` and
//! `data-id` to `data_id`.
//!
//! # Examples
//!
//! ```rust
//! use easyxml::{Binding, ParamKind};
//!
//! let binding = Binding::with_child_scope("cat")
//!     .required("name")
//!     .optional("status", "unknown");
//!
//! assert!(binding.wants_child_scope());
//! assert_eq!(binding.params().len(), 3);
//! assert_eq!(binding.params()[2].kind(), &ParamKind::Default("unknown".to_string()));
//! ```

use crate::error::{Result, XmlError};
use crate::scope::HandlerScope;
use std::collections::HashMap;
use std::ops::Index;
use std::panic::Location;

/// How a declared parameter is satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Receives a newly created [`HandlerScope`] for the element's subtree.
    ///
    /// Only honored in position 0 and only when the parameter name equals
    /// the normalized path the handler matched on.
    ChildScope,
    /// Must be present as an attribute of the element.
    Required,
    /// Taken from the attribute when present, otherwise this value.
    Default(String),
}

/// One declared parameter of an element handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    kind: ParamKind,
}

impl Param {
    /// The parameter (attribute) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the parameter is satisfied.
    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }
}

/// Ordered parameter declaration for an element handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    params: Vec<Param>,
}

impl Binding {
    /// A binding with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A binding whose first parameter requests a child scope.
    ///
    /// `name` must equal the normalized path of the handler's key for the
    /// scope to be created; [`HandlerScope::nest`] fills it in for you.
    pub fn with_child_scope(name: impl Into<String>) -> Self {
        Self {
            params: vec![Param {
                name: name.into(),
                kind: ParamKind::ChildScope,
            }],
        }
    }

    /// Append a parameter bound to a required attribute.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind: ParamKind::Required,
        });
        self
    }

    /// Append a parameter bound to an attribute, with a default value.
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind: ParamKind::Default(default.into()),
        });
        self
    }

    /// Declared parameters, in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Whether the first parameter is a child-scope slot.
    pub fn wants_child_scope(&self) -> bool {
        matches!(
            self.params.first(),
            Some(Param {
                kind: ParamKind::ChildScope,
                ..
            })
        )
    }

    /// Bind the declared parameters for an element matched at `path`.
    pub(crate) fn bind(
        &self,
        path: &str,
        attributes: &HashMap<String, String>,
        defined_at: &'static Location<'static>,
    ) -> Result<Arguments> {
        let scope_name = normalize_name(path);
        let mut arguments = Arguments::default();

        for (index, param) in self.params.iter().enumerate() {
            if index == 0 && param.kind == ParamKind::ChildScope && param.name == scope_name {
                arguments.scope = Some(HandlerScope::new());
                continue;
            }

            if let Some(value) = attributes.get(&param.name) {
                arguments.values.push((param.name.clone(), value.clone()));
                continue;
            }

            if let ParamKind::Default(value) = &param.kind {
                arguments.values.push((param.name.clone(), value.clone()));
                continue;
            }

            return Err(XmlError::MissingArgument {
                param: param.name.clone(),
                path: path.to_string(),
                defined_at,
            });
        }

        Ok(arguments)
    }
}

/// Values bound for one element handler invocation.
///
/// Indexing by name panics if the name was not declared in the handler's
/// [`Binding`]; declared names are always present.
#[derive(Debug, Default)]
pub struct Arguments {
    scope: Option<HandlerScope>,
    values: Vec<(String, String)>,
}

impl Arguments {
    /// The child scope created for this element, if one was requested.
    pub fn scope(&mut self) -> Option<&mut HandlerScope> {
        self.scope.as_mut()
    }

    /// Whether a child scope was created.
    pub fn has_scope(&self) -> bool {
        self.scope.is_some()
    }

    /// Bound value of the named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }

    /// Bound values in declaration order, excluding the child scope.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of bound values, excluding the child scope.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values were bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_scope(self) -> Option<HandlerScope> {
        self.scope
    }
}

impl Index<&str> for Arguments {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no argument named `{}` was bound", name),
        }
    }
}

/// Replace `-`, `.` and `:` with `_`.
pub fn normalize_name(name: &str) -> String {
    name.replace(['-', '.', ':'], "_")
}

/// Normalize attribute names into a lookup table; later duplicates win.
pub(crate) fn normalize_attributes(attributes: &[(String, String)]) -> HashMap<String, String> {
    attributes
        .iter()
        .map(|(name, value)| (normalize_name(name), value.clone()))
        .collect()
}
