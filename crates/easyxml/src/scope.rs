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

//! Handler scopes: one handler table plus a scope-relative path cursor.
//!
//! A [`HandlerScope`] corresponds to one subtree of the document. Its path
//! starts out empty and grows with every start tag routed to it, so a
//! handler registered under `"cats/cat"` on the root scope matches as long
//! as no handler on the way created a child scope for `cats`.
//!
//! # Examples
//!
//! ```rust
//! use easyxml::{Binding, HandlerScope};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut scope = HandlerScope::new();
//!
//! let log = Rc::clone(&seen);
//! scope.element("a/b", Binding::new().required("id"), move |args| {
//!     log.borrow_mut().push(args["id"].to_string());
//! });
//!
//! scope.on_start("a", &[]).unwrap();
//! scope.on_start("b", &[("id".to_string(), "7".to_string())]).unwrap();
//! assert_eq!(scope.current_path(), "a/b");
//! assert_eq!(*seen.borrow(), vec!["7".to_string()]);
//! ```

use crate::binding::{normalize_attributes, normalize_name, Arguments, Binding};
use crate::error::{Result, XmlError};
use crate::key::Key;
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use tracing::trace;

type ElementCallback = Box<dyn FnMut(&mut Arguments)>;
type TextCallback = Box<dyn FnMut(&str)>;
type EndCallback = Box<dyn FnMut()>;

/// A callable registered against a [`Key`].
pub enum Handler {
    /// Invoked on a matching start tag with bound [`Arguments`].
    Element(ElementHandler),
    /// Invoked with the flushed text content of the matching element.
    Text(TextCallback),
    /// Invoked with no arguments when the scope's path returns to the key.
    End(EndCallback),
}

/// An element callback together with its parameter declaration.
pub struct ElementHandler {
    binding: Binding,
    callback: ElementCallback,
    defined_at: &'static Location<'static>,
}

impl ElementHandler {
    /// The handler's parameter declaration.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Source location where the handler was created.
    pub fn defined_at(&self) -> &'static Location<'static> {
        self.defined_at
    }
}

impl Handler {
    /// Build an element handler; the caller's location is recorded for
    /// error reporting.
    #[track_caller]
    pub fn element<F>(binding: Binding, callback: F) -> Self
    where
        F: FnMut(&mut Arguments) + 'static,
    {
        Handler::Element(ElementHandler {
            binding,
            callback: Box::new(callback),
            defined_at: Location::caller(),
        })
    }

    /// Build a text handler.
    pub fn text<F>(callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        Handler::Text(Box::new(callback))
    }

    /// Build an end handler.
    pub fn end<F>(callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Handler::End(Box::new(callback))
    }

    /// Name of this handler's kind, matching [`Key::kind`].
    pub fn kind(&self) -> &'static str {
        match self {
            Handler::Element(_) => "element",
            Handler::Text(_) => "text",
            Handler::End(_) => "end",
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Element(handler) => f
                .debug_struct("Element")
                .field("binding", &handler.binding)
                .field("defined_at", &handler.defined_at)
                .finish_non_exhaustive(),
            Handler::Text(_) => f.write_str("Text(..)"),
            Handler::End(_) => f.write_str("End(..)"),
        }
    }
}

/// A handler table and the path cursor for one subtree.
#[derive(Debug, Default)]
pub struct HandlerScope {
    handlers: HashMap<Key, Handler>,
    current_path: String,
}

impl HandlerScope {
    /// An empty scope with an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handler is registered under `key`.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.handlers.contains_key(&key.into())
    }

    /// The handler registered under `key`.
    ///
    /// # Errors
    ///
    /// [`XmlError::UndefinedHandler`] if nothing is registered under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Result<&Handler> {
        let key = key.into();
        match self.handlers.get(&key) {
            Some(handler) => Ok(handler),
            None => Err(XmlError::UndefinedHandler { key }),
        }
    }

    /// Register `handler` under `key`, replacing any previous handler.
    ///
    /// # Errors
    ///
    /// [`XmlError::InvalidHandler`] if the handler kind does not match the
    /// key kind, e.g. a text handler under a `#end` key.
    pub fn set(&mut self, key: impl Into<Key>, handler: Handler) -> Result<()> {
        let key = key.into();
        if key.kind() != handler.kind() {
            return Err(XmlError::InvalidHandler {
                expected: key.kind(),
                found: handler.kind(),
                key,
            });
        }
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Remove and return the handler registered under `key`.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Handler> {
        self.handlers.remove(&key.into())
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The path of the current element relative to this scope's root.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Register an element handler under `path`.
    #[track_caller]
    pub fn element<F>(&mut self, path: impl Into<String>, binding: Binding, callback: F) -> &mut Self
    where
        F: FnMut(&mut Arguments) + 'static,
    {
        self.handlers
            .insert(Key::Element(path.into()), Handler::element(binding, callback));
        self
    }

    /// Register an element handler under `path` that opens a child scope
    /// and hands it to `configure`.
    ///
    /// Descendants of the matched element are routed to the child scope,
    /// whose paths start again from the element's children.
    #[track_caller]
    pub fn nest<F>(&mut self, path: impl Into<String>, mut configure: F) -> &mut Self
    where
        F: FnMut(&mut HandlerScope) + 'static,
    {
        let path = path.into();
        let binding = Binding::with_child_scope(normalize_name(&path));
        self.element(path, binding, move |args| {
            if let Some(scope) = args.scope() {
                configure(scope);
            }
        })
    }

    /// Register a text handler for the element at `path`.
    pub fn text<F>(&mut self, path: impl Into<String>, callback: F) -> &mut Self
    where
        F: FnMut(&str) + 'static,
    {
        self.handlers
            .insert(Key::Text(path.into()), Handler::text(callback));
        self
    }

    /// Register an end handler for `path`.
    pub fn end<F>(&mut self, path: impl Into<String>, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.handlers
            .insert(Key::End(path.into()), Handler::end(callback));
        self
    }

    /// Route a start tag to this scope.
    ///
    /// Extends the path with `name` and invokes the element handler
    /// registered under the new path, if any. Returns the child scope the
    /// handler requested; `None` means descendants stay with this scope.
    ///
    /// # Errors
    ///
    /// [`XmlError::MissingArgument`] if the matched handler declares a
    /// required attribute the element does not carry.
    pub fn on_start(
        &mut self,
        name: &str,
        attributes: &[(String, String)],
    ) -> Result<Option<HandlerScope>> {
        if !self.current_path.is_empty() {
            self.current_path.push('/');
        }
        self.current_path.push_str(name);

        let key = Key::Element(self.current_path.clone());
        let Some(Handler::Element(handler)) = self.handlers.get_mut(&key) else {
            return Ok(None);
        };

        let attributes = normalize_attributes(attributes);
        let mut arguments =
            handler
                .binding
                .bind(&self.current_path, &attributes, handler.defined_at)?;

        trace!(path = %self.current_path, scope = arguments.has_scope(), "element handler");
        (handler.callback)(&mut arguments);

        Ok(arguments.into_scope())
    }

    /// Route an end tag to this scope.
    ///
    /// Drops the trailing `name` segment from the path (by length, clamped
    /// at empty) and invokes the end handler for the shortened path.
    pub fn on_end(&mut self, name: &str) {
        retract(&mut self.current_path, name);

        if let Some(Handler::End(callback)) =
            self.handlers.get_mut(&Key::End(self.current_path.clone()))
        {
            trace!(path = %self.current_path, "end handler");
            callback();
        }
    }

    /// Route flushed text content to the text handler of the current path.
    pub fn on_text(&mut self, text: &str) {
        if let Some(Handler::Text(callback)) =
            self.handlers.get_mut(&Key::Text(self.current_path.clone()))
        {
            trace!(path = %self.current_path, len = text.len(), "text handler");
            callback(text);
        }
    }

    /// Clear the path cursor; registered handlers are kept.
    pub(crate) fn reset(&mut self) {
        self.current_path.clear();
    }
}

/// Shorten `path` by `name` plus its separator, never below empty.
fn retract(path: &mut String, name: &str) {
    let mut keep = path.len().saturating_sub(name.len() + 1);
    while !path.is_char_boundary(keep) {
        keep -= 1;
    }
    path.truncate(keep);
}
