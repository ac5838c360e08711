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

//! The dispatcher: drives tokenizer events into a stack of handler scopes.
//!
//! The dispatcher owns the root [`HandlerScope`] and dereferences to it, so
//! handlers are registered on the dispatcher directly. During a parse it
//! keeps one stack slot per open element: either the child scope that the
//! element's handler created, or nothing when no handler delegated. Events
//! are routed to the *active* scope, the nearest occupied slot from the
//! top (falling back to the root).
//!
//! Character data is buffered and flushed at the next start or end tag, so
//! text handlers always see whole text runs.
//!
//! # Examples
//!
//! ```rust
//! use easyxml::{Binding, Dispatcher};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let names = Rc::new(RefCell::new(Vec::new()));
//! let mut dispatcher = Dispatcher::new();
//!
//! let sink = Rc::clone(&names);
//! dispatcher.nest("cats", move |cats| {
//!     let sink = Rc::clone(&sink);
//!     cats.element("cat", Binding::new().required("name"), move |args| {
//!         sink.borrow_mut().push(args["name"].to_string());
//!     });
//! });
//!
//! dispatcher
//!     .parse(r#"<cats><cat name="whiskers"/><cat name="tinker"/></cats>"#)
//!     .unwrap();
//! assert_eq!(*names.borrow(), vec!["whiskers", "tinker"]);
//! ```

use crate::config::{validate_chunk_size, DispatcherConfig};
use crate::error::{Result, XmlError};
use crate::namespace::NamespaceTable;
use crate::scope::HandlerScope;
use crate::tokenizer::{is_xml_whitespace, TokenSink, Tokenizer};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::{Deref, DerefMut};
use std::path::Path;
use tracing::{debug, trace};

/// Path-keyed XML dispatcher.
///
/// A dispatcher can be reused for any number of sequential parses; every
/// parse starts from an empty stack, buffer and namespace table.
#[derive(Debug, Default)]
pub struct Dispatcher {
    root: HandlerScope,
    config: DispatcherConfig,
    aliases: HashMap<String, String>,
}

impl Dispatcher {
    /// A dispatcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher with a custom configuration.
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Mutable access to the configuration, for use between parses.
    pub fn config_mut(&mut self) -> &mut DispatcherConfig {
        &mut self.config
    }

    /// Rewrite names qualified by a prefix bound to `uri` as
    /// `{alias}_{localname}` before they reach any scope.
    pub fn set_alias(&mut self, uri: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.aliases.insert(uri.into(), alias.into());
        self
    }

    /// The alias registered for `uri`, if any.
    pub fn alias(&self, uri: &str) -> Option<&str> {
        self.aliases.get(uri).map(String::as_str)
    }

    /// Parse a complete in-memory document.
    ///
    /// # Errors
    ///
    /// [`XmlError::Malformed`] for invalid XML, [`XmlError::MissingArgument`]
    /// when a matched handler cannot be satisfied.
    pub fn parse(&mut self, input: impl AsRef<[u8]>) -> Result<()> {
        let input = input.as_ref();
        debug!(bytes = input.len(), "parsing in-memory document");
        self.run(input)
    }

    /// Parse a document read from `reader` in chunks of `chunk_size` bytes.
    ///
    /// Produces exactly the same handler invocations as [`parse`](Self::parse)
    /// on the same content, whatever the chunk size.
    ///
    /// # Errors
    ///
    /// As [`parse`](Self::parse), plus [`XmlError::Io`] on read failure and
    /// [`XmlError::InvalidConfig`] for a zero chunk size.
    pub fn parse_stream<R: Read>(&mut self, reader: R, chunk_size: usize) -> Result<()> {
        validate_chunk_size(chunk_size)?;
        debug!(chunk_size, "parsing stream");
        self.run(BufReader::with_capacity(chunk_size, reader))
    }

    /// Parse the file at `path` in chunks of
    /// [`read_chunk_size`](DispatcherConfig::read_chunk_size) bytes.
    ///
    /// # Errors
    ///
    /// [`XmlError::Io`] if the file cannot be opened (before any handler
    /// runs); otherwise as [`parse_stream`](Self::parse_stream), with the
    /// file path attached to malformed-input and I/O errors.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.config.validate()?;

        let file = File::open(path).map_err(|e| XmlError::io(e).with_path(path))?;
        debug!(path = %path.display(), "parsing file");

        let chunk_size = self.config.read_chunk_size;
        self.parse_stream(file, chunk_size)
            .map_err(|e| e.with_path(path))
    }

    fn run<R: BufRead>(&mut self, source: R) -> Result<()> {
        let mut root = std::mem::take(&mut self.root);
        root.reset();

        let mut session = Session::new(root, &self.config, &self.aliases);
        let mut tokenizer = Tokenizer::new(
            source,
            self.config.input_encoding,
            self.config.skip_whitespace_only_text,
        );
        let result = tokenizer.run(&mut session);

        match &result {
            Ok(()) => debug!(lines = tokenizer.line(), "parse complete"),
            Err(err) => debug!(error = %err, "parse aborted"),
        }

        self.root = session.into_root();
        result
    }
}

impl Deref for Dispatcher {
    type Target = HandlerScope;

    fn deref(&self) -> &HandlerScope {
        &self.root
    }
}

impl DerefMut for Dispatcher {
    fn deref_mut(&mut self) -> &mut HandlerScope {
        &mut self.root
    }
}

/// State of one parse: the scope stack, text buffer and namespaces.
struct Session<'a> {
    root: HandlerScope,
    // One slot per open element; `None` where no scope was created.
    stack: Vec<Option<HandlerScope>>,
    // Index into `stack` of the active scope; `None` means the root.
    active: Option<usize>,
    buffer: String,
    namespaces: NamespaceTable<'a>,
    config: &'a DispatcherConfig,
}

impl<'a> Session<'a> {
    fn new(
        root: HandlerScope,
        config: &'a DispatcherConfig,
        aliases: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            root,
            stack: Vec::new(),
            active: None,
            buffer: String::new(),
            namespaces: NamespaceTable::new(aliases),
            config,
        }
    }

    fn into_root(self) -> HandlerScope {
        self.root
    }

    fn active_scope(&mut self) -> &mut HandlerScope {
        match self.active.and_then(|index| self.stack.get_mut(index)) {
            Some(Some(scope)) => scope,
            _ => &mut self.root,
        }
    }

    fn fold(&self, name: String) -> String {
        if self.config.case_folding {
            name.to_lowercase()
        } else {
            name
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.buffer);
        let text = if self.config.trim_text {
            text.trim_matches(is_xml_whitespace)
        } else {
            text.as_str()
        };

        if !text.is_empty() {
            trace!(len = text.len(), "flush text");
            self.active_scope().on_text(text);
        }
    }
}

impl TokenSink for Session<'_> {
    fn start_element(&mut self, name: String, attributes: Vec<(String, String)>) -> Result<()> {
        self.flush();

        let name = self.fold(name);
        let attributes: Vec<(String, String)> = attributes
            .into_iter()
            .map(|(key, value)| (self.fold(key), value))
            .collect();

        self.namespaces.enter(&attributes);
        let name = self.namespaces.resolve(&name).into_owned();
        let attributes: Vec<(String, String)> = attributes
            .iter()
            .map(|(key, value)| (self.namespaces.resolve(key).into_owned(), value.clone()))
            .collect();

        trace!(depth = self.stack.len() + 1, name = %name, "start element");
        let child = self.active_scope().on_start(&name, &attributes)?;

        if child.is_some() {
            debug!(depth = self.stack.len() + 1, name = %name, "entering child scope");
            self.active = Some(self.stack.len());
        }
        self.stack.push(child);
        Ok(())
    }

    fn end_element(&mut self, name: String) -> Result<()> {
        self.flush();

        let name = self.fold(name);
        // Resolve before unwinding so the name matches the one pushed at start.
        let name = self.namespaces.resolve(&name).into_owned();
        self.namespaces.leave();

        if let Some(Some(_)) = self.stack.pop() {
            debug!(depth = self.stack.len() + 1, name = %name, "retiring child scope");
        }
        self.active = self.stack.iter().rposition(Option::is_some);

        trace!(depth = self.stack.len(), name = %name, "end element");
        self.active_scope().on_end(&name);
        Ok(())
    }

    fn character_data(&mut self, text: String) -> Result<()> {
        self.buffer.push_str(&text);
        Ok(())
    }
}
