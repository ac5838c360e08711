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

//! Path-Keyed Streaming XML Dispatch
//!
//! This crate turns a stream of XML tokens into calls to user handlers keyed
//! by element *paths* such as `catalog/cd/title`. Instead of building a
//! document tree, it keeps one string of the current path per scope and
//! looks handlers up by exact match.
//!
//! # Features
//!
//! - **Path-Keyed**: `a/b`, `a/b#text` and `a/b#end` keys for start, text and end events
//! - **Attribute Binding**: Handler parameters are filled from normalized attributes
//! - **Scoped Delegation**: A handler can open a child scope that owns a subtree
//! - **Streaming**: Parse from any reader in fixed-size chunks with identical results
//! - **Namespace Aliases**: Prefixed names bound to a known URI become `alias_local`
//! - **Input Encodings**: UTF-8, ISO-8859-1 and US-ASCII input
//!
//! # Quick Start
//!
//! ```rust
//! use easyxml::{Binding, Dispatcher};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut dispatcher = Dispatcher::new();
//!
//! let sink = Rc::clone(&seen);
//! dispatcher.element("cats/cat", Binding::new().required("name"), move |args| {
//!     sink.borrow_mut().push(format!("cat {}", &args["name"]));
//! });
//! let sink = Rc::clone(&seen);
//! dispatcher.text("cats/notes", move |text| {
//!     sink.borrow_mut().push(format!("notes {text}"));
//! });
//!
//! dispatcher
//!     .parse(r#"<cats><cat name="whiskers"/><notes>Hello World</notes></cats>"#)
//!     .unwrap();
//!
//! assert_eq!(*seen.borrow(), vec!["cat whiskers", "notes Hello World"]);
//! ```
//!
//! # Child Scopes
//!
//! A nested handler takes over everything below its element. Paths inside
//! the child scope are relative to that element:
//!
//! ```rust
//! use easyxml::{Binding, Dispatcher};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let titles = Rc::new(RefCell::new(Vec::new()));
//! let mut dispatcher = Dispatcher::new();
//!
//! let sink = Rc::clone(&titles);
//! dispatcher.nest("catalog/cd", move |cd| {
//!     let sink = Rc::clone(&sink);
//!     cd.text("title", move |title| sink.borrow_mut().push(title.to_string()));
//! });
//!
//! dispatcher
//!     .parse("<catalog><cd><title>Empire Burlesque</title></cd></catalog>")
//!     .unwrap();
//! assert_eq!(*titles.borrow(), vec!["Empire Burlesque"]);
//! ```
//!
//! # Errors
//!
//! Parsing stops at the first failure. Malformed input reports the line it
//! was detected on:
//!
//! ```rust
//! use easyxml::{Dispatcher, XmlError};
//!
//! let err = Dispatcher::new().parse("><>").unwrap_err();
//! assert!(matches!(err, XmlError::Malformed { line: 1, .. }));
//! ```

mod binding;
mod config;
mod dispatcher;
mod encoding;
mod error;
mod key;
mod namespace;
mod scope;

pub mod tokenizer;

pub use binding::{normalize_name, Arguments, Binding, Param, ParamKind};
pub use config::{DispatcherConfig, DEFAULT_READ_CHUNK_SIZE};
pub use dispatcher::Dispatcher;
pub use encoding::InputEncoding;
pub use error::{Result, XmlError};
pub use key::Key;
pub use scope::{ElementHandler, Handler, HandlerScope};
pub use tokenizer::{TokenSink, Tokenizer};
