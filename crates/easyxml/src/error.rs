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

//! Error types for path-keyed XML dispatch.
//!
//! Every failure is fatal to the `parse` call that raised it: there is no
//! per-element recovery. Registration-surface errors ([`XmlError::UndefinedHandler`],
//! [`XmlError::InvalidHandler`]) are raised at call time and are unrelated to
//! any active parse.
//!
//! # Examples
//!
//! ```rust
//! use easyxml::{Dispatcher, XmlError};
//!
//! let mut dispatcher = Dispatcher::new();
//! match dispatcher.parse("><>") {
//!     Err(XmlError::Malformed { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("expected malformed input, got {:?}", other),
//! }
//! ```

use crate::key::Key;
use std::panic::Location;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XmlError>;

/// Errors raised while registering handlers or dispatching a document.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The tokenizer rejected the input as malformed XML.
    #[error("XML error: {message} at line {line} in {}", source_name(.path))]
    Malformed {
        /// Tokenizer message
        message: String,
        /// 1-based line of the offending input
        line: usize,
        /// Byte offset reached by the tokenizer
        position: usize,
        /// Input file, when parsing from a path
        path: Option<PathBuf>,
    },

    /// The input could not be opened or read.
    #[error("could not read XML input {}: {source}", source_name(.path))]
    Io {
        /// Input file, when parsing from a path
        path: Option<PathBuf>,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A matched element handler declares a required parameter that is
    /// neither the child-scope slot nor an attribute of the element.
    #[error("unable to satisfy required argument `{param}` for handler of `{path}` defined at {defined_at}")]
    MissingArgument {
        /// Name of the unsatisfied parameter
        param: String,
        /// Scope-relative path the handler was matched on
        path: String,
        /// Source location of the registration call
        defined_at: &'static Location<'static>,
    },

    /// A handler was requested for a key that was never registered.
    #[error("undefined handler: {key}")]
    UndefinedHandler {
        /// The requested key
        key: Key,
    },

    /// A handler of the wrong kind was registered against a key.
    #[error("invalid handler for `{key}`: expected {expected} handler, got {found} handler")]
    InvalidHandler {
        /// The key being registered
        key: Key,
        /// Handler kind the key requires
        expected: &'static str,
        /// Handler kind that was supplied
        found: &'static str,
    },

    /// The dispatcher configuration cannot be used.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

fn source_name(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "input".to_string(),
    }
}

impl XmlError {
    /// Create a malformed-input error without file context.
    #[inline]
    pub fn malformed(message: impl Into<String>, line: usize, position: usize) -> Self {
        Self::Malformed {
            message: message.into(),
            line,
            position,
            path: None,
        }
    }

    /// Create an I/O error without file context.
    #[inline]
    pub fn io(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Attach an input file path to malformed-input and I/O errors.
    ///
    /// Other variants are returned unchanged.
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            Self::Malformed {
                message,
                line,
                position,
                ..
            } => Self::Malformed {
                message,
                line,
                position,
                path: Some(file.to_path_buf()),
            },
            Self::Io { source, .. } => Self::Io {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// Line number of malformed input, if this is a tokenizer error.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Input file associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Malformed { path, .. } | Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}
