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

//! Structured handler keys.
//!
//! A scope's handler table distinguishes three kinds of handler for the same
//! path. The string form keeps the historical suffix convention, so
//! `"cats/cat"`, `"cats/notes#text"` and `"cats/cat#end"` parse to
//! [`Key::Element`], [`Key::Text`] and [`Key::End`] respectively.
//!
//! ```rust
//! use easyxml::Key;
//!
//! let key: Key = "catalog/cd#text".parse().unwrap();
//! assert_eq!(key, Key::text("catalog/cd"));
//! assert_eq!(key.to_string(), "catalog/cd#text");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const TEXT_SUFFIX: &str = "#text";
const END_SUFFIX: &str = "#end";

/// A handler table key: a scope-relative path plus the event it reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Fires on the start tag of the element at `path`.
    Element(String),
    /// Fires with the flushed text content of the element at `path`.
    Text(String),
    /// Fires when the scope's path returns to `path` on an end tag.
    End(String),
}

impl Key {
    /// Element handler key.
    pub fn element(path: impl Into<String>) -> Self {
        Key::Element(path.into())
    }

    /// Text handler key.
    pub fn text(path: impl Into<String>) -> Self {
        Key::Text(path.into())
    }

    /// End handler key.
    pub fn end(path: impl Into<String>) -> Self {
        Key::End(path.into())
    }

    /// The scope-relative path of this key.
    pub fn path(&self) -> &str {
        match self {
            Key::Element(path) | Key::Text(path) | Key::End(path) => path,
        }
    }

    /// Human-readable name of the handler kind this key requires.
    pub fn kind(&self) -> &'static str {
        match self {
            Key::Element(_) => "element",
            Key::Text(_) => "text",
            Key::End(_) => "end",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Element(path) => f.write_str(path),
            Key::Text(path) => write!(f, "{}{}", path, TEXT_SUFFIX),
            Key::End(path) => write!(f, "{}{}", path, END_SUFFIX),
        }
    }
}

impl FromStr for Key {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Key::from(s))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        if let Some(path) = s.strip_suffix(TEXT_SUFFIX) {
            Key::Text(path.to_string())
        } else if let Some(path) = s.strip_suffix(END_SUFFIX) {
            Key::End(path.to_string())
        } else {
            Key::Element(s.to_string())
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
