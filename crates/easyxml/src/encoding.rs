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

//! Input encodings.
//!
//! The tokenizer works on raw bytes; names, attribute values and character
//! data are decoded with the configured [`InputEncoding`] before they reach
//! any handler. Output is always UTF-8.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Character encoding of the XML input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// UTF-8 (the default).
    #[default]
    Utf8,
    /// ISO-8859-1 (Latin-1); every byte maps to the code point of equal value.
    Iso8859_1,
    /// US-ASCII; bytes above 0x7F are rejected.
    Ascii,
}

impl InputEncoding {
    /// Canonical label, as used in XML declarations.
    pub fn label(self) -> &'static str {
        match self {
            InputEncoding::Utf8 => "UTF-8",
            InputEncoding::Iso8859_1 => "ISO-8859-1",
            InputEncoding::Ascii => "US-ASCII",
        }
    }

    /// Decode `bytes` to UTF-8 text.
    ///
    /// Borrows when the input is already valid UTF-8 text.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, String> {
        match self {
            InputEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| format!("invalid UTF-8 sequence: {}", e)),
            InputEncoding::Iso8859_1 => {
                if bytes.is_ascii() {
                    Ok(Cow::Borrowed(ascii_str(bytes)))
                } else {
                    Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
                }
            }
            InputEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                None => Ok(Cow::Borrowed(ascii_str(bytes))),
                Some(offset) => Err(format!(
                    "byte 0x{:02X} is not valid US-ASCII",
                    bytes[offset]
                )),
            },
        }
    }
}

fn ascii_str(bytes: &[u8]) -> &str {
    // ASCII is a subset of UTF-8, so this cannot fail.
    std::str::from_utf8(bytes).unwrap_or_default()
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(InputEncoding::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" => Ok(InputEncoding::Iso8859_1),
            "US-ASCII" | "ASCII" => Ok(InputEncoding::Ascii),
            _ => Err(format!("unsupported input encoding: {}", s)),
        }
    }
}
