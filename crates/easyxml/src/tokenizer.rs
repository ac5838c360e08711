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

//! The tokenizer boundary.
//!
//! [`Tokenizer`] pulls events out of `quick-xml` and pushes them into a
//! [`TokenSink`] as start-element, end-element and character-data
//! callbacks. Names are passed through verbatim (no case folding at this
//! layer). On top of what `quick-xml` checks itself, the tokenizer rejects
//! documents without a document element, content outside the document
//! element, stray end tags and elements left open at end of input.
//!
//! Line numbers are tracked by counting newlines in every event's raw
//! bytes, so they stay correct regardless of how the input is chunked.
//!
//! Literal line breaks are normalized to `\n` (`\r\n` and a lone `\r`
//! alike) before entity expansion, so `&#13;` survives. Attribute values
//! additionally turn literal tabs and line breaks into spaces.

use crate::encoding::InputEncoding;
use crate::error::{Result, XmlError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::{self, BufRead};
use tracing::trace;

/// Receiver of tokenizer callbacks.
pub trait TokenSink {
    /// A start tag (or the opening half of an empty-element tag).
    fn start_element(&mut self, name: String, attributes: Vec<(String, String)>) -> Result<()>;

    /// An end tag (or the closing half of an empty-element tag).
    fn end_element(&mut self, name: String) -> Result<()>;

    /// A fragment of character data; one text node may arrive in several
    /// fragments.
    fn character_data(&mut self, text: String) -> Result<()>;
}

enum Token {
    Start(String, Vec<(String, String)>),
    End(String),
    Text(String),
    Eof,
    Skip,
}

enum Fault {
    Syntax(String),
    Io(io::Error),
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::Syntax(message)
    }
}

/// Streaming tokenizer over any buffered byte source.
///
/// The size of the source's buffer is the chunk size: a
/// `BufReader::with_capacity(1, ..)` feeds the tokenizer one byte at a time.
pub struct Tokenizer<R: BufRead> {
    reader: Reader<R>,
    encoding: InputEncoding,
    skip_whitespace_only: bool,
    buf: Vec<u8>,
    line: usize,
    depth: usize,
    seen_root: bool,
    // The previous event was character data ending in a literal `\r`.
    pending_cr: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer reading from `source`.
    pub fn new(source: R, encoding: InputEncoding, skip_whitespace_only: bool) -> Self {
        let mut reader = Reader::from_reader(source);
        reader
            .trim_text(false)
            .expand_empty_elements(true)
            .check_end_names(true);

        Self {
            reader,
            encoding,
            skip_whitespace_only,
            buf: Vec::with_capacity(1024),
            line: 1,
            depth: 0,
            seen_root: false,
            pending_cr: false,
        }
    }

    /// Current 1-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset reached in the input.
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Tokenize the whole input, delivering every event to `sink`.
    ///
    /// Stops at the first error, whether raised by the tokenizer or
    /// returned by the sink.
    pub fn run<S: TokenSink>(&mut self, sink: &mut S) -> Result<()> {
        loop {
            match self.next_token()? {
                Token::Start(name, attributes) => {
                    if self.depth == 0 && self.seen_root {
                        return Err(self.malformed("junk after document element"));
                    }
                    if name.is_empty() {
                        return Err(self.malformed("element name expected"));
                    }
                    self.depth += 1;
                    self.seen_root = true;
                    sink.start_element(name, attributes)?;
                }
                Token::End(name) => {
                    if self.depth == 0 {
                        return Err(self.malformed(format!("unexpected end tag </{}>", name)));
                    }
                    self.depth -= 1;
                    sink.end_element(name)?;
                }
                Token::Text(text) => {
                    if self.depth == 0 {
                        if !is_whitespace(text.trim_start_matches('\u{feff}')) {
                            return Err(self.malformed("text outside of document element"));
                        }
                        continue;
                    }
                    if self.skip_whitespace_only && is_whitespace(&text) {
                        continue;
                    }
                    sink.character_data(text)?;
                }
                Token::Eof => {
                    if !self.seen_root {
                        return Err(self.malformed("no element found"));
                    }
                    if self.depth > 0 {
                        return Err(self.malformed(format!(
                            "{} unclosed element(s) at end of input",
                            self.depth
                        )));
                    }
                    trace!(line = self.line, position = self.position(), "end of input");
                    return Ok(());
                }
                Token::Skip => {}
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.buf.clear();
        let encoding = self.encoding;
        let pending_cr = self.pending_cr;
        let mut trailing_cr = false;

        let token = match self.reader.read_event_into(&mut self.buf) {
            Ok(Event::Start(e)) => start_token(&e, encoding),
            Ok(Event::End(e)) => encoding
                .decode(e.name().as_ref())
                .map(|name| Token::End(name.into_owned()))
                .map_err(Fault::from),
            Ok(Event::Text(e)) => encoding
                .decode(&e)
                .and_then(|raw| {
                    trailing_cr = raw.ends_with('\r');
                    unescape(&normalize_newlines(continue_line(&raw, pending_cr)))
                })
                .map(Token::Text)
                .map_err(Fault::from),
            Ok(Event::CData(e)) => encoding
                .decode(&e)
                .map(|raw| {
                    trailing_cr = raw.ends_with('\r');
                    Token::Text(normalize_newlines(continue_line(&raw, pending_cr)).into_owned())
                })
                .map_err(Fault::from),
            Ok(Event::Empty(e)) => start_token(&e, encoding),
            Ok(Event::Eof) => Ok(Token::Eof),
            Ok(_) => Ok(Token::Skip),
            Err(quick_xml::Error::Io(err)) => Err(Fault::Io(io::Error::new(
                err.kind(),
                err.to_string(),
            ))),
            Err(err) => Err(Fault::Syntax(err.to_string())),
        };

        self.line += self.buf.iter().filter(|&&b| b == b'\n').count();
        self.pending_cr = trailing_cr;

        token.map_err(|fault| match fault {
            Fault::Syntax(message) => self.malformed(message),
            Fault::Io(source) => XmlError::io(source),
        })
    }

    fn malformed(&self, message: impl Into<String>) -> XmlError {
        XmlError::malformed(message, self.line, self.position())
    }
}

fn start_token(e: &BytesStart<'_>, encoding: InputEncoding) -> std::result::Result<Token, Fault> {
    let name = encoding.decode(e.name().as_ref())?.into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Fault::Syntax(err.to_string()))?;
        let key = encoding.decode(attr.key.as_ref())?.into_owned();
        let raw = encoding.decode(&attr.value)?;
        attributes.push((key, unescape(&normalize_attribute(&raw))?));
    }

    Ok(Token::Start(name, attributes))
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    quick_xml::escape::unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|err| err.to_string())
}

/// Drop the `\n` completing a `\r\n` pair split across two text events.
fn continue_line(raw: &str, pending_cr: bool) -> &str {
    if pending_cr {
        raw.strip_prefix('\n').unwrap_or(raw)
    } else {
        raw
    }
}

fn normalize_newlines(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn normalize_attribute(raw: &str) -> Cow<'_, str> {
    if raw.contains(['\t', '\r', '\n']) {
        Cow::Owned(normalize_newlines(raw).replace(['\t', '\n'], " "))
    } else {
        Cow::Borrowed(raw)
    }
}

/// The XML whitespace set: space, tab, carriage return and line feed.
pub(crate) fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_whitespace(text: &str) -> bool {
    text.chars().all(is_xml_whitespace)
}
