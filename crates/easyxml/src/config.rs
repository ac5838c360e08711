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

//! Dispatcher configuration.

use crate::encoding::InputEncoding;
use crate::error::{Result, XmlError};

/// Default chunk size for file input, in bytes.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 4096;

/// Options recognized by [`Dispatcher`](crate::Dispatcher).
///
/// Every option affects only the dispatcher layer; handler scopes see the
/// already-normalized names and text.
///
/// # Examples
///
/// ```rust
/// use easyxml::{Dispatcher, DispatcherConfig, InputEncoding};
///
/// let config = DispatcherConfig {
///     case_folding: true,
///     input_encoding: InputEncoding::Iso8859_1,
///     ..Default::default()
/// };
/// let dispatcher = Dispatcher::with_config(config);
/// assert!(dispatcher.config().case_folding);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Fold element and attribute names to lowercase before matching (default: false)
    pub case_folding: bool,
    /// Drop whitespace-only character data from the tokenizer (default: true)
    pub skip_whitespace_only_text: bool,
    /// Trim flushed text and suppress it when empty (default: true)
    pub trim_text: bool,
    /// Encoding of the input bytes (default: UTF-8)
    pub input_encoding: InputEncoding,
    /// Chunk size used by `parse_file` (default: 4096)
    pub read_chunk_size: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            case_folding: false,
            skip_whitespace_only_text: true,
            trim_text: true,
            input_encoding: InputEncoding::Utf8,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

impl DispatcherConfig {
    /// Check the configuration before any input is read.
    pub fn validate(&self) -> Result<()> {
        validate_chunk_size(self.read_chunk_size)
    }
}

pub(crate) fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(XmlError::InvalidConfig {
            message: "read chunk size must be greater than zero".to_string(),
        });
    }
    Ok(())
}
