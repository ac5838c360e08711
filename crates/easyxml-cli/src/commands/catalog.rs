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

//! Catalog command - load a CD catalog and print it as JSON

use crate::catalog::Catalog;
use crate::error::CliError;

/// Load the catalog at `file` and write it to stdout as JSON.
///
/// # Errors
///
/// Returns `Err` if the file cannot be loaded or serialized.
pub fn catalog(file: &str, pretty: bool) -> Result<(), CliError> {
    let catalog = Catalog::load(file)?;

    let output = if pretty {
        serde_json::to_string_pretty(&catalog)?
    } else {
        serde_json::to_string(&catalog)?
    };

    println!("{}", output);
    Ok(())
}
