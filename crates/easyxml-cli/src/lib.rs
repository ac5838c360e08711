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

//! EasyXML CLI library.
//!
//! The binary is a thin shell over this library so that the commands can be
//! exercised from tests.
//!
//! # Commands
//!
//! - **catalog**: Load a CD catalog document and print it as JSON
//! - **bench**: Load a CD catalog repeatedly and report throughput
//!
//! # Examples
//!
//! ```no_run
//! use easyxml_cli::catalog::Catalog;
//!
//! # fn main() -> Result<(), easyxml_cli::error::CliError> {
//! let catalog = Catalog::load("cd_catalog.xml")?;
//! println!("{} CDs", catalog.cds.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod error;

pub use error::CliError;
