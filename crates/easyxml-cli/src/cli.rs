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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Load a CD catalog and print it as JSON
    ///
    /// Element and attribute names are matched case-insensitively, so both
    /// `<CATALOG><CD>` and `<catalog><cd>` documents load.
    Catalog {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Measure catalog loading throughput
    ///
    /// Loads the catalog repeatedly and reports file size, total bytes
    /// parsed, elapsed time and average time per load.
    Bench {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Number of loads to time
        #[arg(short = 'n', long, default_value = "100")]
        iterations: u32,
    },
}

impl Commands {
    /// Execute the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read, is malformed, or output
    /// cannot be serialized.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Catalog { file, pretty } => commands::catalog(&file, pretty),
            Commands::Bench { file, iterations } => commands::bench(&file, iterations),
        }
    }
}
