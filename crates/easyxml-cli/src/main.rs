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

//! EasyXML Command Line Interface

use clap::Parser;
use easyxml_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// EasyXML - path-keyed streaming XML dispatch
///
/// Loads documents through handler scopes and reports what was found.
///
/// # Examples
///
/// ```bash
/// # Load a CD catalog and print it as JSON
/// easyxml catalog cd_catalog.xml --pretty
///
/// # Measure dispatch throughput
/// easyxml bench cd_catalog.xml --iterations 500
///
/// # Show scope transitions while parsing
/// easyxml -vv catalog cd_catalog.xml
/// ```
#[derive(Parser)]
#[command(name = "easyxml")]
#[command(author, version, about = "EasyXML - path-keyed streaming XML dispatch", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("easyxml={level},easyxml_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
