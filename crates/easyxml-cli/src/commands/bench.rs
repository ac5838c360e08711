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

//! Bench command - repeated catalog loading with throughput report

use crate::catalog::Catalog;
use crate::error::CliError;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Timing summary for repeated loads of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    /// Size of the input file in bytes
    pub file_size: u64,
    /// Number of completed loads
    pub iterations: u32,
    /// Total wall-clock time of all loads
    pub elapsed: Duration,
}

impl BenchReport {
    /// Bytes parsed across all iterations.
    pub fn total_bytes(&self) -> u64 {
        self.file_size * u64::from(self.iterations)
    }

    /// Average time per load, in milliseconds.
    pub fn average_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0 / f64::from(self.iterations)
    }

    /// Throughput in KiB per second.
    pub fn throughput_kib(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total_bytes() as f64 / 1024.0 / secs
    }
}

/// Load the catalog at `file` `iterations` times and print a report.
///
/// # Errors
///
/// Returns `Err` if `iterations` is zero or any load fails.
pub fn bench(file: &str, iterations: u32) -> Result<(), CliError> {
    let report = run(Path::new(file), iterations)?;

    println!(
        "Parsed a {} bytes file {} times in {:.3} msec (average {:.3} msec per operation)",
        report.file_size,
        report.iterations,
        report.elapsed.as_secs_f64() * 1000.0,
        report.average_ms()
    );
    println!("Total content parsed: {} bytes", report.total_bytes());
    println!("Average throughput: {:.1} KB/sec", report.throughput_kib());
    Ok(())
}

fn run(path: &Path, iterations: u32) -> Result<BenchReport, CliError> {
    if iterations == 0 {
        return Err(CliError::InvalidArgument(
            "iterations must be at least 1".to_string(),
        ));
    }

    let file_size = std::fs::metadata(path)
        .map_err(|e| CliError::io_error(path, e))?
        .len();

    info!(path = %path.display(), iterations, "benchmarking catalog load");

    let start = Instant::now();
    for _ in 0..iterations {
        Catalog::load(path)?;
    }

    Ok(BenchReport {
        file_size,
        iterations,
        elapsed: start.elapsed(),
    })
}
