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

//! CD catalog document model.
//!
//! A catalog is a `<catalog>` root holding `<cd>` records with `title`,
//! `artist`, `country`, `company`, `price` and `year` children. Names are
//! matched case-insensitively.

use crate::error::CliError;
use easyxml::{Dispatcher, DispatcherConfig, HandlerScope};
use serde::Serialize;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

/// One record of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cd {
    pub title: String,
    pub artist: String,
    pub country: String,
    pub company: String,
    pub price: f64,
    pub year: i64,
}

/// All records of a catalog document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub cds: Vec<Cd>,
}

type Records = Rc<RefCell<Vec<Cd>>>;

impl Catalog {
    /// Load the catalog document at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read or is not well-formed XML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let records: Records = Rc::new(RefCell::new(Vec::new()));

        let mut dispatcher = catalog_dispatcher(&records);
        dispatcher.parse_file(path)?;

        let cds = std::mem::take(&mut *records.borrow_mut());
        debug!(path = %path.display(), cds = cds.len(), "catalog loaded");
        Ok(Self { cds })
    }

    /// Load a catalog from an in-memory document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the document is not well-formed XML.
    pub fn parse(xml: &str) -> Result<Self, CliError> {
        let records: Records = Rc::new(RefCell::new(Vec::new()));

        let mut dispatcher = catalog_dispatcher(&records);
        dispatcher.parse(xml)?;

        let cds = std::mem::take(&mut *records.borrow_mut());
        Ok(Self { cds })
    }
}

fn catalog_dispatcher(records: &Records) -> Dispatcher {
    let mut dispatcher = Dispatcher::with_config(DispatcherConfig {
        case_folding: true,
        ..Default::default()
    });

    let records = Rc::clone(records);
    dispatcher.nest("catalog/cd", move |cd| {
        let index = {
            let mut records = records.borrow_mut();
            records.push(Cd::default());
            records.len() - 1
        };

        field(cd, &records, index, "title", |cd, text| cd.title = text.to_string());
        field(cd, &records, index, "artist", |cd, text| cd.artist = text.to_string());
        field(cd, &records, index, "country", |cd, text| cd.country = text.to_string());
        field(cd, &records, index, "company", |cd, text| cd.company = text.to_string());
        field(cd, &records, index, "price", |cd, text| cd.price = parse_float(text));
        field(cd, &records, index, "year", |cd, text| cd.year = parse_int(text));
    });

    dispatcher
}

fn field<F>(scope: &mut HandlerScope, records: &Records, index: usize, name: &str, set: F)
where
    F: Fn(&mut Cd, &str) + 'static,
{
    let records = Rc::clone(records);
    scope.text(name, move |text| {
        if let Some(cd) = records.borrow_mut().get_mut(index) {
            set(cd, text);
        }
    });
}

/// Leading decimal number of `text`, or zero.
fn parse_float(text: &str) -> f64 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().unwrap_or_default()
}

/// Leading integer of `text`, or zero.
fn parse_int(text: &str) -> i64 {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().unwrap_or_default()
}
