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

use easyxml::{normalize_name, Arguments, Binding, Dispatcher, DispatcherConfig, Handler, XmlError};
use std::cell::RefCell;
use std::rc::Rc;

const CATS: &str = include_str!("fixtures/cats.xml");

// =============================================================================
// Cats document model
// =============================================================================

#[derive(Debug, Default)]
struct Cats {
    cats: Vec<Cat>,
    notes: Option<String>,
}

#[derive(Debug, Default)]
struct Cat {
    name: String,
    kittens: Vec<String>,
    status: Option<String>,
}

type Shared<T> = Rc<RefCell<T>>;

fn shared() -> Shared<Cats> {
    Rc::new(RefCell::new(Cats::default()))
}

/// Record a cat and wire its child scope for kittens and the `#end` marker.
fn on_cat(model: &Shared<Cats>, args: &mut Arguments) {
    let name = args["name"].to_string();
    let index = {
        let mut model = model.borrow_mut();
        model.cats.push(Cat {
            name,
            ..Default::default()
        });
        model.cats.len() - 1
    };

    let Some(cat) = args.scope() else {
        return;
    };

    let sink = Rc::clone(model);
    cat.element("kitten", Binding::new().required("name"), move |args| {
        sink.borrow_mut().cats[index]
            .kittens
            .push(args["name"].to_string());
    });

    let sink = Rc::clone(model);
    cat.end("", move || {
        sink.borrow_mut().cats[index].status = Some("happy".to_string());
    });
}

fn assert_cats(model: &Cats) {
    assert_eq!(model.cats.len(), 2, "document contains 2 cats");

    assert_eq!(model.cats[0].name, "whiskers");
    assert_eq!(model.cats[0].kittens, vec!["mittens"], "first cat has 1 kitten");
    assert_eq!(model.cats[0].status.as_deref(), Some("happy"));

    assert_eq!(model.cats[1].name, "tinker");
    assert_eq!(model.cats[1].kittens, vec!["binky"], "second cat has 1 kitten");
    assert_eq!(model.cats[1].status.as_deref(), Some("happy"));

    assert_eq!(model.notes.as_deref(), Some("Hello World"));
}

fn cat_binding(path: &str) -> Binding {
    Binding::with_child_scope(normalize_name(path)).required("name")
}

// =============================================================================
// Matching strategies
// =============================================================================

#[test]
fn test_nested_scopes() {
    let model = shared();
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&model);
    dispatcher.nest("cats", move |cats| {
        let on = Rc::clone(&sink);
        cats.element("cat", cat_binding("cat"), move |args| on_cat(&on, args));

        let on = Rc::clone(&sink);
        cats.nest("notes", move |notes| {
            let on = Rc::clone(&on);
            notes.text("", move |text| on.borrow_mut().notes = Some(text.to_string()));
        });
    });

    dispatcher.parse(CATS).unwrap();
    assert_cats(&model.borrow());
}

#[test]
fn test_multi_level_keys() {
    let model = shared();
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&model);
    dispatcher.nest("cats", move |cats| {
        let on = Rc::clone(&sink);
        cats.element("cat", cat_binding("cat"), move |args| on_cat(&on, args));

        let on = Rc::clone(&sink);
        cats.text("notes", move |text| on.borrow_mut().notes = Some(text.to_string()));
    });

    dispatcher.parse(CATS).unwrap();
    assert_cats(&model.borrow());
}

#[test]
fn test_flat_keys() {
    let model = shared();
    let mut dispatcher = Dispatcher::new();

    let on = Rc::clone(&model);
    dispatcher.element("cats/cat", cat_binding("cats/cat"), move |args| on_cat(&on, args));

    let on = Rc::clone(&model);
    dispatcher.text("cats/notes", move |text| on.borrow_mut().notes = Some(text.to_string()));

    dispatcher.parse(CATS).unwrap();
    assert_cats(&model.borrow());
}

#[test]
fn test_string_keys_through_set() {
    let model = shared();
    let mut dispatcher = Dispatcher::new();

    let on = Rc::clone(&model);
    dispatcher
        .set(
            "cats/cat",
            Handler::element(cat_binding("cats/cat"), move |args| on_cat(&on, args)),
        )
        .unwrap();

    let on = Rc::clone(&model);
    dispatcher
        .set(
            "cats/notes#text",
            Handler::text(move |text| on.borrow_mut().notes = Some(text.to_string())),
        )
        .unwrap();

    dispatcher.parse(CATS).unwrap();
    assert_cats(&model.borrow());
}

#[test]
fn test_dispatcher_is_reusable() {
    let model = shared();
    let mut dispatcher = Dispatcher::new();

    let on = Rc::clone(&model);
    dispatcher.element("cats/cat", cat_binding("cats/cat"), move |args| on_cat(&on, args));

    dispatcher.parse(CATS).unwrap();
    dispatcher.parse(CATS).unwrap();

    let names: Vec<_> = model.borrow().cats.iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["whiskers", "tinker", "whiskers", "tinker"]);
}

// =============================================================================
// Handler table
// =============================================================================

#[test]
fn test_handler_table_management() {
    let mut dispatcher = Dispatcher::new();

    assert!(!dispatcher.has("foo"), "handler is not defined");

    dispatcher.set("foo", Handler::element(Binding::new(), |_| {})).unwrap();
    assert!(dispatcher.has("foo"), "handler is defined");
    assert_eq!(dispatcher.get("foo").unwrap().kind(), "element");

    assert!(dispatcher.remove("foo").is_some());
    assert!(!dispatcher.has("foo"), "handler was removed");
}

#[test]
fn test_handler_kind_mismatch() {
    let mut dispatcher = Dispatcher::new();

    let err = dispatcher.set("foo#end", Handler::text(|_| {})).unwrap_err();
    assert!(matches!(
        err,
        XmlError::InvalidHandler {
            expected: "end",
            found: "text",
            ..
        }
    ));
    assert!(!dispatcher.has("foo#end"));
}

#[test]
fn test_undefined_handler() {
    let dispatcher = Dispatcher::new();

    let err = dispatcher.get("foo").unwrap_err();
    assert!(matches!(err, XmlError::UndefinedHandler { .. }));
    assert_eq!(err.to_string(), "undefined handler: foo");
}

// =============================================================================
// Attribute binding
// =============================================================================

#[test]
fn test_default_fills_missing_attribute() {
    let seen = Rc::new(RefCell::new(None));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.element("foo", Binding::new().optional("bar", "baz"), move |args| {
        *sink.borrow_mut() = Some(args["bar"].to_string());
    });

    dispatcher.parse("<foo/>").unwrap();
    assert_eq!(seen.borrow().as_deref(), Some("baz"));

    dispatcher.parse(r#"<foo bar="qux"/>"#).unwrap();
    assert_eq!(seen.borrow().as_deref(), Some("qux"));
}

#[test]
fn test_missing_required_attribute() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.element("foo", Binding::new().required("bar"), |_| {});

    let err = dispatcher.parse("<foo/>").unwrap_err();
    match &err {
        XmlError::MissingArgument { param, path, .. } => {
            assert_eq!(param, "bar");
            assert_eq!(path, "foo");
        }
        other => panic!("expected MissingArgument, got {other:?}"),
    }
    assert!(err.to_string().contains("dispatch_tests.rs"));
}

#[test]
fn test_attribute_names_normalized() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.element(
        "item",
        Binding::new().required("data_id").required("xml_lang"),
        move |args| {
            let mut seen = sink.borrow_mut();
            seen.push(args["data_id"].to_string());
            seen.push(args["xml_lang"].to_string());
        },
    );

    dispatcher
        .parse(r#"<item data-id="7" xml:lang="en"/>"#)
        .unwrap();
    assert_eq!(*seen.borrow(), vec!["7", "en"]);
}

#[test]
fn test_undeclared_attributes_ignored() {
    let calls = Rc::new(RefCell::new(0));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&calls);
    dispatcher.element("foo", Binding::new(), move |args| {
        assert!(args.is_empty());
        *sink.borrow_mut() += 1;
    });

    dispatcher.parse(r#"<foo a="1" b="2"/>"#).unwrap();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_mismatched_scope_name_falls_back_to_attribute() {
    let seen = Rc::new(RefCell::new(None));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.element("foo", Binding::with_child_scope("other"), move |args| {
        *sink.borrow_mut() = Some((args.has_scope(), args["other"].to_string()));
    });

    dispatcher.parse(r#"<foo other="x"/>"#).unwrap();
    assert_eq!(*seen.borrow(), Some((false, "x".to_string())));

    let err = dispatcher.parse("<foo/>").unwrap_err();
    assert!(matches!(err, XmlError::MissingArgument { .. }));
}

// =============================================================================
// Case folding
// =============================================================================

#[derive(Debug, Default, PartialEq)]
struct Seen {
    lower_elem: bool,
    lower_attr: bool,
    upper_elem: bool,
    upper_attr: bool,
}

#[test]
fn test_case_folding() {
    let seen = Rc::new(RefCell::new(Seen::default()));
    let mut dispatcher = Dispatcher::with_config(DispatcherConfig {
        case_folding: true,
        ..Default::default()
    });

    let sink = Rc::clone(&seen);
    dispatcher.nest("root", move |root| {
        let on = Rc::clone(&sink);
        root.element("foo", Binding::new().required("bar"), move |args| {
            let mut seen = on.borrow_mut();
            seen.lower_elem = true;
            seen.lower_attr = &args["bar"] == "baz";
        });

        let on = Rc::clone(&sink);
        root.element("bam", Binding::new().required("blam"), move |args| {
            let mut seen = on.borrow_mut();
            seen.upper_elem = true;
            seen.upper_attr = &args["blam"] == "BLAZ";
        });
    });

    dispatcher
        .parse(r#"<root><foo bar="baz"/><BAM BLAM="BLAZ"/></root>"#)
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        Seen {
            lower_elem: true,
            lower_attr: true,
            upper_elem: true,
            upper_attr: true,
        }
    );
}

#[test]
fn test_case_sensitive_matching() {
    let seen = Rc::new(RefCell::new(Seen::default()));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.nest("root", move |root| {
        let on = Rc::clone(&sink);
        root.element("foo", Binding::new().required("bar"), move |args| {
            let mut seen = on.borrow_mut();
            seen.lower_elem = true;
            seen.lower_attr = &args["bar"] == "baz";
        });

        let on = Rc::clone(&sink);
        root.element("FOO", Binding::new().required("BAR"), move |args| {
            let mut seen = on.borrow_mut();
            seen.upper_elem = true;
            seen.upper_attr = &args["BAR"] == "BAZ";
        });
    });

    dispatcher
        .parse(r#"<root><foo bar="baz"/><FOO BAR="BAZ"/></root>"#)
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        Seen {
            lower_elem: true,
            lower_attr: true,
            upper_elem: true,
            upper_attr: true,
        }
    );
}

#[test]
fn test_unfolded_upper_case_does_not_match() {
    let calls = Rc::new(RefCell::new(0));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&calls);
    dispatcher.element("root/bam", Binding::new(), move |_| *sink.borrow_mut() += 1);

    dispatcher.parse("<root><BAM/></root>").unwrap();
    assert_eq!(*calls.borrow(), 0);
}

// =============================================================================
// Scope routing
// =============================================================================

#[test]
fn test_unmatched_children_stay_in_parent_scope() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.nest("a", move |a| {
        let on = Rc::clone(&sink);
        a.text("x/y/z", move |text| on.borrow_mut().push(text.to_string()));
    });

    dispatcher.parse("<a><x><y><z>deep</z></y></x></a>").unwrap();
    assert_eq!(*seen.borrow(), vec!["deep"]);
}

#[test]
fn test_handler_registered_during_parse_is_visible() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&seen);
    dispatcher.nest("list", move |list| {
        let on = Rc::clone(&sink);
        list.element("item", Binding::new().required("n"), move |args| {
            on.borrow_mut().push(args["n"].to_string());
        });
    });

    dispatcher
        .parse(r#"<list><item n="1"/><item n="2"/></list><!-- done -->"#)
        .unwrap();
    assert_eq!(*seen.borrow(), vec!["1", "2"]);
}

#[test]
fn test_end_fires_on_unmatched_descendant_close() {
    // An `#end` registered at the scope root fires whenever the scope's path
    // returns to empty, which includes the close of an unmatched child.
    let ends = Rc::new(RefCell::new(0));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&ends);
    dispatcher.nest("a", move |a| {
        let on = Rc::clone(&sink);
        a.end("", move || *on.borrow_mut() += 1);
    });

    dispatcher.parse("<a><b/><c/></a>").unwrap();
    assert_eq!(*ends.borrow(), 2);

    *ends.borrow_mut() = 0;
    dispatcher.parse("<a/>").unwrap();
    assert_eq!(*ends.borrow(), 0);
}

#[test]
fn test_end_fires_when_path_returns() {
    // `doc#end` fires when the path is truncated back to `doc`, i.e. at `</item>`.
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = Dispatcher::new();

    let sink = Rc::clone(&order);
    dispatcher.element("doc/item", Binding::new(), move |_| sink.borrow_mut().push("start"));
    let sink = Rc::clone(&order);
    dispatcher.text("doc/item", move |_| sink.borrow_mut().push("text"));
    let sink = Rc::clone(&order);
    dispatcher.end("doc", move || sink.borrow_mut().push("end"));

    dispatcher.parse("<doc><item>x</item></doc>").unwrap();
    assert_eq!(*order.borrow(), vec!["start", "text", "end"]);
}
