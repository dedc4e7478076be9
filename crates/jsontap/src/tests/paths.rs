use alloc::{string::ToString, vec, vec::Vec};

use super::recording::{events, Event};
use crate::{Map, Value};

fn without_chunks(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| !matches!(e, Event::Chunk { .. }))
        .collect()
}

fn object(entries: &[(&str, Value)]) -> Value {
    let mut map = Map::new();
    for (k, v) in entries {
        map.insert((*k).to_string(), v.clone());
    }
    Value::Object(map)
}

#[test]
fn arrays_of_objects_nest_paths_by_field_name() {
    let ev = without_chunks(events(
        r#"{"sections":[{"heading":"Intro","references":[{"title":"RFC"}]}]}"#,
    ));

    let reference = object(&[("title", Value::String("RFC".to_string()))]);
    let section = object(&[
        ("heading", Value::String("Intro".to_string())),
        (
            "references",
            Value::Array(vec![reference.clone()]),
        ),
    ]);

    assert_eq!(
        ev,
        vec![
            Event::FieldStart {
                path: "".to_string(),
                field: "sections".to_string(),
            },
            Event::ItemStart {
                path: "".to_string(),
                field: "sections".to_string(),
            },
            Event::FieldStart {
                path: "/sections".to_string(),
                field: "heading".to_string(),
            },
            Event::FieldEnd {
                path: "/sections".to_string(),
                field: "heading".to_string(),
                raw: "Intro".to_string(),
                parsed: Some(Value::String("Intro".to_string())),
            },
            Event::FieldStart {
                path: "/sections".to_string(),
                field: "references".to_string(),
            },
            Event::ItemStart {
                path: "/sections".to_string(),
                field: "references".to_string(),
            },
            Event::FieldStart {
                path: "/sections/references".to_string(),
                field: "title".to_string(),
            },
            Event::FieldEnd {
                path: "/sections/references".to_string(),
                field: "title".to_string(),
                raw: "RFC".to_string(),
                parsed: Some(Value::String("RFC".to_string())),
            },
            Event::ItemEnd {
                path: "/sections".to_string(),
                field: "references".to_string(),
                item: Some(reference.clone()),
            },
            Event::FieldEnd {
                path: "/sections".to_string(),
                field: "references".to_string(),
                raw: r#"{"title":"RFC"}"#.to_string(),
                parsed: Some(Value::Array(vec![reference])),
            },
            Event::ItemEnd {
                path: "".to_string(),
                field: "sections".to_string(),
                item: Some(section.clone()),
            },
            Event::FieldEnd {
                path: "".to_string(),
                field: "sections".to_string(),
                raw: r#"{"heading":"Intro","references":[{"title":"RFC"}]}"#.to_string(),
                parsed: Some(Value::Array(vec![section])),
            },
        ]
    );
}

#[test]
fn root_array_objects_report_slash_paths_and_no_item_events() {
    let ev = events(r#"[{"x":1},{"y":2}]"#);
    assert!(ev.contains(&Event::FieldEnd {
        path: "/".to_string(),
        field: "x".to_string(),
        raw: "1".to_string(),
        parsed: Some(Value::Number(1.0)),
    }));
    assert!(ev.contains(&Event::FieldEnd {
        path: "/".to_string(),
        field: "y".to_string(),
        raw: "2".to_string(),
        parsed: Some(Value::Number(2.0)),
    }));
    // The root array has no field name, so no item callbacks fire for it.
    assert!(!ev
        .iter()
        .any(|e| matches!(e, Event::ItemStart { .. } | Event::ItemEnd { .. })));
}

#[test]
fn deep_object_nesting_joins_paths_with_slashes() {
    let ev = events(r#"{"a":{"b":{"c":[1]}}}"#);
    assert!(ev.contains(&Event::FieldStart {
        path: "/a/b".to_string(),
        field: "c".to_string(),
    }));
    assert!(ev.contains(&Event::ItemEnd {
        path: "/a/b".to_string(),
        field: "c".to_string(),
        item: Some(Value::Number(1.0)),
    }));
    assert!(ev.contains(&Event::FieldEnd {
        path: "/a/b".to_string(),
        field: "c".to_string(),
        raw: "1".to_string(),
        parsed: Some(Value::Array(vec![Value::Number(1.0)])),
    }));
}
