use alloc::{string::ToString, vec, vec::Vec};

use super::recording::{events, Event};
use crate::{Map, Value};

fn item_ends(events: &[Event]) -> Vec<Option<Value>> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::ItemEnd { item, .. } => Some(item.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn string_items_chunk_under_the_array_path() {
    let ev = events(r#"{"tags":["x","y"]}"#);
    assert_eq!(
        ev,
        vec![
            Event::FieldStart {
                path: "".to_string(),
                field: "tags".to_string(),
            },
            Event::Chunk {
                path: "/tags".to_string(),
                field: "tags".to_string(),
                chunk: 'x',
            },
            Event::ItemEnd {
                path: "".to_string(),
                field: "tags".to_string(),
                item: Some(Value::String("x".to_string())),
            },
            Event::Chunk {
                path: "/tags".to_string(),
                field: "tags".to_string(),
                chunk: 'y',
            },
            Event::ItemEnd {
                path: "".to_string(),
                field: "tags".to_string(),
                item: Some(Value::String("y".to_string())),
            },
            Event::FieldEnd {
                path: "".to_string(),
                field: "tags".to_string(),
                raw: r#""x","y""#.to_string(),
                parsed: Some(Value::Array(vec![
                    Value::String("x".to_string()),
                    Value::String("y".to_string()),
                ])),
            },
        ]
    );
}

#[test]
fn primitive_items_restart_the_field_and_end_individually() {
    let ev = events(r#"{"nums":[1,2,3]}"#);
    let starts = ev
        .iter()
        .filter(|e| {
            matches!(e, Event::FieldStart { path, field }
                if path.is_empty() && field == "nums")
        })
        .count();
    // One start when the array opens, then one per primitive item.
    assert_eq!(starts, 4);
    assert_eq!(
        item_ends(&ev),
        vec![
            Some(Value::Number(1.0)),
            Some(Value::Number(2.0)),
            Some(Value::Number(3.0)),
        ]
    );
    assert!(ev.contains(&Event::FieldEnd {
        path: "".to_string(),
        field: "nums".to_string(),
        raw: "1,2,3".to_string(),
        parsed: Some(Value::Array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ])),
    }));
}

#[test]
fn object_items_report_start_and_end_once_each() {
    let ev = events(r#"{"items":[{"id":1},{"id":2}]}"#);

    let starts = ev
        .iter()
        .filter(|e| matches!(e, Event::ItemStart { .. }))
        .count();
    assert_eq!(starts, 2);

    let mut first = Map::new();
    first.insert("id".to_string(), Value::Number(1.0));
    let mut second = Map::new();
    second.insert("id".to_string(), Value::Number(2.0));
    assert_eq!(
        item_ends(&ev),
        vec![
            Some(Value::Object(first.clone())),
            Some(Value::Object(second.clone())),
        ]
    );

    // Inner fields resolve against the array's path.
    assert!(ev.contains(&Event::FieldEnd {
        path: "/items".to_string(),
        field: "id".to_string(),
        raw: "2".to_string(),
        parsed: Some(Value::Number(2.0)),
    }));

    assert!(ev.contains(&Event::FieldEnd {
        path: "".to_string(),
        field: "items".to_string(),
        raw: r#"{"id":1},{"id":2}"#.to_string(),
        parsed: Some(Value::Array(vec![
            Value::Object(first),
            Value::Object(second),
        ])),
    }));
}

#[test]
fn empty_object_item_starts_but_never_ends() {
    let ev = events(r#"{"items":[{}]}"#);
    assert!(ev.contains(&Event::ItemStart {
        path: "".to_string(),
        field: "items".to_string(),
    }));
    assert!(!ev.iter().any(|e| matches!(e, Event::ItemEnd { .. })));
    assert!(ev.contains(&Event::FieldEnd {
        path: "".to_string(),
        field: "items".to_string(),
        raw: "{}".to_string(),
        parsed: Some(Value::Array(vec![Value::Object(Map::new())])),
    }));
}

#[test]
fn mixed_item_kinds_each_fire_exactly_once() {
    let ev = events(r#"{"mix":[1,"a",{"b":2},[3]]}"#);

    let mut obj = Map::new();
    obj.insert("b".to_string(), Value::Number(2.0));

    // Composite items never double-fire at the following separator. The
    // final entry is the primitive inside the anonymous nested array; the
    // nested array itself gets no item event.
    assert_eq!(
        item_ends(&ev),
        vec![
            Some(Value::Number(1.0)),
            Some(Value::String("a".to_string())),
            Some(Value::Object(obj.clone())),
            Some(Value::Number(3.0)),
        ]
    );

    // Anonymous nested arrays have no recorded start, so their own
    // field_end carries no payload.
    assert!(ev.contains(&Event::FieldEnd {
        path: "/mix".to_string(),
        field: "".to_string(),
        raw: "".to_string(),
        parsed: None,
    }));

    assert!(ev.contains(&Event::FieldEnd {
        path: "".to_string(),
        field: "mix".to_string(),
        raw: r#"1,"a",{"b":2},[3]"#.to_string(),
        parsed: Some(Value::Array(vec![
            Value::Number(1.0),
            Value::String("a".to_string()),
            Value::Object(obj),
            Value::Array(vec![Value::Number(3.0)]),
        ])),
    }));
}

#[test]
fn whitespace_between_items_is_tolerated() {
    let compact = events(r#"{"xs":[1,2]}"#);
    let spaced = events("{\"xs\": [ 1 , 2 ] }");
    let compact_items: Vec<_> = item_ends(&compact);
    let spaced_items: Vec<_> = item_ends(&spaced);
    assert_eq!(compact_items, spaced_items);
}
