use crate::{Blueprint, ErrorKind, Kind, TraversalPolicy, tests::conformance};

#[test]
fn test_blueprint_cons_from_json() {
    let blueprint = Blueprint::from_json(
        r#"{ "kind": "cons", "window": 3,
             "source": { "kind": "range", "first": 0, "last": 4 } }"#,
    )
    .unwrap();
    let mut it = blueprint.build().unwrap();
    assert_eq!(it.kind(), Kind::Cons);
    let windows = conformance::drain(&mut it)
        .into_iter()
        .map(|c| c.to_vec())
        .collect::<Vec<_>>();
    assert_eq!(windows, vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]);
}

#[test]
fn test_blueprint_nested_graph() {
    let json = r#"{
        "kind": "product",
        "children": [
            { "kind": "repeat", "count": 2, "source": { "kind": "index", "values": [7, 3] } },
            { "kind": "composition",
              "source": { "kind": "hilbert2d", "order": 2 },
              "indexer": { "kind": "range", "first": 0, "last": 15, "step": 5 } }
        ]
    }"#;
    let it = Blueprint::from_json(json).unwrap().build().unwrap();
    assert_eq!(it.dimension(), 3);
    assert_eq!(it.size().unwrap(), 16);
    conformance::check_all(&it);
}

#[test]
fn test_blueprint_tleaf() {
    let blueprint = Blueprint::from_json(
        r#"{ "kind": "tleaf", "arities": [3, 2, 4], "policy": "scatter" }"#,
    )
    .unwrap();
    match &blueprint {
        Blueprint::Tleaf {
            policy,
            level_indexers,
            ..
        } => {
            assert_eq!(policy, &TraversalPolicy::Scatter);
            assert!(level_indexers.is_none());
        }
        other => panic!("unexpected blueprint {other:?}"),
    }
    let mut it = blueprint.build().unwrap();
    let values = conformance::drain_values(&mut it);
    assert_eq!(&values[..4], &[0, 8, 16, 4]);

    let pruned = Blueprint::Tleaf {
        arities: vec![2, 4],
        level_indexers: Some(vec![
            Blueprint::Range {
                first: 0,
                last: 1,
                step: 1,
            },
            Blueprint::Index { values: vec![3, 1] },
        ]),
        policy: TraversalPolicy::default(),
    };
    let mut it = pruned.build().unwrap();
    assert_eq!(conformance::drain_values(&mut it), vec![3, 1, 7, 5]);
}

#[test]
fn test_blueprint_json_roundtrip() {
    let blueprint = Blueprint::Loop {
        source: Box::new(Blueprint::Range {
            first: 5,
            last: -5,
            step: -5,
        }),
        count: 2,
    };
    let json = blueprint.to_json().unwrap();
    assert!(json.contains(r#""kind":"loop""#));
    assert_eq!(Blueprint::from_json(&json).unwrap(), blueprint);
}

#[test]
fn test_blueprint_errors() {
    let err = Blueprint::from_json("{ not json").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

    let err = Blueprint::from_json(r#"{ "kind": "spiral" }"#).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));

    // Well-formed but semantically invalid.
    let blueprint = Blueprint::from_json(r#"{ "kind": "range", "first": 0, "last": 3, "step": 0 }"#)
        .unwrap();
    assert!(blueprint.build().unwrap_err().is_invalid_arg());
}
