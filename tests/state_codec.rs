use ferrite_visu::codec::state::{decode, encode};
use ferrite_visu::{CompactEntry, FormatError, StateFormat, StateModel, StateValues, Topology};

const SCENARIO_B: &str = "3 2 3 1 compact 1 0 0 0.75 2 0 1 -0.9";

#[test]
fn scenario_b_decodes_two_compact_entries() {
    let state = decode(SCENARIO_B, None).unwrap();
    assert_eq!(state.topology().layer_sizes(), &[2, 3, 1]);
    assert_eq!(state.format(), StateFormat::Compact);
    assert_eq!(
        state.compact_entries().unwrap(),
        &[
            CompactEntry { layer: 1, i: 0, j: 0, value: 0.75 },
            CompactEntry { layer: 2, i: 0, j: 1, value: -0.9 },
        ]
    );
    assert_eq!(encode(&state), SCENARIO_B);
}

#[test]
fn full_state_round_trips_exactly() {
    let text = "3 2 3 1 full 0.1 0.2 -0.3 0.4 0.5 0.6";
    let state = decode(text, None).unwrap();
    assert_eq!(state.format(), StateFormat::Full);
    assert_eq!(
        state.values(),
        &StateValues::Full(vec![vec![0.1, 0.2], vec![-0.3, 0.4, 0.5], vec![0.6]])
    );
    assert_eq!(encode(&state), text);
    assert_eq!(decode(&encode(&state), None).unwrap(), state);
}

#[test]
fn compact_entries_keep_insertion_order() {
    let topology = Topology::new(vec![2, 3, 1]).unwrap();
    let entries = vec![
        CompactEntry { layer: 2, i: 0, j: 2, value: 1.5 },
        CompactEntry { layer: 0, i: 1, j: 0, value: -0.25 },
        CompactEntry { layer: 1, i: 2, j: 1, value: 3.0 },
    ];
    let state = StateModel::compact(topology, entries.clone()).unwrap();
    let back = decode(&encode(&state), Some(StateFormat::Compact)).unwrap();
    assert_eq!(back.compact_entries().unwrap(), entries.as_slice());
    assert_eq!(back, state);
}

#[test]
fn empty_compact_state_is_allowed() {
    let state = decode("2 1 1 compact", None).unwrap();
    assert_eq!(state.value_count(), 0);
    assert_eq!(encode(&state), "2 1 1 compact");
}

#[test]
fn unknown_discriminator_is_rejected() {
    assert_eq!(
        decode("2 1 1 sparse 1 0 0 0.5", None),
        Err(FormatError::UnknownStateFormat("sparse".to_owned()))
    );
    // the legacy dump without a discriminator is not accepted either
    assert!(matches!(decode("2 1 1 0.5 0.5", None), Err(FormatError::UnknownStateFormat(_))));
}

#[test]
fn missing_discriminator_is_truncated_input() {
    assert!(matches!(
        decode("2 1 1", None),
        Err(FormatError::TruncatedInput { position: 3, expected: "state format" })
    ));
}

#[test]
fn expected_format_is_enforced() {
    assert_eq!(
        decode("2 1 1 full 0.5 0.5", Some(StateFormat::Compact)),
        Err(FormatError::UnexpectedStateFormat {
            expected: StateFormat::Compact,
            found: StateFormat::Full,
        })
    );
    assert!(decode("2 1 1 full 0.5 0.5", Some(StateFormat::Full)).is_ok());
}

#[test]
fn full_state_must_cover_every_node() {
    assert!(matches!(
        decode("3 2 3 1 full 0.1 0.2 0.3", None),
        Err(FormatError::TopologyMismatch { expected: 6, found: 3, .. })
    ));
    assert!(matches!(
        decode("2 1 1 full 0.1 0.2 0.3", None),
        Err(FormatError::TopologyMismatch { expected: 2, found: 3, .. })
    ));
}

#[test]
fn partial_compact_quadruple_is_truncated_input() {
    assert!(matches!(
        decode("3 2 3 1 compact 1 0 0", None),
        Err(FormatError::TruncatedInput { position: 8, expected: "entry value" })
    ));
}

#[test]
fn compact_entry_must_name_an_existing_node() {
    assert_eq!(
        decode("3 2 3 1 compact 1 3 0 0.5", None),
        Err(FormatError::NodeOutOfRange { layer: 1, node: 3 })
    );
    assert_eq!(
        decode("3 2 3 1 compact 3 0 0 0.5", None),
        Err(FormatError::NodeOutOfRange { layer: 3, node: 0 })
    );
}

#[test]
fn compact_fields_must_be_numeric() {
    assert!(matches!(
        decode("3 2 3 1 compact 1 a 0 0.5", None),
        Err(FormatError::NotANumber { position: 6, .. })
    ));
    assert!(matches!(
        decode("3 2 3 1 compact 1 0 0 high", None),
        Err(FormatError::NotANumber { position: 8, .. })
    ));
}

#[test]
fn json_projection_matches_the_text_model() {
    let state = decode(SCENARIO_B, None).unwrap();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["format"], "compact");
    assert_eq!(json["layers"], serde_json::json!([2, 3, 1]));
    assert_eq!(json["values"][1]["value"], -0.9);
    let back: StateModel = serde_json::from_value(json).unwrap();
    assert_eq!(encode(&back), SCENARIO_B);
}

#[test]
fn overflowing_full_topology_is_a_typed_error() {
    let text = format!("2 {} 1 full", usize::MAX);
    assert!(matches!(
        decode(&text, None),
        Err(FormatError::TopologyMismatch { expected: usize::MAX, found: 0, .. })
    ));
    let text = format!("3 {} {} 2 full 0.5", usize::MAX / 2, usize::MAX / 2);
    assert!(matches!(decode(&text, None), Err(FormatError::TopologyMismatch { found: 1, .. })));
}

#[test]
fn huge_compact_layer_allocates_nothing_up_front() {
    let text = format!("2 {} 1 compact 0 7 0 0.5", usize::MAX);
    let state = decode(&text, None).unwrap();
    assert_eq!(state.value_count(), 1);
    assert_eq!(encode(&state), text);
}
