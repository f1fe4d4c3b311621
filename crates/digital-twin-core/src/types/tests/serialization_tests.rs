//! Tests for sub-state serde behavior.

use serde_json::json;

use crate::types::{
    CognitiveState, NeurotransmitterInput, NeurotransmitterState, PsychologicalInput,
    PsychologicalState,
};

#[test]
fn test_serialize_uses_field_names() {
    let psych = PsychologicalState::new(PsychologicalInput {
        mood_valence: -0.5,
        rumination: 0.25,
        ..Default::default()
    })
    .unwrap();

    let value = serde_json::to_value(&psych).unwrap();
    assert_eq!(value["mood_valence"], json!(-0.5));
    assert_eq!(value["rumination"], json!(0.25));
    assert!(value["cognitive_distortions"].as_object().unwrap().is_empty());
}

#[test]
fn test_deserialize_round_trip() {
    let mut input = NeurotransmitterInput {
        serotonin: -0.5,
        dopamine: 0.25,
        ..Default::default()
    };
    input.circuit_connectivity.insert("dmn".into(), 0.8);
    let nt = NeurotransmitterState::new(input).unwrap();

    let json = serde_json::to_string(&nt).unwrap();
    let back: NeurotransmitterState = serde_json::from_str(&json).unwrap();
    assert_eq!(nt, back);
}

#[test]
fn test_deserialize_missing_fields_default() {
    let cog: CognitiveState = serde_json::from_value(json!({ "attention": 0.5 })).unwrap();
    assert_eq!(cog.attention(), 0.5);
    assert_eq!(cog.insight(), 0.0);
}

#[test]
fn test_deserialize_rejects_out_of_range() {
    let result: Result<NeurotransmitterState, _> =
        serde_json::from_value(json!({ "serotonin": 1.5 }));
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("serotonin"), "{msg}");
}

#[test]
fn test_deserialize_rejects_unknown_field() {
    let result: Result<CognitiveState, _> = serde_json::from_value(json!({ "wisdom": 0.5 }));
    assert!(result.is_err());
}
