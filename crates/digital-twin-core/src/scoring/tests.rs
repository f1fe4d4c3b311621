//! Calibration and property tests for the derived-metric calculator.
//!
//! Each metric is checked against three reference presentations: absent
//! (`< 0.2`), moderate (`(0.4, 0.7)`) and severe (`> 0.8`).

use std::collections::BTreeMap;

use proptest::prelude::*;

use super::*;
use crate::error::TwinError;
use crate::types::{
    BehavioralInput, BehavioralState, CognitiveInput, CognitiveState, NeurotransmitterInput,
    NeurotransmitterState, PsychologicalInput, PsychologicalState,
};

fn nt(levels: [f32; 5]) -> NeurotransmitterState {
    NeurotransmitterState::new(NeurotransmitterInput {
        serotonin: levels[0],
        dopamine: levels[1],
        norepinephrine: levels[2],
        gaba: levels[3],
        glutamate: levels[4],
        ..Default::default()
    })
    .unwrap()
}

fn depressive(valence: f32, anhedonia: f32, motivation: f32) -> PsychologicalState {
    PsychologicalState::new(PsychologicalInput {
        mood_valence: valence,
        anhedonia,
        motivation,
        ..Default::default()
    })
    .unwrap()
}

fn anxious(anxiety: f32, stress: f32, regulation: f32) -> PsychologicalState {
    PsychologicalState::new(PsychologicalInput {
        anxiety_level: anxiety,
        stress_reactivity: stress,
        emotional_regulation: regulation,
        ..Default::default()
    })
    .unwrap()
}

fn functional(score: f32, activity: f32) -> BehavioralState {
    BehavioralState::new(BehavioralInput {
        sleep_quality: score,
        social_engagement: score,
        self_care: score,
        activity_level: activity,
        ..Default::default()
    })
    .unwrap()
}

// =========================================================================
// Balance index
// =========================================================================

#[test]
fn test_balance_index_neutral_is_exactly_one() {
    let calc = DerivedMetricCalculator::new();
    assert_eq!(calc.balance_index(&NeurotransmitterState::default()), 1.0);
    assert_eq!(calc.balance_index(&nt([0.0; 5])), 1.0);
}

#[test]
fn test_balance_index_moderate_deviation() {
    let calc = DerivedMetricCalculator::new();
    for levels in [
        [-0.5, -0.4, 0.3, -0.2, 0.3],
        [0.2, -0.2, 0.2, -0.2, 0.2],
        [0.5, 0.5, -0.5, 0.5, -0.5],
        [-0.3, 0.4, 0.2, 0.5, -0.3],
    ] {
        let index = calc.balance_index(&nt(levels));
        assert!(index > 0.3 && index < 0.7, "{levels:?} -> {index}");
    }
}

#[test]
fn test_balance_index_severe_deviation() {
    let calc = DerivedMetricCalculator::new();
    for levels in [
        [-0.9, -0.8, 0.9, -0.8, 0.0],
        [1.0, -1.0, 1.0, -1.0, 1.0],
        [-0.8, -0.8, 0.8, 0.8, 0.1],
    ] {
        let index = calc.balance_index(&nt(levels));
        assert!(index < 0.3, "{levels:?} -> {index}");
    }
}

#[test]
fn test_balance_index_tiny_deviation_is_below_one() {
    let calc = DerivedMetricCalculator::new();
    let index = calc.balance_index(&nt([1e-9, 0.0, 0.0, 0.0, 0.0]));
    assert!(index < 1.0);
}

// =========================================================================
// Condition severities
// =========================================================================

#[test]
fn test_depression_tiers() {
    let calc = DerivedMetricCalculator::new();

    let absent = calc.depression_severity(&depressive(0.8, 0.0, 0.9));
    assert!(absent < 0.2, "absent: {absent}");

    let moderate = calc.depression_severity(&depressive(-0.3, 0.5, -0.2));
    assert!(moderate > 0.4 && moderate < 0.7, "moderate: {moderate}");

    let severe = calc.depression_severity(&depressive(-0.9, 0.9, -0.8));
    assert!(severe > 0.8, "severe: {severe}");
}

#[test]
fn test_anxiety_tiers() {
    let calc = DerivedMetricCalculator::new();

    let absent = calc.anxiety_severity(&anxious(0.1, 0.1, 0.9));
    assert!(absent < 0.2, "absent: {absent}");

    let moderate = calc.anxiety_severity(&anxious(0.5, 0.5, 0.5));
    assert!(moderate > 0.4 && moderate < 0.7, "moderate: {moderate}");

    let severe = calc.anxiety_severity(&anxious(0.9, 0.9, 0.1));
    assert!(severe > 0.8, "severe: {severe}");
}

#[test]
fn test_emotional_regulation_reduces_anxiety() {
    let calc = DerivedMetricCalculator::new();
    let unregulated = calc.anxiety_severity(&anxious(0.7, 0.6, 0.0));
    let regulated = calc.anxiety_severity(&anxious(0.7, 0.6, 1.0));
    assert!(regulated < unregulated);
}

#[test]
fn test_cognitive_impairment_tiers() {
    let calc = DerivedMetricCalculator::new();
    let at = |score| {
        let cog = CognitiveState::new(CognitiveInput::uniform(score)).unwrap();
        calc.cognitive_impairment(&cog)
    };

    assert!(at(0.9) < 0.2);
    let mid = at(0.5);
    assert!(mid > 0.4 && mid < 0.6, "mid: {mid}");
    assert!(at(0.1) > 0.8);
}

#[test]
fn test_cognitive_impairment_ignores_insight() {
    let calc = DerivedMetricCalculator::new();
    let mut input = CognitiveInput::uniform(0.5);
    let without = calc.cognitive_impairment(&CognitiveState::new(input.clone()).unwrap());
    input.insight = 1.0;
    let with = calc.cognitive_impairment(&CognitiveState::new(input).unwrap());
    assert_eq!(without, with);
}

#[test]
fn test_functional_impairment_tiers() {
    let calc = DerivedMetricCalculator::new();

    let intact = calc.functional_impairment(&functional(0.9, 0.8));
    assert!(intact < 0.2, "intact: {intact}");

    let moderate = calc.functional_impairment(&functional(0.5, 0.0));
    assert!(moderate > 0.4 && moderate < 0.7, "moderate: {moderate}");

    let severe = calc.functional_impairment(&functional(0.1, -0.8));
    assert!(severe > 0.8, "severe: {severe}");
}

// =========================================================================
// Symptom clusters
// =========================================================================

#[test]
fn test_clusters_track_their_domain() {
    let calc = DerivedMetricCalculator::new();

    let low_mood = depressive(-0.8, 0.8, 0.0);
    assert!(calc.mood_cluster(&low_mood) > calc.mood_cluster(&PsychologicalState::default()));

    let tense = anxious(0.9, 0.8, 0.0);
    assert!(calc.anxiety_cluster(&tense) > 0.6);
    assert_eq!(calc.anxiety_cluster(&PsychologicalState::default()), 0.0);

    let sharp = CognitiveState::new(CognitiveInput::uniform(1.0)).unwrap();
    assert!(calc.cognition_cluster(&sharp) < 1e-6);

    let rested = BehavioralState::new(BehavioralInput {
        sleep_quality: 1.0,
        sleep_duration_hours: REFERENCE_SLEEP_HOURS,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(calc.neurovegetative_cluster(&rested), 0.0);

    let disrupted = BehavioralState::new(BehavioralInput {
        sleep_quality: 0.1,
        sleep_duration_hours: 3.0,
        appetite_level: -0.7,
        weight_change: -0.5,
        psychomotor_change: 0.6,
        ..Default::default()
    })
    .unwrap();
    assert!(calc.neurovegetative_cluster(&disrupted) > 0.6);
}

#[test]
fn test_derive_fills_every_key() {
    let calc = DerivedMetricCalculator::new();
    let metrics = calc
        .derive(
            &PsychologicalState::default(),
            &BehavioralState::default(),
            &CognitiveState::default(),
        )
        .unwrap();

    for condition in Condition::ALL {
        assert!(metrics.condition_severities.contains_key(condition.as_str()));
    }
    for cluster in SymptomCluster::ALL {
        assert!(metrics.symptom_clusters.contains_key(cluster.as_str()));
    }
    assert_eq!(metrics.condition_severities["depression"], 0.0);
}

#[test]
fn test_derive_fails_on_non_finite_weights() {
    let mut weights = ScoringWeights::default();
    weights.depression.mood_valence = f32::NAN;
    assert!(DerivedMetricCalculator::with_weights(weights).is_err());

    let calc = DerivedMetricCalculator::unchecked(weights);
    let err = calc
        .derive(
            &depressive(-0.5, 0.2, 0.0),
            &BehavioralState::default(),
            &CognitiveState::default(),
        )
        .unwrap_err();
    assert!(err.is_defect());
    assert!(err.to_string().contains("depression"));
}

// =========================================================================
// Weights
// =========================================================================

#[test]
fn test_default_weights_validate() {
    assert!(ScoringWeights::default().validate().is_ok());
}

#[test]
fn test_invalid_weights_rejected() {
    let mut weights = ScoringWeights::default();
    weights.functional.self_care = -0.1;
    let msg = weights.validate().unwrap_err().to_string();
    assert!(msg.contains("functional.self_care"), "{msg}");

    let mut weights = ScoringWeights::default();
    weights.balance_decay = 0.0;
    assert!(weights.validate().is_err());

    let mut weights = ScoringWeights::default();
    weights.anxiety.regulation_dampening = 1.5;
    assert!(weights.validate().is_err());

    let mut weights = ScoringWeights::default();
    weights.cognition.attention = 0.5;
    let msg = weights.validate().unwrap_err().to_string();
    assert!(msg.contains("sum to 1.0"), "{msg}");
}

#[test]
fn test_custom_weights_change_scores() {
    let mut weights = ScoringWeights::default();
    weights.depression = DepressionWeights {
        mood_valence: 0.0,
        anhedonia: 1.0,
        motivation: 0.0,
    };
    let calc = DerivedMetricCalculator::with_weights(weights).unwrap();
    let psych = depressive(-1.0, 0.0, -1.0);
    assert_eq!(calc.depression_severity(&psych), 0.0);
}

#[test]
fn test_weights_flat_map_round_trip() {
    let mut weights = ScoringWeights::default();
    weights.balance_decay = 3.0;
    weights.depression = DepressionWeights {
        mood_valence: 0.0,
        anhedonia: 1.0,
        motivation: 0.0,
    };

    let flat = weights.to_flat_map();
    assert_eq!(flat["depression.anhedonia"], 1.0);
    assert_eq!(flat["cognition.attention"], 0.20);
    assert_eq!(ScoringWeights::from_flat_map(&flat).unwrap(), weights);
}

#[test]
fn test_weights_from_flat_map_rejects_bad_input() {
    let mut flat = ScoringWeights::default().to_flat_map();
    flat.insert("depression.guilt".into(), 0.1);
    let err = ScoringWeights::from_flat_map(&flat).unwrap_err();
    assert_eq!(err.field(), Some("depression.guilt"));

    let mut flat = ScoringWeights::default().to_flat_map();
    flat.insert("anxiety.anxiety_level".into(), 0.9);
    let err = ScoringWeights::from_flat_map(&flat).unwrap_err();
    assert!(matches!(err, TwinError::ConfigError(_)));

    let partial: BTreeMap<String, f32> = [("balance_decay".to_string(), 1.5)].into_iter().collect();
    let weights = ScoringWeights::from_flat_map(&partial).unwrap();
    assert_eq!(weights.balance_decay, 1.5);
    assert_eq!(weights.depression, DepressionWeights::default());
}

// =========================================================================
// Properties
// =========================================================================

proptest! {
    /// Balance index stays in [0, 1] and is 1.0 only at the neutral point.
    #[test]
    fn balance_index_in_unit_interval(levels in proptest::array::uniform5(-1.0f32..=1.0)) {
        let state = nt(levels);
        let index = DerivedMetricCalculator::new().balance_index(&state);
        prop_assert!((0.0..=1.0).contains(&index));
        let neutral = levels.iter().all(|&l| l == 0.0);
        prop_assert_eq!(index == 1.0, neutral);
    }

    /// Deepening any single depressive signal never lowers severity.
    #[test]
    fn depression_monotonic_in_each_field(
        valence in -1.0f32..=1.0,
        anhedonia in 0.0f32..=1.0,
        motivation in -1.0f32..=1.0,
        delta in 0.0f32..=1.0,
    ) {
        let calc = DerivedMetricCalculator::new();
        let base = calc.depression_severity(&depressive(valence, anhedonia, motivation));

        let lower_valence = depressive((valence - delta).max(-1.0), anhedonia, motivation);
        prop_assert!(calc.depression_severity(&lower_valence) >= base);

        let more_anhedonia = depressive(valence, (anhedonia + delta).min(1.0), motivation);
        prop_assert!(calc.depression_severity(&more_anhedonia) >= base);

        let lower_motivation = depressive(valence, anhedonia, (motivation - delta).max(-1.0));
        prop_assert!(calc.depression_severity(&lower_motivation) >= base);
    }

    /// Every derived score lands in [0, 1] for any valid input.
    #[test]
    fn derived_scores_in_unit_interval(
        valence in -1.0f32..=1.0,
        anxiety in 0.0f32..=1.0,
        regulation in 0.0f32..=1.0,
        sleep_hours in 0.0f32..=24.0,
        activity in -1.0f32..=1.0,
        domain in 0.0f32..=1.0,
    ) {
        let psych = PsychologicalState::new(PsychologicalInput {
            mood_valence: valence,
            mood_arousal: valence,
            anxiety_level: anxiety,
            stress_reactivity: anxiety,
            emotional_regulation: regulation,
            anhedonia: anxiety,
            rumination: regulation,
            motivation: -valence,
            ..Default::default()
        }).unwrap();
        let beh = BehavioralState::new(BehavioralInput {
            activity_level: activity,
            psychomotor_change: -activity,
            appetite_level: activity,
            weight_change: activity,
            sleep_quality: domain,
            sleep_duration_hours: sleep_hours,
            social_engagement: domain,
            self_care: regulation,
            ..Default::default()
        }).unwrap();
        let cog = CognitiveState::new(CognitiveInput::uniform(domain)).unwrap();

        let metrics = DerivedMetricCalculator::new().derive(&psych, &beh, &cog).unwrap();
        let scores = metrics.condition_severities.values().chain(metrics.symptom_clusters.values());
        for score in scores {
            prop_assert!((0.0..=1.0).contains(score));
        }
    }
}
