//! Serialized shape of a [`DigitalTwinState`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TwinError, TwinResult};
use crate::scoring::{DerivedMetricCalculator, ScoringWeights};
use crate::types::{BehavioralState, CognitiveState, NeurotransmitterState, PsychologicalState};

use super::{check_derived_maps, check_version, invalid_record, DigitalTwinState};

/// Unvalidated twin fields as they appear on the wire.
///
/// Sub-states validate themselves while deserializing; everything else is
/// checked in the `TryFrom` conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub version: String,
    #[serde(default)]
    pub neurotransmitter: NeurotransmitterState,
    #[serde(default)]
    pub psychological: PsychologicalState,
    #[serde(default)]
    pub behavioral: BehavioralState,
    #[serde(default)]
    pub cognitive: CognitiveState,
    #[serde(default)]
    pub condition_severities: BTreeMap<String, f32>,
    #[serde(default)]
    pub symptom_clusters: BTreeMap<String, f32>,
    #[serde(default)]
    pub scoring_weights: ScoringWeights,
}

impl From<DigitalTwinState> for StateRecord {
    fn from(state: DigitalTwinState) -> Self {
        Self {
            id: state.id,
            created_at: state.created_at,
            version: state.version,
            neurotransmitter: state.neurotransmitter,
            psychological: state.psychological,
            behavioral: state.behavioral,
            cognitive: state.cognitive,
            condition_severities: state.condition_severities,
            symptom_clusters: state.symptom_clusters,
            scoring_weights: *state.calculator.weights(),
        }
    }
}

impl TryFrom<StateRecord> for DigitalTwinState {
    type Error = TwinError;

    fn try_from(record: StateRecord) -> TwinResult<Self> {
        check_version(&record.version)?;
        check_derived_maps(&record.condition_severities, &record.symptom_clusters)?;
        let calculator = DerivedMetricCalculator::with_weights(record.scoring_weights)
            .map_err(|e| invalid_record("scoring_weights", e.to_string()))?;

        Ok(Self {
            id: record.id,
            created_at: record.created_at,
            version: record.version,
            neurotransmitter: record.neurotransmitter,
            psychological: record.psychological,
            behavioral: record.behavioral,
            cognitive: record.cognitive,
            condition_severities: record.condition_severities,
            symptom_clusters: record.symptom_clusters,
            calculator,
        })
    }
}
