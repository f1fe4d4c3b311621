//! Flat key → value record of a [`DigitalTwinState`].
//!
//! Persistence and API layers consume this shape instead of reaching into
//! the state. Sub-state field names are unique across sub-states, so every
//! bounded field sits at the top level of the record.
//!
//! ```json
//! {
//!   "id": "6f1c...",
//!   "created_at": "2025-01-01T12:00:00Z",
//!   "version": "1.0.0",
//!   "serotonin": -0.5,
//!   "mood_valence": -0.6,
//!   "inflammation_markers": { "crp": 3.1 },
//!   "condition_severities": { "depression": 0.73, "anxiety": 0.66 },
//!   "scoring_weights": { "balance_decay": 2.2, "depression.anhedonia": 0.35 }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TwinError, TwinResult};
use crate::scoring::ScoringWeights;
use crate::types::{
    BehavioralState, CognitiveState, NeurotransmitterState, PsychologicalState, ValueRange,
};

use super::record::StateRecord;
use super::{invalid_record as invalid, DigitalTwinState};

const KEY_ID: &str = "id";
const KEY_CREATED_AT: &str = "created_at";
const KEY_VERSION: &str = "version";
const KEY_INFLAMMATION_MARKERS: &str = "inflammation_markers";
const KEY_CIRCUIT_CONNECTIVITY: &str = "circuit_connectivity";
const KEY_COGNITIVE_DISTORTIONS: &str = "cognitive_distortions";
const KEY_AVOIDANCE_BEHAVIORS: &str = "avoidance_behaviors";
const KEY_CONDITION_SEVERITIES: &str = "condition_severities";
const KEY_SYMPTOM_CLUSTERS: &str = "symptom_clusters";
const KEY_SCORING_WEIGHTS: &str = "scoring_weights";

/// One value in a [`FlatRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    Number(f32),
    Text(String),
    Map(BTreeMap<String, f32>),
}

impl FlatValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, f32>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<f32> for FlatValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<BTreeMap<String, f32>> for FlatValue {
    fn from(value: BTreeMap<String, f32>) -> Self {
        Self::Map(value)
    }
}

/// Field name → value record.
pub type FlatRecord = BTreeMap<String, FlatValue>;

/// Which sub-state owns a bounded field.
#[derive(Clone, Copy)]
enum Owner {
    Neurotransmitter,
    Psychological,
    Behavioral,
    Cognitive,
}

fn owner_of(key: &str) -> Option<Owner> {
    let owns = |table: &[(&'static str, ValueRange)]| table.iter().any(|&(name, _)| name == key);
    if owns(NeurotransmitterState::FIELDS) {
        Some(Owner::Neurotransmitter)
    } else if owns(PsychologicalState::FIELDS) {
        Some(Owner::Psychological)
    } else if owns(BehavioralState::FIELDS) {
        Some(Owner::Behavioral)
    } else if owns(CognitiveState::FIELDS) {
        Some(Owner::Cognitive)
    } else {
        None
    }
}

fn required_text<'a>(record: &'a FlatRecord, key: &str) -> TwinResult<&'a str> {
    record
        .get(key)
        .ok_or_else(|| invalid(key, "missing"))?
        .as_text()
        .ok_or_else(|| invalid(key, "expected text"))
}

impl DigitalTwinState {
    /// Flatten into a name → value record.
    pub fn to_flat_map(&self) -> FlatRecord {
        let mut record = FlatRecord::new();
        record.insert(KEY_ID.into(), self.id.to_string().into());
        record.insert(
            KEY_CREATED_AT.into(),
            self.created_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true)
                .into(),
        );
        record.insert(KEY_VERSION.into(), self.version.clone().into());

        let fields = self
            .neurotransmitter
            .to_field_map()
            .into_iter()
            .chain(self.psychological.to_field_map())
            .chain(self.behavioral.to_field_map())
            .chain(self.cognitive.to_field_map());
        for (name, value) in fields {
            record.insert(name, value.into());
        }

        let maps = [
            (KEY_INFLAMMATION_MARKERS, self.neurotransmitter.inflammation_markers()),
            (KEY_CIRCUIT_CONNECTIVITY, self.neurotransmitter.circuit_connectivity()),
            (KEY_COGNITIVE_DISTORTIONS, self.psychological.cognitive_distortions()),
            (KEY_AVOIDANCE_BEHAVIORS, self.behavioral.avoidance_behaviors()),
            (KEY_CONDITION_SEVERITIES, &self.condition_severities),
            (KEY_SYMPTOM_CLUSTERS, &self.symptom_clusters),
        ];
        for (key, map) in maps {
            record.insert(key.into(), map.clone().into());
        }
        record.insert(
            KEY_SCORING_WEIGHTS.into(),
            self.calculator.weights().to_flat_map().into(),
        );

        record
    }

    /// Rebuild a state from a flat record.
    ///
    /// Missing bounded fields take their neutral default and missing scoring
    /// weights take theirs. Everything present is validated the same way as
    /// the serde path.
    ///
    /// # Errors
    /// - [`TwinError::InvalidRecord`] for missing or malformed metadata, a
    ///   value of the wrong kind, a bad derived entry, or invalid weights
    /// - [`TwinError::InvalidVersion`] for a non-semver version
    /// - [`TwinError::UnknownField`] for unrecognised keys
    /// - [`TwinError::OutOfRange`] from sub-state validation
    pub fn from_flat_map(record: &FlatRecord) -> TwinResult<Self> {
        let id = Uuid::parse_str(required_text(record, KEY_ID)?)
            .map_err(|e| invalid(KEY_ID, e.to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(required_text(record, KEY_CREATED_AT)?)
            .map_err(|e| invalid(KEY_CREATED_AT, e.to_string()))?
            .with_timezone(&Utc);
        let version = required_text(record, KEY_VERSION)?.to_string();

        let mut nt_fields = BTreeMap::new();
        let mut psych_fields = BTreeMap::new();
        let mut beh_fields = BTreeMap::new();
        let mut cog_fields = BTreeMap::new();
        let mut maps: BTreeMap<&str, BTreeMap<String, f32>> = BTreeMap::new();

        for (key, value) in record {
            match key.as_str() {
                KEY_ID | KEY_CREATED_AT | KEY_VERSION => {}
                KEY_INFLAMMATION_MARKERS
                | KEY_CIRCUIT_CONNECTIVITY
                | KEY_COGNITIVE_DISTORTIONS
                | KEY_AVOIDANCE_BEHAVIORS
                | KEY_CONDITION_SEVERITIES
                | KEY_SYMPTOM_CLUSTERS
                | KEY_SCORING_WEIGHTS => {
                    let map = value
                        .as_map()
                        .ok_or_else(|| invalid(key, "expected a name -> number map"))?;
                    maps.insert(key.as_str(), map.clone());
                }
                _ => {
                    let owner = owner_of(key)
                        .ok_or_else(|| TwinError::UnknownField { field: key.clone() })?;
                    let number = value
                        .as_number()
                        .ok_or_else(|| invalid(key, "expected a number"))?;
                    let target = match owner {
                        Owner::Neurotransmitter => &mut nt_fields,
                        Owner::Psychological => &mut psych_fields,
                        Owner::Behavioral => &mut beh_fields,
                        Owner::Cognitive => &mut cog_fields,
                    };
                    target.insert(key.clone(), number);
                }
            }
        }

        let mut take = |key: &str| maps.remove(key).unwrap_or_default();

        let mut nt_input = NeurotransmitterState::from_fields(&nt_fields)?.to_input();
        nt_input.inflammation_markers = take(KEY_INFLAMMATION_MARKERS);
        nt_input.circuit_connectivity = take(KEY_CIRCUIT_CONNECTIVITY);

        let mut psych_input = PsychologicalState::from_fields(&psych_fields)?.to_input();
        psych_input.cognitive_distortions = take(KEY_COGNITIVE_DISTORTIONS);

        let mut beh_input = BehavioralState::from_fields(&beh_fields)?.to_input();
        beh_input.avoidance_behaviors = take(KEY_AVOIDANCE_BEHAVIORS);

        let scoring_weights = ScoringWeights::from_flat_map(&take(KEY_SCORING_WEIGHTS))
            .map_err(|e| invalid(KEY_SCORING_WEIGHTS, e.to_string()))?;

        StateRecord {
            id,
            created_at,
            version,
            neurotransmitter: NeurotransmitterState::new(nt_input)?,
            psychological: PsychologicalState::new(psych_input)?,
            behavioral: BehavioralState::new(beh_input)?,
            cognitive: CognitiveState::from_fields(&cog_fields)?,
            condition_severities: take(KEY_CONDITION_SEVERITIES),
            symptom_clusters: take(KEY_SYMPTOM_CLUSTERS),
            scoring_weights,
        }
        .try_into()
    }
}
