//! Aggregate digital twin state.
//!
//! [`DigitalTwinState`] owns one instance of each sub-state, its metadata and
//! the two derived maps. The maps change only through
//! [`DigitalTwinState::update_derived_values`], which either replaces both
//! maps or leaves them untouched.

mod flat;
mod record;
mod version;


use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TwinConfig;
use crate::error::{TwinError, TwinResult};
use crate::scoring::{checked, Condition, DerivedMetricCalculator, SeverityTier, SymptomCluster};
use crate::types::{BehavioralState, CognitiveState, NeurotransmitterState, PsychologicalState};

use self::record::StateRecord;
use self::version::check_version;

pub use self::flat::{FlatRecord, FlatValue};
pub use self::version::is_semver;

/// Version stamped on states built without an explicit one.
pub const STATE_MODEL_VERSION: &str = "1.0.0";

/// Composite clinical state of one patient at one point in time.
///
/// Plain in-memory data: `Send + Sync`, no interior locking. Callers that
/// share an instance across threads serialize access themselves.
///
/// Serialized form carries the scoring weights next to the sub-states.
/// Deserializing re-validates everything: the version, each sub-state, the
/// weights, and every derived entry.
///
/// # Example
/// ```rust
/// use digital_twin_core::scoring::Condition;
/// use digital_twin_core::types::{PsychologicalInput, PsychologicalState};
/// use digital_twin_core::DigitalTwinState;
///
/// let mut twin = DigitalTwinState::new("1.0.0").unwrap();
/// twin.replace_psychological(
///     PsychologicalState::new(PsychologicalInput {
///         mood_valence: -0.8,
///         anhedonia: 0.7,
///         ..Default::default()
///     })
///     .unwrap(),
/// );
/// assert!(twin.condition_severity(Condition::Depression).is_none());
///
/// twin.update_derived_values().unwrap();
/// assert!(twin.condition_severity(Condition::Depression).unwrap() > 0.6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StateRecord", try_from = "StateRecord")]
pub struct DigitalTwinState {
    id: Uuid,
    created_at: DateTime<Utc>,
    version: String,
    neurotransmitter: NeurotransmitterState,
    psychological: PsychologicalState,
    behavioral: BehavioralState,
    cognitive: CognitiveState,
    condition_severities: BTreeMap<String, f32>,
    symptom_clusters: BTreeMap<String, f32>,
    calculator: DerivedMetricCalculator,
}

impl Default for DigitalTwinState {
    fn default() -> Self {
        Self::assemble(
            STATE_MODEL_VERSION.to_string(),
            NeurotransmitterState::default(),
            PsychologicalState::default(),
            BehavioralState::default(),
            CognitiveState::default(),
        )
    }
}

impl DigitalTwinState {
    /// Create a state with all-neutral sub-states and empty derived maps.
    ///
    /// # Errors
    /// [`TwinError::InvalidVersion`] unless `version` is `MAJOR.MINOR.PATCH`.
    pub fn new(version: impl Into<String>) -> TwinResult<Self> {
        Self::with_states(
            version,
            NeurotransmitterState::default(),
            PsychologicalState::default(),
            BehavioralState::default(),
            CognitiveState::default(),
        )
    }

    /// Create a state from explicitly supplied sub-states.
    ///
    /// # Errors
    /// [`TwinError::InvalidVersion`] unless `version` is `MAJOR.MINOR.PATCH`.
    pub fn with_states(
        version: impl Into<String>,
        neurotransmitter: NeurotransmitterState,
        psychological: PsychologicalState,
        behavioral: BehavioralState,
        cognitive: CognitiveState,
    ) -> TwinResult<Self> {
        let version = version.into();
        check_version(&version)?;
        Ok(Self::assemble(
            version,
            neurotransmitter,
            psychological,
            behavioral,
            cognitive,
        ))
    }

    fn assemble(
        version: String,
        neurotransmitter: NeurotransmitterState,
        psychological: PsychologicalState,
        behavioral: BehavioralState,
        cognitive: CognitiveState,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            version,
            neurotransmitter,
            psychological,
            behavioral,
            cognitive,
            condition_severities: BTreeMap::new(),
            symptom_clusters: BTreeMap::new(),
            calculator: DerivedMetricCalculator::default(),
        }
    }

    /// Create a neutral state using the configured version and weights.
    ///
    /// # Errors
    /// [`crate::TwinError::ConfigError`] if the configuration is invalid.
    pub fn from_config(config: &TwinConfig) -> TwinResult<Self> {
        config.validate()?;
        let calculator = DerivedMetricCalculator::with_weights(config.scoring)?;
        Ok(Self::new(config.model_version.clone())?.with_calculator(calculator))
    }

    /// Use `calculator` for subsequent recomputation.
    pub fn with_calculator(mut self, calculator: DerivedMetricCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn neurotransmitter(&self) -> &NeurotransmitterState {
        &self.neurotransmitter
    }

    pub fn psychological(&self) -> &PsychologicalState {
        &self.psychological
    }

    pub fn behavioral(&self) -> &BehavioralState {
        &self.behavioral
    }

    pub fn cognitive(&self) -> &CognitiveState {
        &self.cognitive
    }

    pub fn calculator(&self) -> &DerivedMetricCalculator {
        &self.calculator
    }

    pub fn condition_severities(&self) -> &BTreeMap<String, f32> {
        &self.condition_severities
    }

    pub fn symptom_clusters(&self) -> &BTreeMap<String, f32> {
        &self.symptom_clusters
    }

    /// Replace the neurotransmitter sub-state, returning the previous one.
    ///
    /// Derived maps keep their previous values until the next recompute.
    pub fn replace_neurotransmitter(
        &mut self,
        state: NeurotransmitterState,
    ) -> NeurotransmitterState {
        std::mem::replace(&mut self.neurotransmitter, state)
    }

    /// Replace the psychological sub-state, returning the previous one.
    pub fn replace_psychological(&mut self, state: PsychologicalState) -> PsychologicalState {
        std::mem::replace(&mut self.psychological, state)
    }

    /// Replace the behavioral sub-state, returning the previous one.
    pub fn replace_behavioral(&mut self, state: BehavioralState) -> BehavioralState {
        std::mem::replace(&mut self.behavioral, state)
    }

    /// Replace the cognitive sub-state, returning the previous one.
    pub fn replace_cognitive(&mut self, state: CognitiveState) -> CognitiveState {
        std::mem::replace(&mut self.cognitive, state)
    }

    /// Recompute condition severities and symptom clusters.
    ///
    /// Idempotent: with unchanged sub-states, repeated calls produce
    /// identical maps. On error both maps keep their previous contents.
    ///
    /// # Errors
    /// [`crate::TwinError::Calculation`] if any score cannot be evaluated.
    pub fn update_derived_values(&mut self) -> TwinResult<()> {
        let metrics = self
            .calculator
            .derive(&self.psychological, &self.behavioral, &self.cognitive)
            .map_err(|e| {
                tracing::warn!(
                    twin_id = %self.id,
                    error = %e,
                    "Derived value update failed; keeping previous values"
                );
                e
            })?;

        self.condition_severities = metrics.condition_severities;
        self.symptom_clusters = metrics.symptom_clusters;

        tracing::debug!(
            twin_id = %self.id,
            severities = self.condition_severities.len(),
            clusters = self.symptom_clusters.len(),
            "Derived values updated"
        );
        Ok(())
    }

    /// Value-oriented form of [`Self::update_derived_values`].
    pub fn with_derived_values(mut self) -> TwinResult<Self> {
        self.update_derived_values()?;
        Ok(self)
    }

    /// True once derived maps have been computed at least once.
    pub fn has_derived_values(&self) -> bool {
        !self.condition_severities.is_empty()
    }

    pub fn condition_severity(&self, condition: Condition) -> Option<f32> {
        self.condition_severities.get(condition.as_str()).copied()
    }

    pub fn symptom_cluster(&self, cluster: SymptomCluster) -> Option<f32> {
        self.symptom_clusters.get(cluster.as_str()).copied()
    }

    /// Qualitative tier of a computed severity.
    pub fn severity_tier(&self, condition: Condition) -> Option<SeverityTier> {
        self.condition_severity(condition)
            .map(SeverityTier::from_score)
    }

    /// Balance index of the current neurotransmitter sub-state.
    pub fn neurotransmitter_balance(&self) -> f32 {
        self.calculator.balance_index(&self.neurotransmitter)
    }
}

fn invalid_record(key: &str, message: impl Into<String>) -> TwinError {
    TwinError::InvalidRecord {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Check a restored derived map under `key`.
///
/// Entries must use names from `names` with scores in `[0, 1]`. A non-empty
/// map must hold every name.
fn check_derived(key: &str, map: &BTreeMap<String, f32>, names: &[&str]) -> TwinResult<()> {
    for (name, &score) in map {
        if !names.contains(&name.as_str()) {
            return Err(invalid_record(key, format!("unknown entry '{name}'")));
        }
        checked(name, score).map_err(|e| invalid_record(key, e.to_string()))?;
    }
    if !map.is_empty() {
        if let Some(missing) = names.iter().find(|name| !map.contains_key(**name)) {
            return Err(invalid_record(key, format!("missing entry '{missing}'")));
        }
    }
    Ok(())
}

/// Both derived maps, checked as one unit.
fn check_derived_maps(
    condition_severities: &BTreeMap<String, f32>,
    symptom_clusters: &BTreeMap<String, f32>,
) -> TwinResult<()> {
    check_derived(
        "condition_severities",
        condition_severities,
        &Condition::ALL.map(|c| c.as_str()),
    )?;
    check_derived(
        "symptom_clusters",
        symptom_clusters,
        &SymptomCluster::ALL.map(|c| c.as_str()),
    )?;
    if condition_severities.is_empty() != symptom_clusters.is_empty() {
        return Err(invalid_record(
            "symptom_clusters",
            "derived maps must be both present or both empty",
        ));
    }
    Ok(())
}
