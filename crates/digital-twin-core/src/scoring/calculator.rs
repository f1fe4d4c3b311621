//! Derived-metric calculator.
//!
//! Pure, deterministic functions over validated sub-states. Every score is a
//! scalar in `[0, 1]`; higher means more severe except for the balance index,
//! where 1.0 means every neurotransmitter channel sits at its neutral baseline.
//!
//! # Formulas (default weights)
//!
//! ```text
//! balance      = exp(-2.2 * mean|level_i|)              (1.0 iff all levels are 0)
//! depression   = sat(0.45*neg(valence) + 0.35*anhedonia + 0.20*neg(motivation))
//! anxiety      = sat((0.6*anxiety + 0.4*stress) * (1 - 0.4*regulation))
//! cognitive    = 1 - weighted_mean(8 domains)
//! functional   = 1 - (0.25*sleep + 0.25*social + 0.30*self_care + 0.20*(activity+1)/2)
//! sat(x)       = 1 - (1 - x)^2
//! neg(v)       = max(0, -v)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};
use crate::types::{BehavioralState, CognitiveState, NeurotransmitterState, PsychologicalState};

use super::names::{Condition, SymptomCluster};
use super::weights::ScoringWeights;

/// Largest balance index reported when any channel deviates from zero.
const MAX_IMBALANCED_INDEX: f32 = 1.0 - f32::EPSILON;

/// Sleep duration treated as zero deviation for the neurovegetative cluster.
pub const REFERENCE_SLEEP_HOURS: f32 = 8.0;

/// Negative valence, anhedonia, rumination.
pub const MOOD_CLUSTER_WEIGHTS: [f32; 3] = [0.45, 0.35, 0.20];

/// Anxiety level, stress reactivity, positive arousal.
pub const ANXIETY_CLUSTER_WEIGHTS: [f32; 3] = [0.5, 0.3, 0.2];

/// Attention, concentration, working memory, processing speed.
pub const COGNITION_CLUSTER_WEIGHTS: [f32; 4] = [0.3, 0.3, 0.2, 0.2];

/// Poor sleep quality, sleep duration deviation, appetite, weight and
/// psychomotor change.
pub const NEUROVEGETATIVE_CLUSTER_WEIGHTS: [f32; 5] = [0.35, 0.15, 0.20, 0.15, 0.15];

/// Freshly computed derived maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub condition_severities: BTreeMap<String, f32>,
    pub symptom_clusters: BTreeMap<String, f32>,
}

/// Stateless scorer holding validated [`ScoringWeights`].
///
/// # Example
/// ```rust
/// use digital_twin_core::scoring::DerivedMetricCalculator;
/// use digital_twin_core::types::{PsychologicalInput, PsychologicalState};
///
/// let calc = DerivedMetricCalculator::new();
/// let psych = PsychologicalState::new(PsychologicalInput {
///     mood_valence: -0.9,
///     anhedonia: 0.9,
///     motivation: -0.8,
///     ..Default::default()
/// })
/// .unwrap();
/// assert!(calc.depression_severity(&psych) > 0.8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetricCalculator {
    weights: ScoringWeights,
}

impl Default for DerivedMetricCalculator {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }
}

impl DerivedMetricCalculator {
    /// Create a calculator with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom weights.
    ///
    /// # Errors
    /// [`TwinError::ConfigError`] when the weights fail validation.
    pub fn with_weights(weights: ScoringWeights) -> TwinResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Bypass validation so tests can exercise the calculation-error path.
    #[cfg(test)]
    pub(crate) fn unchecked(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Neurotransmitter balance index in `[0, 1]`.
    ///
    /// Exactly 1.0 only when all five core levels are exactly zero; decreases
    /// monotonically with the mean absolute deviation.
    pub fn balance_index(&self, nt: &NeurotransmitterState) -> f32 {
        let levels = nt.levels();
        let total: f32 = levels.iter().map(|l| l.abs()).sum();
        if total == 0.0 {
            return 1.0;
        }
        let mean = total / levels.len() as f32;
        (-self.weights.balance_decay * mean)
            .exp()
            .clamp(0.0, MAX_IMBALANCED_INDEX)
    }

    pub fn depression_severity(&self, psych: &PsychologicalState) -> f32 {
        let w = &self.weights.depression;
        let x = w.mood_valence * negative_part(psych.mood_valence())
            + w.anhedonia * psych.anhedonia()
            + w.motivation * negative_part(psych.motivation());
        saturate(x)
    }

    /// Rises with anxiety and stress reactivity; emotional regulation damps it.
    pub fn anxiety_severity(&self, psych: &PsychologicalState) -> f32 {
        let w = &self.weights.anxiety;
        let drive = w.anxiety_level * psych.anxiety_level()
            + w.stress_reactivity * psych.stress_reactivity();
        let damping = 1.0 - w.regulation_dampening * psych.emotional_regulation();
        saturate(drive * damping)
    }

    /// Complement of the weighted mean of the eight scored domains.
    pub fn cognitive_impairment(&self, cog: &CognitiveState) -> f32 {
        let w = &self.weights.cognition;
        let capacity = w.attention * cog.attention()
            + w.concentration * cog.concentration()
            + w.working_memory * cog.working_memory()
            + w.executive_function * cog.executive_function()
            + w.long_term_memory * cog.long_term_memory()
            + w.decision_making * cog.decision_making()
            + w.processing_speed * cog.processing_speed()
            + w.cognitive_flexibility * cog.cognitive_flexibility();
        (1.0 - capacity).clamp(0.0, 1.0)
    }

    /// Complement of functional capacity. Activity counts by its distance
    /// below the positive pole.
    pub fn functional_impairment(&self, beh: &BehavioralState) -> f32 {
        let w = &self.weights.functional;
        let capacity = w.sleep_quality * beh.sleep_quality()
            + w.social_engagement * beh.social_engagement()
            + w.self_care * beh.self_care()
            + w.activity_level * unit_scale(beh.activity_level());
        (1.0 - capacity).clamp(0.0, 1.0)
    }

    pub fn mood_cluster(&self, psych: &PsychologicalState) -> f32 {
        let [valence, anhedonia, rumination] = MOOD_CLUSTER_WEIGHTS;
        (valence * negative_part(psych.mood_valence())
            + anhedonia * psych.anhedonia()
            + rumination * psych.rumination())
        .clamp(0.0, 1.0)
    }

    pub fn anxiety_cluster(&self, psych: &PsychologicalState) -> f32 {
        let [anxiety, stress, arousal] = ANXIETY_CLUSTER_WEIGHTS;
        (anxiety * psych.anxiety_level()
            + stress * psych.stress_reactivity()
            + arousal * psych.mood_arousal().max(0.0))
        .clamp(0.0, 1.0)
    }

    pub fn cognition_cluster(&self, cog: &CognitiveState) -> f32 {
        let [attention, concentration, working_memory, speed] = COGNITION_CLUSTER_WEIGHTS;
        let capacity = attention * cog.attention()
            + concentration * cog.concentration()
            + working_memory * cog.working_memory()
            + speed * cog.processing_speed();
        (1.0 - capacity).clamp(0.0, 1.0)
    }

    /// Sleep, appetite, weight and psychomotor disturbance.
    pub fn neurovegetative_cluster(&self, beh: &BehavioralState) -> f32 {
        let [quality, duration, appetite, weight, psychomotor] = NEUROVEGETATIVE_CLUSTER_WEIGHTS;
        let sleep_deviation = ((beh.sleep_duration_hours() - REFERENCE_SLEEP_HOURS).abs()
            / REFERENCE_SLEEP_HOURS)
            .min(1.0);
        (quality * (1.0 - beh.sleep_quality())
            + duration * sleep_deviation
            + appetite * beh.appetite_level().abs()
            + weight * beh.weight_change().abs()
            + psychomotor * beh.psychomotor_change().abs())
        .clamp(0.0, 1.0)
    }

    /// Compute every severity and cluster score.
    ///
    /// # Errors
    /// [`TwinError::Calculation`] if any score is non-finite or escapes
    /// `[0, 1]`. No partial result is returned.
    pub fn derive(
        &self,
        psych: &PsychologicalState,
        beh: &BehavioralState,
        cog: &CognitiveState,
    ) -> TwinResult<DerivedMetrics> {
        let mut metrics = DerivedMetrics::default();

        for condition in Condition::ALL {
            let score = match condition {
                Condition::Depression => self.depression_severity(psych),
                Condition::Anxiety => self.anxiety_severity(psych),
                Condition::CognitiveImpairment => self.cognitive_impairment(cog),
                Condition::FunctionalImpairment => self.functional_impairment(beh),
            };
            metrics
                .condition_severities
                .insert(condition.to_string(), checked(condition.as_str(), score)?);
        }

        for cluster in SymptomCluster::ALL {
            let score = match cluster {
                SymptomCluster::Mood => self.mood_cluster(psych),
                SymptomCluster::Anxiety => self.anxiety_cluster(psych),
                SymptomCluster::Cognition => self.cognition_cluster(cog),
                SymptomCluster::Neurovegetative => self.neurovegetative_cluster(beh),
            };
            metrics
                .symptom_clusters
                .insert(cluster.to_string(), checked(cluster.as_str(), score)?);
        }

        Ok(metrics)
    }
}

#[inline]
fn negative_part(value: f32) -> f32 {
    (-value).max(0.0)
}

/// Rescale a bidirectional value from [-1, 1] to [0, 1].
#[inline]
fn unit_scale(value: f32) -> f32 {
    (value + 1.0) / 2.0
}

/// Concave response curve: early signal counts more than late signal.
#[inline]
fn saturate(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    1.0 - (1.0 - x) * (1.0 - x)
}

/// Reject a score that is non-finite or outside `[0, 1]`.
pub(crate) fn checked(metric: &str, score: f32) -> TwinResult<f32> {
    if !score.is_finite() {
        return Err(TwinError::calculation(metric, "score is not finite"));
    }
    if !(0.0..=1.0).contains(&score) {
        return Err(TwinError::calculation(
            metric,
            format!("score {score} outside [0, 1]"),
        ));
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_rejects_non_finite() {
        let err = checked("depression", f32::NAN).unwrap_err();
        assert!(err.is_defect());
        assert!(err.to_string().contains("depression"));
        assert!(checked("anxiety", f32::INFINITY).is_err());
    }

    #[test]
    fn test_checked_rejects_out_of_unit_interval() {
        assert!(checked("mood", 1.01).is_err());
        assert!(checked("mood", -0.01).is_err());
        assert_eq!(checked("mood", 1.0).unwrap(), 1.0);
        assert_eq!(checked("mood", 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_cluster_weights_sum_to_one() {
        let groups: [&[f32]; 4] = [
            &MOOD_CLUSTER_WEIGHTS,
            &ANXIETY_CLUSTER_WEIGHTS,
            &COGNITION_CLUSTER_WEIGHTS,
            &NEUROVEGETATIVE_CLUSTER_WEIGHTS,
        ];
        for group in groups {
            let sum: f32 = group.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "{group:?} sums to {sum}");
        }
    }

    #[test]
    fn test_saturate_is_monotonic_and_bounded() {
        let mut prev = saturate(0.0);
        assert_eq!(prev, 0.0);
        for step in 1..=100 {
            let value = saturate(step as f32 / 100.0);
            assert!(value >= prev);
            prev = value;
        }
        assert_eq!(saturate(1.0), 1.0);
        assert_eq!(saturate(2.0), 1.0);
    }
}
