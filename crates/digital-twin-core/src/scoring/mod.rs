//! Derived-metric scoring.
//!
//! Turns the four sub-states into condition severities and symptom-cluster
//! scores. Coefficients live in [`ScoringWeights`] and can be loaded from
//! configuration.

mod calculator;
mod names;
mod weights;

#[cfg(test)]
mod tests;

pub(crate) use self::calculator::checked;
pub use self::calculator::{
    DerivedMetricCalculator, DerivedMetrics, ANXIETY_CLUSTER_WEIGHTS, COGNITION_CLUSTER_WEIGHTS,
    MOOD_CLUSTER_WEIGHTS, NEUROVEGETATIVE_CLUSTER_WEIGHTS, REFERENCE_SLEEP_HOURS,
};
pub use self::names::{Condition, SeverityTier, SymptomCluster};
pub use self::weights::{
    AnxietyWeights, CognitionWeights, DepressionWeights, FunctionalWeights, ScoringWeights,
    DEFAULT_BALANCE_DECAY, WEIGHT_SUM_TOLERANCE,
};
