//! Scoring coefficients for the derived-metric calculator.
//!
//! Each condition groups its linear weights; a group must be non-negative and
//! sum to 1.0 so the composite stays in `[0, 1]`. Defaults are calibrated so
//! that absent, moderate and severe presentations land in the `< 0.2`,
//! `(0.4, 0.7)` and `> 0.8` bands respectively.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};

/// Tolerance for a weight group summing to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f32 = 0.01;

/// Default decay of the balance index per unit of mean deviation.
pub const DEFAULT_BALANCE_DECAY: f32 = 2.2;

/// Depression composite weights.
///
/// Valence and motivation contribute only through their negative part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepressionWeights {
    pub mood_valence: f32,
    pub anhedonia: f32,
    pub motivation: f32,
}

impl Default for DepressionWeights {
    fn default() -> Self {
        Self {
            mood_valence: 0.45,
            anhedonia: 0.35,
            motivation: 0.20,
        }
    }
}

/// Anxiety composite weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnxietyWeights {
    pub anxiety_level: f32,
    pub stress_reactivity: f32,
    /// Fraction of the composite that full emotional regulation removes [0, 1]
    pub regulation_dampening: f32,
}

impl Default for AnxietyWeights {
    fn default() -> Self {
        Self {
            anxiety_level: 0.6,
            stress_reactivity: 0.4,
            regulation_dampening: 0.4,
        }
    }
}

/// Weights of the eight cognitive domains. Insight is not scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitionWeights {
    pub attention: f32,
    pub concentration: f32,
    pub working_memory: f32,
    pub executive_function: f32,
    pub long_term_memory: f32,
    pub decision_making: f32,
    pub processing_speed: f32,
    pub cognitive_flexibility: f32,
}

impl Default for CognitionWeights {
    fn default() -> Self {
        Self {
            attention: 0.20,
            concentration: 0.20,
            working_memory: 0.20,
            executive_function: 0.20,
            long_term_memory: 0.05,
            decision_making: 0.05,
            processing_speed: 0.05,
            cognitive_flexibility: 0.05,
        }
    }
}

/// Functional capacity weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionalWeights {
    pub sleep_quality: f32,
    pub social_engagement: f32,
    pub self_care: f32,
    /// Applied to activity level rescaled from [-1, 1] to [0, 1]
    pub activity_level: f32,
}

impl Default for FunctionalWeights {
    fn default() -> Self {
        Self {
            sleep_quality: 0.25,
            social_engagement: 0.25,
            self_care: 0.30,
            activity_level: 0.20,
        }
    }
}

/// All tunable scoring coefficients.
///
/// # Example
/// ```rust
/// use digital_twin_core::scoring::ScoringWeights;
///
/// let mut weights = ScoringWeights::default();
/// assert!(weights.validate().is_ok());
///
/// weights.depression.anhedonia = 0.9;
/// assert!(weights.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub balance_decay: f32,
    pub depression: DepressionWeights,
    pub anxiety: AnxietyWeights,
    pub cognition: CognitionWeights,
    pub functional: FunctionalWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            balance_decay: DEFAULT_BALANCE_DECAY,
            depression: DepressionWeights::default(),
            anxiety: AnxietyWeights::default(),
            cognition: CognitionWeights::default(),
            functional: FunctionalWeights::default(),
        }
    }
}

impl ScoringWeights {
    /// Coefficients keyed `group.name`, e.g. `depression.anhedonia`.
    pub fn to_flat_map(&self) -> BTreeMap<String, f32> {
        let (d, a, c, f) = (&self.depression, &self.anxiety, &self.cognition, &self.functional);
        [
            ("balance_decay", self.balance_decay),
            ("depression.mood_valence", d.mood_valence),
            ("depression.anhedonia", d.anhedonia),
            ("depression.motivation", d.motivation),
            ("anxiety.anxiety_level", a.anxiety_level),
            ("anxiety.stress_reactivity", a.stress_reactivity),
            ("anxiety.regulation_dampening", a.regulation_dampening),
            ("cognition.attention", c.attention),
            ("cognition.concentration", c.concentration),
            ("cognition.working_memory", c.working_memory),
            ("cognition.executive_function", c.executive_function),
            ("cognition.long_term_memory", c.long_term_memory),
            ("cognition.decision_making", c.decision_making),
            ("cognition.processing_speed", c.processing_speed),
            ("cognition.cognitive_flexibility", c.cognitive_flexibility),
            ("functional.sleep_quality", f.sleep_quality),
            ("functional.social_engagement", f.social_engagement),
            ("functional.self_care", f.self_care),
            ("functional.activity_level", f.activity_level),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }

    /// Inverse of [`Self::to_flat_map`]. Missing coefficients keep their
    /// defaults; the result is validated.
    ///
    /// # Errors
    /// [`TwinError::UnknownField`] for unrecognised keys, or
    /// [`TwinError::ConfigError`] from [`Self::validate`].
    pub fn from_flat_map(flat: &BTreeMap<String, f32>) -> TwinResult<Self> {
        let mut w = Self::default();
        for (name, &value) in flat {
            let slot = match name.as_str() {
                "balance_decay" => &mut w.balance_decay,
                "depression.mood_valence" => &mut w.depression.mood_valence,
                "depression.anhedonia" => &mut w.depression.anhedonia,
                "depression.motivation" => &mut w.depression.motivation,
                "anxiety.anxiety_level" => &mut w.anxiety.anxiety_level,
                "anxiety.stress_reactivity" => &mut w.anxiety.stress_reactivity,
                "anxiety.regulation_dampening" => &mut w.anxiety.regulation_dampening,
                "cognition.attention" => &mut w.cognition.attention,
                "cognition.concentration" => &mut w.cognition.concentration,
                "cognition.working_memory" => &mut w.cognition.working_memory,
                "cognition.executive_function" => &mut w.cognition.executive_function,
                "cognition.long_term_memory" => &mut w.cognition.long_term_memory,
                "cognition.decision_making" => &mut w.cognition.decision_making,
                "cognition.processing_speed" => &mut w.cognition.processing_speed,
                "cognition.cognitive_flexibility" => &mut w.cognition.cognitive_flexibility,
                "functional.sleep_quality" => &mut w.functional.sleep_quality,
                "functional.social_engagement" => &mut w.functional.social_engagement,
                "functional.self_care" => &mut w.functional.self_care,
                "functional.activity_level" => &mut w.functional.activity_level,
                _ => return Err(TwinError::UnknownField { field: name.clone() }),
            };
            *slot = value;
        }
        w.validate()?;
        Ok(w)
    }

    /// Validate every group.
    ///
    /// # Errors
    /// [`TwinError::ConfigError`] naming the first offending coefficient.
    pub fn validate(&self) -> TwinResult<()> {
        if !(self.balance_decay.is_finite() && self.balance_decay > 0.0) {
            return Err(TwinError::ConfigError(format!(
                "scoring.balance_decay must be positive, got {}",
                self.balance_decay
            )));
        }

        let d = &self.depression;
        validate_group(
            "depression",
            &[
                ("mood_valence", d.mood_valence),
                ("anhedonia", d.anhedonia),
                ("motivation", d.motivation),
            ],
        )?;

        let a = &self.anxiety;
        validate_group(
            "anxiety",
            &[
                ("anxiety_level", a.anxiety_level),
                ("stress_reactivity", a.stress_reactivity),
            ],
        )?;
        if !(0.0..=1.0).contains(&a.regulation_dampening) {
            return Err(TwinError::ConfigError(format!(
                "scoring.anxiety.regulation_dampening must be in [0, 1], got {}",
                a.regulation_dampening
            )));
        }

        let c = &self.cognition;
        validate_group(
            "cognition",
            &[
                ("attention", c.attention),
                ("concentration", c.concentration),
                ("working_memory", c.working_memory),
                ("executive_function", c.executive_function),
                ("long_term_memory", c.long_term_memory),
                ("decision_making", c.decision_making),
                ("processing_speed", c.processing_speed),
                ("cognitive_flexibility", c.cognitive_flexibility),
            ],
        )?;

        let f = &self.functional;
        validate_group(
            "functional",
            &[
                ("sleep_quality", f.sleep_quality),
                ("social_engagement", f.social_engagement),
                ("self_care", f.self_care),
                ("activity_level", f.activity_level),
            ],
        )
    }
}

fn validate_group(group: &str, weights: &[(&str, f32)]) -> TwinResult<()> {
    for &(name, w) in weights {
        if !(w.is_finite() && w >= 0.0) {
            return Err(TwinError::ConfigError(format!(
                "scoring.{group}.{name} must be a non-negative number, got {w}"
            )));
        }
    }

    let sum: f32 = weights.iter().map(|&(_, w)| w).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(TwinError::ConfigError(format!(
            "scoring.{group} weights must sum to 1.0, got {sum}"
        )));
    }
    Ok(())
}
