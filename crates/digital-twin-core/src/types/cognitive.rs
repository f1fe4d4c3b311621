//! Cognitive sub-state: attention, executive and memory domains.
//!
//! All nine domains are unipolar in `[0, 1]`, where higher means better
//! functioning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};
use crate::scoring::DerivedMetricCalculator;

use super::range::{check_all, ValueRange};

/// Raw field values for a [`CognitiveState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CognitiveInput {
    pub attention: f32,
    pub concentration: f32,
    pub working_memory: f32,
    pub long_term_memory: f32,
    pub executive_function: f32,
    pub decision_making: f32,
    pub processing_speed: f32,
    pub cognitive_flexibility: f32,
    pub insight: f32,
}

impl CognitiveInput {
    /// Input with every domain set to `score`.
    pub fn uniform(score: f32) -> Self {
        Self {
            attention: score,
            concentration: score,
            working_memory: score,
            long_term_memory: score,
            executive_function: score,
            decision_making: score,
            processing_speed: score,
            cognitive_flexibility: score,
            insight: score,
        }
    }
}

/// Validated cognitive domain scores.
///
/// # Example
/// ```rust
/// use digital_twin_core::types::{CognitiveInput, CognitiveState};
///
/// let sharp = CognitiveState::new(CognitiveInput::uniform(0.9)).unwrap();
/// assert!(sharp.cognitive_impairment() < 0.2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CognitiveInput")]
pub struct CognitiveState {
    attention: f32,
    concentration: f32,
    working_memory: f32,
    long_term_memory: f32,
    executive_function: f32,
    decision_making: f32,
    processing_speed: f32,
    cognitive_flexibility: f32,
    insight: f32,
}

impl CognitiveState {
    /// Bounded fields and their ranges, in declaration order.
    pub const FIELDS: &'static [(&'static str, ValueRange)] = &[
        ("attention", ValueRange::UNIPOLAR),
        ("concentration", ValueRange::UNIPOLAR),
        ("working_memory", ValueRange::UNIPOLAR),
        ("long_term_memory", ValueRange::UNIPOLAR),
        ("executive_function", ValueRange::UNIPOLAR),
        ("decision_making", ValueRange::UNIPOLAR),
        ("processing_speed", ValueRange::UNIPOLAR),
        ("cognitive_flexibility", ValueRange::UNIPOLAR),
        ("insight", ValueRange::UNIPOLAR),
    ];

    /// Validate `input` and build the state.
    pub fn new(input: CognitiveInput) -> TwinResult<Self> {
        let state = Self {
            attention: input.attention,
            concentration: input.concentration,
            working_memory: input.working_memory,
            long_term_memory: input.long_term_memory,
            executive_function: input.executive_function,
            decision_making: input.decision_making,
            processing_speed: input.processing_speed,
            cognitive_flexibility: input.cognitive_flexibility,
            insight: input.insight,
        };
        check_all(Self::FIELDS, &state.values())?;
        Ok(state)
    }

    /// Build from a name → value map of domains.
    pub fn from_fields(fields: &BTreeMap<String, f32>) -> TwinResult<Self> {
        let mut input = CognitiveInput::default();
        for (name, &value) in fields {
            let slot = match name.as_str() {
                "attention" => &mut input.attention,
                "concentration" => &mut input.concentration,
                "working_memory" => &mut input.working_memory,
                "long_term_memory" => &mut input.long_term_memory,
                "executive_function" => &mut input.executive_function,
                "decision_making" => &mut input.decision_making,
                "processing_speed" => &mut input.processing_speed,
                "cognitive_flexibility" => &mut input.cognitive_flexibility,
                "insight" => &mut input.insight,
                _ => return Err(TwinError::UnknownField { field: name.clone() }),
            };
            *slot = value;
        }
        Self::new(input)
    }

    fn values(&self) -> [f32; 9] {
        [
            self.attention,
            self.concentration,
            self.working_memory,
            self.long_term_memory,
            self.executive_function,
            self.decision_making,
            self.processing_speed,
            self.cognitive_flexibility,
            self.insight,
        ]
    }

    pub fn attention(&self) -> f32 {
        self.attention
    }

    pub fn concentration(&self) -> f32 {
        self.concentration
    }

    pub fn working_memory(&self) -> f32 {
        self.working_memory
    }

    pub fn long_term_memory(&self) -> f32 {
        self.long_term_memory
    }

    pub fn executive_function(&self) -> f32 {
        self.executive_function
    }

    pub fn decision_making(&self) -> f32 {
        self.decision_making
    }

    pub fn processing_speed(&self) -> f32 {
        self.processing_speed
    }

    pub fn cognitive_flexibility(&self) -> f32 {
        self.cognitive_flexibility
    }

    pub fn insight(&self) -> f32 {
        self.insight
    }

    /// Cognitive impairment with default scoring weights.
    pub fn cognitive_impairment(&self) -> f32 {
        DerivedMetricCalculator::default().cognitive_impairment(self)
    }

    /// Domains as a name → value map.
    pub fn to_field_map(&self) -> BTreeMap<String, f32> {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .map(|(&(name, _), value)| (name.to_string(), value))
            .collect()
    }

    /// Copy the current values into an editable input.
    pub fn to_input(&self) -> CognitiveInput {
        CognitiveInput {
            attention: self.attention,
            concentration: self.concentration,
            working_memory: self.working_memory,
            long_term_memory: self.long_term_memory,
            executive_function: self.executive_function,
            decision_making: self.decision_making,
            processing_speed: self.processing_speed,
            cognitive_flexibility: self.cognitive_flexibility,
            insight: self.insight,
        }
    }
}

impl TryFrom<CognitiveInput> for CognitiveState {
    type Error = TwinError;

    fn try_from(input: CognitiveInput) -> TwinResult<Self> {
        Self::new(input)
    }
}
