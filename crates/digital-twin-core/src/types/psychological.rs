//! Psychological sub-state: mood, affect and self-report dimensions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};

use super::range::{check_all, ValueRange};

/// Raw field values for a [`PsychologicalState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PsychologicalInput {
    /// Negative to positive affect [-1, 1]
    pub mood_valence: f32,
    /// Low to high activation [-1, 1]
    pub mood_arousal: f32,
    pub mood_stability: f32,
    pub anxiety_level: f32,
    pub stress_reactivity: f32,
    pub rumination: f32,
    pub anhedonia: f32,
    /// Avolition to drive [-1, 1]
    pub motivation: f32,
    pub emotional_regulation: f32,
    pub cognitive_distortions: BTreeMap<String, f32>,
}

/// Validated psychological dimensions.
///
/// Valence, arousal and motivation are bidirectional; everything else is
/// unipolar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PsychologicalInput")]
pub struct PsychologicalState {
    mood_valence: f32,
    mood_arousal: f32,
    mood_stability: f32,
    anxiety_level: f32,
    stress_reactivity: f32,
    rumination: f32,
    anhedonia: f32,
    motivation: f32,
    emotional_regulation: f32,
    cognitive_distortions: BTreeMap<String, f32>,
}

impl PsychologicalState {
    /// Bounded fields and their ranges, in declaration order.
    pub const FIELDS: &'static [(&'static str, ValueRange)] = &[
        ("mood_valence", ValueRange::BIDIRECTIONAL),
        ("mood_arousal", ValueRange::BIDIRECTIONAL),
        ("mood_stability", ValueRange::UNIPOLAR),
        ("anxiety_level", ValueRange::UNIPOLAR),
        ("stress_reactivity", ValueRange::UNIPOLAR),
        ("rumination", ValueRange::UNIPOLAR),
        ("anhedonia", ValueRange::UNIPOLAR),
        ("motivation", ValueRange::BIDIRECTIONAL),
        ("emotional_regulation", ValueRange::UNIPOLAR),
    ];

    /// Validate `input` and build the state.
    pub fn new(input: PsychologicalInput) -> TwinResult<Self> {
        let state = Self {
            mood_valence: input.mood_valence,
            mood_arousal: input.mood_arousal,
            mood_stability: input.mood_stability,
            anxiety_level: input.anxiety_level,
            stress_reactivity: input.stress_reactivity,
            rumination: input.rumination,
            anhedonia: input.anhedonia,
            motivation: input.motivation,
            emotional_regulation: input.emotional_regulation,
            cognitive_distortions: input.cognitive_distortions,
        };
        check_all(Self::FIELDS, &state.values())?;
        Ok(state)
    }

    /// Build from a name → value map of bounded fields.
    pub fn from_fields(fields: &BTreeMap<String, f32>) -> TwinResult<Self> {
        let mut input = PsychologicalInput::default();
        for (name, &value) in fields {
            let slot = match name.as_str() {
                "mood_valence" => &mut input.mood_valence,
                "mood_arousal" => &mut input.mood_arousal,
                "mood_stability" => &mut input.mood_stability,
                "anxiety_level" => &mut input.anxiety_level,
                "stress_reactivity" => &mut input.stress_reactivity,
                "rumination" => &mut input.rumination,
                "anhedonia" => &mut input.anhedonia,
                "motivation" => &mut input.motivation,
                "emotional_regulation" => &mut input.emotional_regulation,
                _ => return Err(TwinError::UnknownField { field: name.clone() }),
            };
            *slot = value;
        }
        Self::new(input)
    }

    fn values(&self) -> [f32; 9] {
        [
            self.mood_valence,
            self.mood_arousal,
            self.mood_stability,
            self.anxiety_level,
            self.stress_reactivity,
            self.rumination,
            self.anhedonia,
            self.motivation,
            self.emotional_regulation,
        ]
    }

    pub fn mood_valence(&self) -> f32 {
        self.mood_valence
    }

    pub fn mood_arousal(&self) -> f32 {
        self.mood_arousal
    }

    pub fn mood_stability(&self) -> f32 {
        self.mood_stability
    }

    pub fn anxiety_level(&self) -> f32 {
        self.anxiety_level
    }

    pub fn stress_reactivity(&self) -> f32 {
        self.stress_reactivity
    }

    pub fn rumination(&self) -> f32 {
        self.rumination
    }

    pub fn anhedonia(&self) -> f32 {
        self.anhedonia
    }

    pub fn motivation(&self) -> f32 {
        self.motivation
    }

    pub fn emotional_regulation(&self) -> f32 {
        self.emotional_regulation
    }

    pub fn cognitive_distortions(&self) -> &BTreeMap<String, f32> {
        &self.cognitive_distortions
    }

    /// Bounded fields as a name → value map.
    pub fn to_field_map(&self) -> BTreeMap<String, f32> {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .map(|(&(name, _), value)| (name.to_string(), value))
            .collect()
    }

    /// Copy the current values into an editable input.
    pub fn to_input(&self) -> PsychologicalInput {
        PsychologicalInput {
            mood_valence: self.mood_valence,
            mood_arousal: self.mood_arousal,
            mood_stability: self.mood_stability,
            anxiety_level: self.anxiety_level,
            stress_reactivity: self.stress_reactivity,
            rumination: self.rumination,
            anhedonia: self.anhedonia,
            motivation: self.motivation,
            emotional_regulation: self.emotional_regulation,
            cognitive_distortions: self.cognitive_distortions.clone(),
        }
    }
}

impl TryFrom<PsychologicalInput> for PsychologicalState {
    type Error = TwinError;

    fn try_from(input: PsychologicalInput) -> TwinResult<Self> {
        Self::new(input)
    }
}
