//! Neurotransmitter sub-state: synaptic and neuromodulator levels.
//!
//! The five core levels are bidirectional in `[-1, 1]`, zero being the
//! neutral baseline. Inflammation markers and circuit connectivity are open
//! auxiliary mappings that the scoring formulas do not read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};
use crate::scoring::DerivedMetricCalculator;

use super::range::{check_all, ValueRange};

/// Raw field values for a [`NeurotransmitterState`].
///
/// Omitted fields default to the neutral value `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NeurotransmitterInput {
    pub serotonin: f32,
    pub dopamine: f32,
    pub norepinephrine: f32,
    pub gaba: f32,
    pub glutamate: f32,
    pub inflammation_markers: BTreeMap<String, f32>,
    pub circuit_connectivity: BTreeMap<String, f32>,
}

/// Validated neurotransmitter levels.
///
/// Every instance has all five core levels inside `[-1, 1]`; there is no way
/// to observe a partially valid value.
///
/// # Example
/// ```rust
/// use digital_twin_core::types::{NeurotransmitterInput, NeurotransmitterState};
///
/// let state = NeurotransmitterState::new(NeurotransmitterInput {
///     serotonin: -0.5,
///     dopamine: -0.4,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(state.serotonin(), -0.5);
/// assert!(state.balance_index() < 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NeurotransmitterInput")]
pub struct NeurotransmitterState {
    serotonin: f32,
    dopamine: f32,
    norepinephrine: f32,
    gaba: f32,
    glutamate: f32,
    inflammation_markers: BTreeMap<String, f32>,
    circuit_connectivity: BTreeMap<String, f32>,
}

impl NeurotransmitterState {
    /// Bounded fields and their ranges, in declaration order.
    pub const FIELDS: &'static [(&'static str, ValueRange)] = &[
        ("serotonin", ValueRange::BIDIRECTIONAL),
        ("dopamine", ValueRange::BIDIRECTIONAL),
        ("norepinephrine", ValueRange::BIDIRECTIONAL),
        ("gaba", ValueRange::BIDIRECTIONAL),
        ("glutamate", ValueRange::BIDIRECTIONAL),
    ];

    /// Validate `input` and build the state.
    ///
    /// # Errors
    /// [`TwinError::OutOfRange`] naming the first offending field.
    pub fn new(input: NeurotransmitterInput) -> TwinResult<Self> {
        let state = Self {
            serotonin: input.serotonin,
            dopamine: input.dopamine,
            norepinephrine: input.norepinephrine,
            gaba: input.gaba,
            glutamate: input.glutamate,
            inflammation_markers: input.inflammation_markers,
            circuit_connectivity: input.circuit_connectivity,
        };
        check_all(Self::FIELDS, &state.levels())?;
        Ok(state)
    }

    /// Build from a name → value map of core levels.
    ///
    /// # Errors
    /// [`TwinError::UnknownField`] for names outside [`Self::FIELDS`], or
    /// [`TwinError::OutOfRange`] from validation.
    pub fn from_fields(fields: &BTreeMap<String, f32>) -> TwinResult<Self> {
        let mut input = NeurotransmitterInput::default();
        for (name, &value) in fields {
            match name.as_str() {
                "serotonin" => input.serotonin = value,
                "dopamine" => input.dopamine = value,
                "norepinephrine" => input.norepinephrine = value,
                "gaba" => input.gaba = value,
                "glutamate" => input.glutamate = value,
                _ => return Err(TwinError::UnknownField { field: name.clone() }),
            }
        }
        Self::new(input)
    }

    pub fn serotonin(&self) -> f32 {
        self.serotonin
    }

    pub fn dopamine(&self) -> f32 {
        self.dopamine
    }

    pub fn norepinephrine(&self) -> f32 {
        self.norepinephrine
    }

    pub fn gaba(&self) -> f32 {
        self.gaba
    }

    pub fn glutamate(&self) -> f32 {
        self.glutamate
    }

    /// The five core levels in [`Self::FIELDS`] order.
    #[inline]
    pub fn levels(&self) -> [f32; 5] {
        [
            self.serotonin,
            self.dopamine,
            self.norepinephrine,
            self.gaba,
            self.glutamate,
        ]
    }

    pub fn inflammation_markers(&self) -> &BTreeMap<String, f32> {
        &self.inflammation_markers
    }

    pub fn circuit_connectivity(&self) -> &BTreeMap<String, f32> {
        &self.circuit_connectivity
    }

    /// Balance index with default scoring weights (1.0 = all levels neutral).
    pub fn balance_index(&self) -> f32 {
        DerivedMetricCalculator::default().balance_index(self)
    }

    /// Core levels as a name → value map.
    pub fn to_field_map(&self) -> BTreeMap<String, f32> {
        Self::FIELDS
            .iter()
            .zip(self.levels())
            .map(|(&(name, _), value)| (name.to_string(), value))
            .collect()
    }

    /// Copy the current values into an editable input.
    pub fn to_input(&self) -> NeurotransmitterInput {
        NeurotransmitterInput {
            serotonin: self.serotonin,
            dopamine: self.dopamine,
            norepinephrine: self.norepinephrine,
            gaba: self.gaba,
            glutamate: self.glutamate,
            inflammation_markers: self.inflammation_markers.clone(),
            circuit_connectivity: self.circuit_connectivity.clone(),
        }
    }
}

impl TryFrom<NeurotransmitterInput> for NeurotransmitterState {
    type Error = TwinError;

    fn try_from(input: NeurotransmitterInput) -> TwinResult<Self> {
        Self::new(input)
    }
}
