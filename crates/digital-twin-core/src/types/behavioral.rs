//! Behavioral sub-state: sleep, activity, social and self-care dimensions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};

use super::range::{check_all, ValueRange};

/// Raw field values for a [`BehavioralState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehavioralInput {
    pub activity_level: f32,
    pub psychomotor_change: f32,
    pub sleep_quality: f32,
    /// Hours of sleep per day [0, 24]
    pub sleep_duration_hours: f32,
    pub circadian_regularity: f32,
    pub appetite_level: f32,
    pub weight_change: f32,
    pub social_engagement: f32,
    pub self_care: f32,
    pub avoidance_behaviors: BTreeMap<String, f32>,
}

/// Validated behavioral dimensions.
///
/// # Ranges
/// - bidirectional `[-1, 1]`: activity level, psychomotor change, appetite
///   level, weight change
/// - unipolar `[0, 1]`: sleep quality, circadian regularity, social
///   engagement, self-care
/// - sleep duration: `[0, 24]` hours
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BehavioralInput")]
pub struct BehavioralState {
    activity_level: f32,
    psychomotor_change: f32,
    sleep_quality: f32,
    sleep_duration_hours: f32,
    circadian_regularity: f32,
    appetite_level: f32,
    weight_change: f32,
    social_engagement: f32,
    self_care: f32,
    avoidance_behaviors: BTreeMap<String, f32>,
}

impl BehavioralState {
    /// Bounded fields and their ranges, in declaration order.
    pub const FIELDS: &'static [(&'static str, ValueRange)] = &[
        ("activity_level", ValueRange::BIDIRECTIONAL),
        ("psychomotor_change", ValueRange::BIDIRECTIONAL),
        ("sleep_quality", ValueRange::UNIPOLAR),
        ("sleep_duration_hours", ValueRange::SLEEP_HOURS),
        ("circadian_regularity", ValueRange::UNIPOLAR),
        ("appetite_level", ValueRange::BIDIRECTIONAL),
        ("weight_change", ValueRange::BIDIRECTIONAL),
        ("social_engagement", ValueRange::UNIPOLAR),
        ("self_care", ValueRange::UNIPOLAR),
    ];

    /// Validate `input` and build the state.
    pub fn new(input: BehavioralInput) -> TwinResult<Self> {
        let state = Self {
            activity_level: input.activity_level,
            psychomotor_change: input.psychomotor_change,
            sleep_quality: input.sleep_quality,
            sleep_duration_hours: input.sleep_duration_hours,
            circadian_regularity: input.circadian_regularity,
            appetite_level: input.appetite_level,
            weight_change: input.weight_change,
            social_engagement: input.social_engagement,
            self_care: input.self_care,
            avoidance_behaviors: input.avoidance_behaviors,
        };
        check_all(Self::FIELDS, &state.values())?;
        Ok(state)
    }

    /// Build from a name → value map of bounded fields.
    pub fn from_fields(fields: &BTreeMap<String, f32>) -> TwinResult<Self> {
        let mut input = BehavioralInput::default();
        for (name, &value) in fields {
            let slot = match name.as_str() {
                "activity_level" => &mut input.activity_level,
                "psychomotor_change" => &mut input.psychomotor_change,
                "sleep_quality" => &mut input.sleep_quality,
                "sleep_duration_hours" => &mut input.sleep_duration_hours,
                "circadian_regularity" => &mut input.circadian_regularity,
                "appetite_level" => &mut input.appetite_level,
                "weight_change" => &mut input.weight_change,
                "social_engagement" => &mut input.social_engagement,
                "self_care" => &mut input.self_care,
                _ => return Err(TwinError::UnknownField { field: name.clone() }),
            };
            *slot = value;
        }
        Self::new(input)
    }

    fn values(&self) -> [f32; 9] {
        [
            self.activity_level,
            self.psychomotor_change,
            self.sleep_quality,
            self.sleep_duration_hours,
            self.circadian_regularity,
            self.appetite_level,
            self.weight_change,
            self.social_engagement,
            self.self_care,
        ]
    }

    pub fn activity_level(&self) -> f32 {
        self.activity_level
    }

    pub fn psychomotor_change(&self) -> f32 {
        self.psychomotor_change
    }

    pub fn sleep_quality(&self) -> f32 {
        self.sleep_quality
    }

    pub fn sleep_duration_hours(&self) -> f32 {
        self.sleep_duration_hours
    }

    pub fn circadian_regularity(&self) -> f32 {
        self.circadian_regularity
    }

    pub fn appetite_level(&self) -> f32 {
        self.appetite_level
    }

    pub fn weight_change(&self) -> f32 {
        self.weight_change
    }

    pub fn social_engagement(&self) -> f32 {
        self.social_engagement
    }

    pub fn self_care(&self) -> f32 {
        self.self_care
    }

    pub fn avoidance_behaviors(&self) -> &BTreeMap<String, f32> {
        &self.avoidance_behaviors
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
    pub fn to_input(&self) -> BehavioralInput {
        BehavioralInput {
            activity_level: self.activity_level,
            psychomotor_change: self.psychomotor_change,
            sleep_quality: self.sleep_quality,
            sleep_duration_hours: self.sleep_duration_hours,
            circadian_regularity: self.circadian_regularity,
            appetite_level: self.appetite_level,
            weight_change: self.weight_change,
            social_engagement: self.social_engagement,
            self_care: self.self_care,
            avoidance_behaviors: self.avoidance_behaviors.clone(),
        }
    }
}

impl TryFrom<BehavioralInput> for BehavioralState {
    type Error = TwinError;

    fn try_from(input: BehavioralInput) -> TwinResult<Self> {
        Self::new(input)
    }
}
