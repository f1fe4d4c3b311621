//! Names of derived outputs and severity tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Condition whose severity is tracked in `condition_severities`.
///
/// # Example
/// ```rust
/// use digital_twin_core::scoring::Condition;
///
/// assert_eq!(Condition::CognitiveImpairment.to_string(), "cognitive_impairment");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Depression,
    Anxiety,
    CognitiveImpairment,
    FunctionalImpairment,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Self::Depression,
        Self::Anxiety,
        Self::CognitiveImpairment,
        Self::FunctionalImpairment,
    ];

    /// Key used in the severity map.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Depression => "depression",
            Self::Anxiety => "anxiety",
            Self::CognitiveImpairment => "cognitive_impairment",
            Self::FunctionalImpairment => "functional_impairment",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard grouping tracked in `symptom_clusters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCluster {
    Mood,
    Anxiety,
    Cognition,
    Neurovegetative,
}

impl SymptomCluster {
    pub const ALL: [SymptomCluster; 4] = [
        Self::Mood,
        Self::Anxiety,
        Self::Cognition,
        Self::Neurovegetative,
    ];

    /// Key used in the cluster map.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mood => "mood",
            Self::Anxiety => "anxiety",
            Self::Cognition => "cognition",
            Self::Neurovegetative => "neurovegetative",
        }
    }
}

impl fmt::Display for SymptomCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative band for a `[0, 1]` severity score.
///
/// | Tier     | Score        |
/// |----------|--------------|
/// | None     | `< 0.2`      |
/// | Mild     | `[0.2, 0.4)` |
/// | Moderate | `[0.4, 0.7)` |
/// | Severe   | `>= 0.7`     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    None,
    Mild,
    Moderate,
    Severe,
}

impl SeverityTier {
    pub const MILD_THRESHOLD: f32 = 0.2;
    pub const MODERATE_THRESHOLD: f32 = 0.4;
    pub const SEVERE_THRESHOLD: f32 = 0.7;

    /// Classify a score. NaN maps to `Severe` so it is never under-reported.
    pub fn from_score(score: f32) -> Self {
        if score < Self::MILD_THRESHOLD {
            Self::None
        } else if score < Self::MODERATE_THRESHOLD {
            Self::Mild
        } else if score < Self::SEVERE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(SeverityTier::from_score(0.0), SeverityTier::None);
        assert_eq!(SeverityTier::from_score(0.19), SeverityTier::None);
        assert_eq!(SeverityTier::from_score(0.2), SeverityTier::Mild);
        assert_eq!(SeverityTier::from_score(0.4), SeverityTier::Moderate);
        assert_eq!(SeverityTier::from_score(0.69), SeverityTier::Moderate);
        assert_eq!(SeverityTier::from_score(0.7), SeverityTier::Severe);
        assert_eq!(SeverityTier::from_score(1.0), SeverityTier::Severe);
        assert_eq!(SeverityTier::from_score(f32::NAN), SeverityTier::Severe);
    }

    #[test]
    fn test_names_serialize_snake_case() {
        let json = serde_json::to_string(&Condition::FunctionalImpairment).unwrap();
        assert_eq!(json, "\"functional_impairment\"");
        let cluster: SymptomCluster = serde_json::from_str("\"neurovegetative\"").unwrap();
        assert_eq!(cluster, SymptomCluster::Neurovegetative);
        assert_eq!(SeverityTier::Moderate.to_string(), "moderate");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = Condition::ALL.iter().map(|c| c.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 4);
    }
}
