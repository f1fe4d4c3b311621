//! Digital Twin Core Library
//!
//! Clinical state model for a patient digital twin: four bounded sub-states,
//! a derived-metric calculator, and the aggregate state that ties them
//! together.
//!
//! # Architecture
//!
//! This crate defines:
//! - Sub-state types (`NeurotransmitterState`, `PsychologicalState`, etc.)
//! - Derived-metric scoring (condition severities, symptom clusters)
//! - The aggregate `DigitalTwinState` and its flat-record boundary
//! - Error types and result aliases
//! - Configuration structures
//!
//! # Example
//!
//! ```
//! use digital_twin_core::types::{NeurotransmitterInput, NeurotransmitterState};
//!
//! let neutral = NeurotransmitterState::default();
//! assert_eq!(neutral.balance_index(), 1.0);
//!
//! let low_serotonin = NeurotransmitterState::new(NeurotransmitterInput {
//!     serotonin: -0.7,
//!     ..Default::default()
//! })
//! .unwrap();
//! assert!(low_serotonin.balance_index() < 1.0);
//! ```

pub mod config;
pub mod error;
pub mod scoring;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use config::TwinConfig;
pub use error::{TwinError, TwinResult};
pub use scoring::{Condition, DerivedMetricCalculator, SeverityTier, SymptomCluster};
pub use state::{DigitalTwinState, FlatRecord, FlatValue, STATE_MODEL_VERSION};
pub use types::{
    BehavioralState, CognitiveState, NeurotransmitterState, PsychologicalState, ValueRange,
};
