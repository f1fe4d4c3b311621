//! Bounded clinical sub-state types.
//!
//! Each sub-state is built from an `*Input` record and validated atomically:
//! an out-of-range field fails construction and no instance is produced.

mod behavioral;
mod cognitive;
mod neurotransmitter;
mod psychological;
mod range;

#[cfg(test)]
mod tests;

pub use self::behavioral::{BehavioralInput, BehavioralState};
pub use self::cognitive::{CognitiveInput, CognitiveState};
pub use self::neurotransmitter::{NeurotransmitterInput, NeurotransmitterState};
pub use self::psychological::{PsychologicalInput, PsychologicalState};
pub use self::range::ValueRange;
