pub mod sequencer;

pub use sequencer::{Phase, PhaseSequencer};
