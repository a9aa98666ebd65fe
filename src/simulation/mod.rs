pub mod clock;
pub mod engine;

pub use clock::SimulationClock;
pub use engine::{SimulationEngine, TickOutcome};
