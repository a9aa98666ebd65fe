//! Population evolution
//!
//! The engine itself is a pure batch transformation over a list of squads.
//! Fitness comes from outside, through a [`FitnessEvaluator`].

pub mod engine;
pub mod fitness;
pub mod tournament;

pub use engine::EvolutionEngine;
pub use fitness::{Challenge, ChallengeFitness, FitnessEvaluator, RandomFitness};
pub use tournament::{HallOfFameEntry, RoundSummary, Tournament};
