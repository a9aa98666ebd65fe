//! Population control surface
//!
//! The operations a request front end drives, held in an explicit context
//! object instead of module-level state.

pub mod population;
pub mod response;

pub use population::{
    AgentSummary, BestSquadSnapshot, EvolveReport, InitializeReport, PopulationControl,
    PopulationSnapshot, SquadSummary,
};
pub use response::Response;
