pub mod config;
pub mod error;
pub mod types;

pub use config::{EvolutionConfig, MegadevConfig, NeedsConfig, SimulationConfig};
pub use error::{MegadevError, Result};
pub use types::{AgentId, DepartmentId, DivisionId, SquadId};
