pub mod agent;
pub mod background;
pub mod config;
pub mod needs;

pub use agent::{Agent, Squad};
pub use background::{Background, EducationLevel};
pub use config::AgentConfig;
pub use needs::{HumanNeeds, NeedType};
