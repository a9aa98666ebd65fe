//! Organization hierarchy
//!
//! A forest of trees rooted at departments:
//! Department -> Division -> Squad -> Agent. Containers only aggregate;
//! they are built once and read top-down.

pub mod builder;
pub mod directory;
pub mod unit;

pub use builder::OrganizationBuilder;
pub use directory::{AgentDirectory, AgentSlot};
pub use unit::{Department, Division};
