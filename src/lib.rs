//! Megadev - Evolving Developer Squads
//!
//! Squads of agents with evolvable trait configurations are bred across
//! generations, and an organization of departments, divisions and squads
//! is advanced through simulated time with decaying human needs.

pub mod control;
pub mod core;
pub mod entity;
pub mod evolution;
pub mod organization;
pub mod persistence;
pub mod simulation;
