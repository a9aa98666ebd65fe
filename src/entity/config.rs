//! Agent trait configuration
//!
//! Eight independent traits. Six are normalized floats in [0.1, 1.0]; the
//! two integer traits are drawn from [1, 10] and [1, 100] at creation.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const TRAIT_MIN: f64 = 0.1;
pub const TRAIT_MAX: f64 = 1.0;
pub const ATTENTION_SPAN_MAX: u32 = 10;
pub const MEMORY_CAPACITY_MAX: u32 = 100;
/// Lower bound shared by both integer traits
pub const INTEGER_TRAIT_MIN: u32 = 1;

fn floor_mean(a: u32, b: u32) -> u32 {
    ((a as u64 + b as u64) / 2) as u32
}

/// Evolvable parameters of one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub learning_rate: f64,
    pub attention_span: u32,
    pub memory_capacity: u32,
    pub creativity_factor: f64,
    pub risk_tolerance: f64,
    pub cooperation_bias: f64,
    pub energy_efficiency: f64,
    pub adaptation_speed: f64,
}

impl AgentConfig {
    /// Draw every trait independently and uniformly from its domain
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            learning_rate: rng.gen_range(TRAIT_MIN..=TRAIT_MAX),
            attention_span: rng.gen_range(INTEGER_TRAIT_MIN..=ATTENTION_SPAN_MAX),
            memory_capacity: rng.gen_range(INTEGER_TRAIT_MIN..=MEMORY_CAPACITY_MAX),
            creativity_factor: rng.gen_range(TRAIT_MIN..=TRAIT_MAX),
            risk_tolerance: rng.gen_range(TRAIT_MIN..=TRAIT_MAX),
            cooperation_bias: rng.gen_range(TRAIT_MIN..=TRAIT_MAX),
            energy_efficiency: rng.gen_range(TRAIT_MIN..=TRAIT_MAX),
            adaptation_speed: rng.gen_range(TRAIT_MIN..=TRAIT_MAX),
        }
    }

    /// Blend two parents: float traits take the mean, integer traits the
    /// floor of the mean
    pub fn average(a: &Self, b: &Self) -> Self {
        Self {
            learning_rate: (a.learning_rate + b.learning_rate) / 2.0,
            attention_span: floor_mean(a.attention_span, b.attention_span),
            memory_capacity: floor_mean(a.memory_capacity, b.memory_capacity),
            creativity_factor: (a.creativity_factor + b.creativity_factor) / 2.0,
            risk_tolerance: (a.risk_tolerance + b.risk_tolerance) / 2.0,
            cooperation_bias: (a.cooperation_bias + b.cooperation_bias) / 2.0,
            energy_efficiency: (a.energy_efficiency + b.energy_efficiency) / 2.0,
            adaptation_speed: (a.adaptation_speed + b.adaptation_speed) / 2.0,
        }
    }

    pub fn float_traits(&self) -> [f64; 6] {
        [
            self.learning_rate,
            self.creativity_factor,
            self.risk_tolerance,
            self.cooperation_bias,
            self.energy_efficiency,
            self.adaptation_speed,
        ]
    }

    /// Check every trait against its domain
    ///
    /// With `check_ceiling` false the integer traits only need to be >= 1.
    pub fn is_within_bounds(&self, check_ceiling: bool) -> bool {
        let floats_ok = self
            .float_traits()
            .iter()
            .all(|v| (TRAIT_MIN..=TRAIT_MAX).contains(v));
        let ints_ok = self.attention_span >= INTEGER_TRAIT_MIN
            && self.memory_capacity >= INTEGER_TRAIT_MIN
            && (!check_ceiling
                || (self.attention_span <= ATTENTION_SPAN_MAX
                    && self.memory_capacity <= MEMORY_CAPACITY_MAX));
        floats_ok && ints_ok
    }
}
