//! Physiological and psychological needs that decay with simulated time

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::NeedsConfig;

pub const NEED_MIN: f64 = 0.0;
pub const NEED_MAX: f64 = 100.0;

/// Needs state of one agent
///
/// `hunger`, `thirst`, `bathroom` and `stress` grow worse upward;
/// `energy` is the only need where higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumanNeeds {
    pub hunger: f64,
    pub thirst: f64,
    pub bathroom: f64,
    pub energy: f64,
    pub stress: f64,
}

impl Default for HumanNeeds {
    fn default() -> Self {
        Self {
            hunger: 0.0,
            thirst: 0.0,
            bathroom: 0.0,
            energy: 100.0,
            stress: 0.0,
        }
    }
}

impl HumanNeeds {
    /// Advance needs by `time_delta_hours` of simulated time
    ///
    /// Stress growth is jittered by a uniform multiplier drawn from `rng`;
    /// everything else is deterministic in `time_delta_hours`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        time_delta_hours: f64,
        config: &NeedsConfig,
        rng: &mut R,
    ) {
        let jitter = if config.stress_jitter_min < config.stress_jitter_max {
            rng.gen_range(config.stress_jitter_min..=config.stress_jitter_max)
        } else {
            config.stress_jitter_min
        };

        self.hunger += config.hunger_rate * time_delta_hours;
        self.thirst += config.thirst_rate * time_delta_hours;
        self.bathroom += config.bathroom_rate * time_delta_hours;
        self.stress += config.stress_rate * time_delta_hours * jitter;
        self.energy -= config.energy_rate * time_delta_hours;

        self.hunger = self.hunger.clamp(NEED_MIN, NEED_MAX);
        self.thirst = self.thirst.clamp(NEED_MIN, NEED_MAX);
        self.bathroom = self.bathroom.clamp(NEED_MIN, NEED_MAX);
        self.stress = self.stress.clamp(NEED_MIN, NEED_MAX);
        self.energy = self.energy.clamp(NEED_MIN, NEED_MAX);
    }

    /// Severity of each need on a common 0..100 "worse is higher" scale
    fn severities(&self) -> [(NeedType, f64); 5] {
        [
            (NeedType::Hunger, self.hunger),
            (NeedType::Thirst, self.thirst),
            (NeedType::Bathroom, self.bathroom),
            (NeedType::Energy, NEED_MAX - self.energy),
            (NeedType::Stress, self.stress),
        ]
    }

    /// Get most pressing need
    pub fn most_pressing(&self) -> (NeedType, f64) {
        self.severities()
            .into_iter()
            .fold((NeedType::Hunger, f64::MIN), |best, need| {
                if need.1 > best.1 { need } else { best }
            })
    }

    pub fn is_critical(&self, threshold: f64) -> bool {
        self.critical_need(threshold).is_some()
    }

    /// First need whose severity is at or above `threshold`
    pub fn critical_need(&self, threshold: f64) -> Option<NeedType> {
        self.severities()
            .into_iter()
            .find(|(_, severity)| *severity >= threshold)
            .map(|(need, _)| need)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedType {
    Hunger,
    Thirst,
    Bathroom,
    Energy,
    Stress,
}
