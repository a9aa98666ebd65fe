//! Fitness assignment
//!
//! Fitness is assigned from outside the evolution engine. Two evaluators
//! ship with the crate: a pseudorandom one and a trait-weighted challenge
//! score that rotates between three challenge kinds.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::entity::config::{ATTENTION_SPAN_MAX, MEMORY_CAPACITY_MAX};
use crate::entity::{AgentConfig, Squad};

pub trait FitnessEvaluator {
    /// Assign `fitness_score` to the squad and its agents
    fn evaluate(&mut self, squad: &mut Squad, rng: &mut dyn RngCore);

    fn evaluate_all(&mut self, squads: &mut [Squad], rng: &mut dyn RngCore) {
        for squad in squads.iter_mut() {
            self.evaluate(squad, rng);
        }
    }
}

/// Squad fitness is the sum of one uniform draw per agent; each agent then
/// gets its own independent draw
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFitness;

impl FitnessEvaluator for RandomFitness {
    fn evaluate(&mut self, squad: &mut Squad, rng: &mut dyn RngCore) {
        squad.fitness_score = (0..squad.agents.len()).map(|_| rng.gen::<f64>()).sum();
        for agent in squad.agents.iter_mut() {
            agent.fitness_score = rng.gen();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Challenge {
    AlgorithmBattle,
    SystemDesignShowdown,
    DebugDeathMatch,
}

impl Challenge {
    pub fn for_round(round: u32) -> Self {
        match round % 3 {
            0 => Challenge::AlgorithmBattle,
            1 => Challenge::SystemDesignShowdown,
            _ => Challenge::DebugDeathMatch,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Challenge::AlgorithmBattle => "Algorithm Battle",
            Challenge::SystemDesignShowdown => "System Design Showdown",
            Challenge::DebugDeathMatch => "Debug Death Match",
        }
    }

    /// Unjittered score of one agent; integer traits are normalized to [0, 1]
    pub fn base_score(&self, config: &AgentConfig) -> f64 {
        let attention = config.attention_span as f64 / ATTENTION_SPAN_MAX as f64;
        let memory = config.memory_capacity as f64 / MEMORY_CAPACITY_MAX as f64;
        match self {
            Challenge::AlgorithmBattle => {
                config.learning_rate * 0.4 + memory * 0.4 + attention * 0.2
            }
            Challenge::SystemDesignShowdown => {
                config.creativity_factor * 0.3
                    + config.cooperation_bias * 0.4
                    + config.risk_tolerance * 0.3
            }
            Challenge::DebugDeathMatch => {
                config.adaptation_speed * 0.5 + config.energy_efficiency * 0.3 + attention * 0.2
            }
        }
    }
}

/// Mean of per-agent challenge scores, each jittered by uniform(0.8, 1.2)
#[derive(Debug, Clone, Copy)]
pub struct ChallengeFitness {
    pub challenge: Challenge,
}

impl ChallengeFitness {
    pub fn for_round(round: u32) -> Self {
        Self {
            challenge: Challenge::for_round(round),
        }
    }
}

impl FitnessEvaluator for ChallengeFitness {
    fn evaluate(&mut self, squad: &mut Squad, rng: &mut dyn RngCore) {
        if squad.agents.is_empty() {
            squad.fitness_score = 0.0;
            return;
        }
        let mut total = 0.0;
        for agent in squad.agents.iter_mut() {
            let score = self.challenge.base_score(&agent.config) * rng.gen_range(0.8..=1.2);
            agent.fitness_score = score;
            total += score;
        }
        squad.fitness_score = total / squad.agents.len() as f64;
    }
}
