//! Elimination tournament
//!
//! Each round scores every squad on the round's challenge and drops the
//! bottom half, until one squad remains.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::entity::Squad;
use crate::evolution::fitness::{Challenge, ChallengeFitness, FitnessEvaluator};

/// Hall-of-fame entries are only recorded once the field is this small
pub const HALL_OF_FAME_FIELD: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallOfFameEntry {
    pub round: u32,
    pub challenge: Challenge,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub challenge: Challenge,
    pub competing: usize,
    pub eliminated: usize,
    pub remaining: usize,
}

pub struct Tournament {
    squads: Vec<Squad>,
    round: u32,
    hall_of_fame: Vec<HallOfFameEntry>,
    rng: ChaCha8Rng,
}

impl Tournament {
    /// Split `initial_devs` agents into random squads of `squad_size`
    pub fn new(initial_devs: usize, squad_size: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let squad_size = squad_size.max(1);
        let squads = (0..initial_devs / squad_size)
            .map(|i| Squad::create_random(format!("Squad-{}", i), squad_size, &mut rng))
            .collect();
        Self::with_squads(squads, rng)
    }

    pub fn with_squads(squads: Vec<Squad>, rng: ChaCha8Rng) -> Self {
        Self {
            squads,
            round: 0,
            hall_of_fame: Vec::new(),
            rng,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Remaining squads; ranked by score after the first round
    pub fn squads(&self) -> &[Squad] {
        &self.squads
    }

    pub fn leaderboard(&self, top: usize) -> &[Squad] {
        &self.squads[..top.min(self.squads.len())]
    }

    pub fn hall_of_fame(&self) -> &[HallOfFameEntry] {
        &self.hall_of_fame
    }

    pub fn is_finished(&self) -> bool {
        self.squads.len() <= 1
    }

    /// Play one round; `None` once a single squad (or none) remains
    pub fn run_round(&mut self) -> Option<RoundSummary> {
        if self.is_finished() {
            return None;
        }

        self.round += 1;
        let mut evaluator = ChallengeFitness::for_round(self.round);
        let challenge = evaluator.challenge;
        evaluator.evaluate_all(&mut self.squads, &mut self.rng);

        self.squads
            .sort_by_key(|s| Reverse(OrderedFloat(s.fitness_score)));
        let competing = self.squads.len();
        let eliminated = competing / 2;
        self.squads.truncate(competing - eliminated);

        if self.squads.len() <= HALL_OF_FAME_FIELD {
            let top = &self.squads[0];
            self.hall_of_fame.push(HallOfFameEntry {
                round: self.round,
                challenge,
                name: top.name.clone(),
                score: top.fitness_score,
            });
        }

        tracing::info!(
            round = self.round,
            challenge = challenge.title(),
            competing,
            eliminated,
            "Tournament round complete"
        );

        Some(RoundSummary {
            round: self.round,
            challenge,
            competing,
            eliminated,
            remaining: self.squads.len(),
        })
    }

    /// Play rounds until one squad remains and return it
    pub fn run_to_completion(&mut self) -> Option<&Squad> {
        while self.run_round().is_some() {}
        self.squads.first()
    }
}
