//! Generational evolution over squads
//!
//! Elitist selection, positional crossover between agents of two parent
//! squads drawn from the top half, and bounded Gaussian mutation.

use std::borrow::Cow;
use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::core::config::EvolutionConfig;
use crate::core::error::{MegadevError, Result};
use crate::entity::config::{
    ATTENTION_SPAN_MAX, INTEGER_TRAIT_MIN, MEMORY_CAPACITY_MAX, TRAIT_MAX, TRAIT_MIN,
};
use crate::entity::{Agent, AgentConfig, Background, Squad};

/// Parent names longer than this are replaced by an id prefix in child
/// names, so lineage labels stay bounded across generations.
const MAX_LINEAGE_LABEL: usize = 48;

/// Sample from N(0, sigma) with a Box-Muller transform
fn gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::EPSILON);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos() * sigma
}

fn lineage_label(agent: &Agent) -> Cow<'_, str> {
    if agent.name.len() <= MAX_LINEAGE_LABEL {
        Cow::Borrowed(agent.name.as_str())
    } else {
        let id = agent.id.0.simple().to_string();
        Cow::Owned(format!("#{}", &id[..8]))
    }
}

#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    config: EvolutionConfig,
    generation: u32,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generation: 0,
        })
    }

    pub fn with_sizes(population_size: usize, elite_size: usize) -> Result<Self> {
        Self::new(EvolutionConfig::new(population_size, elite_size))
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn population_size(&self) -> usize {
        self.config.population_size
    }

    pub fn elite_size(&self) -> usize {
        self.config.elite_size
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// `population_size` squads of `squad_size` random agents each
    pub fn create_initial_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Squad> {
        (0..self.config.population_size)
            .map(|i| Squad::create_random(format!("Squad-{}", i), self.config.squad_size, rng))
            .collect()
    }

    fn mutate_float<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) -> f64 {
        if rng.gen::<f64>() < self.config.mutation_rate {
            (value + gaussian(rng, self.config.mutation_sigma)).clamp(TRAIT_MIN, TRAIT_MAX)
        } else {
            value
        }
    }

    fn mutate_integer<R: Rng + ?Sized>(&self, value: u32, ceiling: u32, rng: &mut R) -> u32 {
        if rng.gen::<f64>() >= self.config.mutation_rate {
            return value;
        }
        let perturbed = (value as f64 + gaussian(rng, self.config.mutation_sigma))
            .trunc()
            .max(INTEGER_TRAIT_MIN as f64) as u32;
        if self.config.clamp_integer_ceiling {
            perturbed.min(ceiling)
        } else {
            perturbed
        }
    }

    /// Independently perturb each trait with probability `mutation_rate`
    pub fn mutate_config<R: Rng + ?Sized>(&self, config: &AgentConfig, rng: &mut R) -> AgentConfig {
        AgentConfig {
            learning_rate: self.mutate_float(config.learning_rate, rng),
            attention_span: self.mutate_integer(config.attention_span, ATTENTION_SPAN_MAX, rng),
            memory_capacity: self.mutate_integer(config.memory_capacity, MEMORY_CAPACITY_MAX, rng),
            creativity_factor: self.mutate_float(config.creativity_factor, rng),
            risk_tolerance: self.mutate_float(config.risk_tolerance, rng),
            cooperation_bias: self.mutate_float(config.cooperation_bias, rng),
            energy_efficiency: self.mutate_float(config.energy_efficiency, rng),
            adaptation_speed: self.mutate_float(config.adaptation_speed, rng),
        }
    }

    /// Blend two parents into a mutated child of the current generation
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Agent,
        parent2: &Agent,
        rng: &mut R,
    ) -> Agent {
        let blended = AgentConfig::average(&parent1.config, &parent2.config);
        let config = self.mutate_config(&blended, rng);
        let name = format!(
            "Gen{}-{}-{}",
            self.generation,
            lineage_label(parent1),
            lineage_label(parent2)
        );

        Agent {
            background: Background::random(rng),
            ..Agent::new(name, config).with_generation(self.generation)
        }
    }

    fn check_shape(squads: &[Squad]) -> Result<()> {
        let expected = match squads.first() {
            Some(squad) => squad.size(),
            None => return Err(MegadevError::EmptyPopulation),
        };
        match squads.iter().find(|s| s.size() != expected) {
            Some(squad) => Err(MegadevError::SquadSizeMismatch {
                squad: squad.name.clone(),
                expected,
                found: squad.size(),
            }),
            None => Ok(()),
        }
    }

    /// Produce the next generation from a fitness-scored population
    ///
    /// The top `elite_size` squads carry over unchanged; the rest are bred
    /// from two parents picked uniformly from the top half of the input,
    /// crossing agent `i` with agent `i`. The result always holds exactly
    /// `population_size` squads.
    pub fn evolve_population<R: Rng + ?Sized>(
        &mut self,
        squads: &[Squad],
        rng: &mut R,
    ) -> Result<Vec<Squad>> {
        Self::check_shape(squads)?;

        self.generation += 1;

        let mut sorted: Vec<&Squad> = squads.iter().collect();
        sorted.sort_by_key(|s| Reverse(OrderedFloat(s.fitness_score)));

        let elite = self.config.elite_size.min(sorted.len());
        let mut population: Vec<Squad> = Vec::with_capacity(self.config.population_size);
        population.extend(sorted[..elite].iter().map(|&s| s.clone()));

        let pool = (sorted.len() / 2).max(1);
        while population.len() < self.config.population_size {
            let parent1 = sorted[rng.gen_range(0..pool)];
            let parent2 = sorted[rng.gen_range(0..pool)];

            let agents = parent1
                .agents
                .iter()
                .zip(&parent2.agents)
                .map(|(a, b)| self.crossover(a, b, rng))
                .collect();

            let mut squad = Squad::new(
                format!("Squad-Gen{}-{}", self.generation, population.len()),
                agents,
            );
            squad.generation = self.generation;
            population.push(squad);
        }

        tracing::debug!(
            generation = self.generation,
            elite,
            offspring = population.len() - elite,
            best_parent_fitness = sorted[0].fitness_score,
            "Evolved population"
        );

        Ok(population)
    }
}
