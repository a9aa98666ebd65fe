//! Population lifecycle driven by a front end
//!
//! `PopulationControl` owns everything a request handler needs between
//! calls: the engine, the current population and its generation, and the
//! random source. The hosting process creates one and passes it to each
//! operation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::core::config::EvolutionConfig;
use crate::core::error::{MegadevError, Result};
use crate::core::types::{AgentId, SquadId};
use crate::entity::{AgentConfig, Squad};
use crate::evolution::{EvolutionEngine, FitnessEvaluator, RandomFitness};

pub const POPULATION_SIZE_RANGE: (usize, usize) = (2, 100);
pub const SQUAD_SIZE_RANGE: (usize, usize) = (1, 10);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializeReport {
    pub population_size: usize,
    pub squad_size: usize,
    pub generation: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolveReport {
    pub generation: u32,
    pub best_fitness: f64,
    pub average_fitness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadSummary {
    pub id: SquadId,
    pub name: String,
    pub fitness: f64,
    pub agents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSnapshot {
    pub generation: u32,
    pub population_size: usize,
    pub squads: Vec<SquadSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub name: String,
    pub fitness: f64,
    pub config: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSquadSnapshot {
    pub id: SquadId,
    pub name: String,
    pub fitness: f64,
    pub generation: u32,
    pub agents: Vec<AgentSummary>,
}

fn check_range(field: &'static str, value: usize, (min, max): (usize, usize)) -> Result<()> {
    if value < min || value > max {
        return Err(MegadevError::OutOfRange {
            field,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(())
}

/// Highest fitness; the earliest squad wins ties
fn fittest(squads: &[Squad]) -> Option<&Squad> {
    squads.iter().fold(None, |best: Option<&Squad>, squad| match best {
        Some(b) if b.fitness_score >= squad.fitness_score => Some(b),
        _ => Some(squad),
    })
}

pub struct PopulationControl {
    base: EvolutionConfig,
    engine: Option<EvolutionEngine>,
    population: Vec<Squad>,
    generation: u32,
    rng: ChaCha8Rng,
}

impl PopulationControl {
    /// `base` supplies the mutation settings and preferred elite size used
    /// by every population this controller initializes
    pub fn new(base: EvolutionConfig, seed: Option<u64>) -> Result<Self> {
        base.validate()?;
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            base,
            engine: None,
            population: Vec::new(),
            generation: 0,
            rng,
        })
    }

    pub fn population(&self) -> &[Squad] {
        &self.population
    }

    /// Direct access for callers that assign their own fitness
    pub fn population_mut(&mut self) -> &mut [Squad] {
        &mut self.population
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_initialized(&self) -> bool {
        !self.population.is_empty()
    }

    /// Replace any existing population with a fresh random one
    pub fn initialize_population(
        &mut self,
        population_size: usize,
        squad_size: usize,
    ) -> Result<InitializeReport> {
        check_range("population_size", population_size, POPULATION_SIZE_RANGE)?;
        check_range("squad_size", squad_size, SQUAD_SIZE_RANGE)?;

        let config = EvolutionConfig {
            population_size,
            squad_size,
            elite_size: self.base.elite_size.min(population_size - 1),
            ..self.base.clone()
        };
        let engine = EvolutionEngine::new(config)?;
        self.population = engine.create_initial_population(&mut self.rng);
        self.engine = Some(engine);
        self.generation = 0;

        tracing::info!(population_size, squad_size, "Initialized population");

        Ok(InitializeReport {
            population_size: self.population.len(),
            squad_size,
            generation: self.generation,
        })
    }

    /// Score the population with `RandomFitness` and breed the next one
    ///
    /// Best and average fitness describe the new population, so offspring
    /// that have not been scored yet count as zero.
    pub fn evolve_generation(&mut self) -> Result<EvolveReport> {
        let engine = match self.engine.as_mut() {
            Some(engine) if !self.population.is_empty() => engine,
            _ => return Err(MegadevError::NoPopulation),
        };

        RandomFitness.evaluate_all(&mut self.population, &mut self.rng);
        self.population = engine.evolve_population(&self.population, &mut self.rng)?;
        self.generation = engine.generation();

        let best_fitness = fittest(&self.population).map_or(0.0, |s| s.fitness_score);
        let average_fitness = self.population.iter().map(|s| s.fitness_score).sum::<f64>()
            / self.population.len() as f64;

        tracing::info!(
            generation = self.generation,
            best_fitness,
            average_fitness,
            "Evolved generation"
        );

        Ok(EvolveReport {
            generation: self.generation,
            best_fitness,
            average_fitness,
        })
    }

    /// Summary of every squad; empty before initialization
    pub fn population_snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            generation: self.generation,
            population_size: self.population.len(),
            squads: self
                .population
                .iter()
                .map(|squad| SquadSummary {
                    id: squad.id,
                    name: squad.name.clone(),
                    fitness: squad.fitness_score,
                    agents: squad.size(),
                })
                .collect(),
        }
    }

    pub fn best_squad(&self) -> Result<BestSquadSnapshot> {
        let squad = fittest(&self.population).ok_or(MegadevError::NoPopulation)?;
        Ok(BestSquadSnapshot {
            id: squad.id,
            name: squad.name.clone(),
            fitness: squad.fitness_score,
            generation: squad.generation,
            agents: squad
                .agents
                .iter()
                .map(|agent| AgentSummary {
                    id: agent.id,
                    name: agent.name.clone(),
                    fitness: agent.fitness_score,
                    config: agent.config,
                })
                .collect(),
        })
    }
}
