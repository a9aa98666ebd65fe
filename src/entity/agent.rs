//! Agents and squads

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, SquadId};
use crate::entity::background::Background;
use crate::entity::config::AgentConfig;
use crate::entity::needs::HumanNeeds;

/// An agent with evolvable parameters
///
/// `supervisor_id` and `subordinate_ids` are lookup keys into an agent
/// directory, kept for lineage only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub config: AgentConfig,
    pub needs: HumanNeeds,
    pub background: Background,
    pub fitness_score: f64,
    pub generation: u32,
    pub created_at: DateTime<Utc>,
    pub specialization: Option<String>,
    pub supervisor_id: Option<AgentId>,
    pub subordinate_ids: Vec<AgentId>,
}

impl Agent {
    /// Fresh agent with default needs and an empty background
    pub fn new(name: impl Into<String>, config: AgentConfig) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            config,
            needs: HumanNeeds::default(),
            background: Background::default(),
            fitness_score: 0.0,
            generation: 0,
            created_at: Utc::now(),
            specialization: None,
            supervisor_id: None,
            subordinate_ids: Vec::new(),
        }
    }

    /// Create an agent with randomized parameters and background
    pub fn create_random<R: Rng + ?Sized>(name: impl Into<String>, rng: &mut R) -> Self {
        let config = AgentConfig::random(rng);
        let background = Background::random(rng);
        Self {
            background,
            ..Self::new(name, config)
        }
    }

    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }
}

/// A group of agents evaluated and evolved as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub id: SquadId,
    pub name: String,
    pub agents: Vec<Agent>,
    pub fitness_score: f64,
    pub generation: u32,
    pub created_at: DateTime<Utc>,
}

impl Squad {
    pub fn new(name: impl Into<String>, agents: Vec<Agent>) -> Self {
        Self {
            id: SquadId::new(),
            name: name.into(),
            agents,
            fitness_score: 0.0,
            generation: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a squad of `size` random agents named `<squad>-Agent-<i>`
    pub fn create_random<R: Rng + ?Sized>(
        name: impl Into<String>,
        size: usize,
        rng: &mut R,
    ) -> Self {
        let name = name.into();
        let agents = (0..size)
            .map(|i| Agent::create_random(format!("{}-Agent-{}", name, i), rng))
            .collect();
        Self::new(name, agents)
    }

    pub fn size(&self) -> usize {
        self.agents.len()
    }

    pub fn average_agent_fitness(&self) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(|a| a.fitness_score).sum::<f64>() / self.agents.len() as f64
    }
}
