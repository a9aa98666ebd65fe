use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, DepartmentId, DivisionId};
use crate::entity::Squad;

/// An ordered group of squads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
    pub squads: Vec<Squad>,
    pub leader: Option<AgentId>,
    pub created_at: DateTime<Utc>,
}

impl Division {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DivisionId::new(),
            name: name.into(),
            squads: Vec::new(),
            leader: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_squads(mut self, squads: Vec<Squad>) -> Self {
        self.squads = squads;
        self
    }

    /// Total agents across all squads
    pub fn size(&self) -> usize {
        self.squads.iter().map(Squad::size).sum()
    }
}

/// An ordered group of divisions; the root of one organization tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub divisions: Vec<Division>,
    pub leader: Option<AgentId>,
    pub created_at: DateTime<Utc>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DepartmentId::new(),
            name: name.into(),
            divisions: Vec::new(),
            leader: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_divisions(mut self, divisions: Vec<Division>) -> Self {
        self.divisions = divisions;
        self
    }

    pub fn size(&self) -> usize {
        self.divisions.iter().map(Division::size).sum()
    }

    pub fn squad_count(&self) -> usize {
        self.divisions.iter().map(|d| d.squads.len()).sum()
    }
}
