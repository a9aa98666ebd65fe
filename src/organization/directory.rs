//! Flattened agent index over an organization forest
//!
//! Walking Department -> Division -> Squad -> Agent every tick is wasted
//! work for large organizations. The directory records each agent's
//! position once, in depth-first order, and is rebuilt only when the
//! hierarchy changes.

use ahash::AHashMap;

use crate::core::types::AgentId;
use crate::entity::Agent;
use crate::organization::unit::Department;

/// Position of one agent inside a slice of departments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentSlot {
    pub department: usize,
    pub division: usize,
    pub squad: usize,
    pub agent: usize,
}

impl AgentSlot {
    pub fn resolve<'a>(&self, departments: &'a [Department]) -> Option<&'a Agent> {
        departments
            .get(self.department)?
            .divisions
            .get(self.division)?
            .squads
            .get(self.squad)?
            .agents
            .get(self.agent)
    }

    pub fn resolve_mut<'a>(&self, departments: &'a mut [Department]) -> Option<&'a mut Agent> {
        departments
            .get_mut(self.department)?
            .divisions
            .get_mut(self.division)?
            .squads
            .get_mut(self.squad)?
            .agents
            .get_mut(self.agent)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentDirectory {
    slots: Vec<AgentSlot>,
    by_id: AHashMap<AgentId, usize>,
}

impl AgentDirectory {
    pub fn build(departments: &[Department]) -> Self {
        let capacity: usize = departments.iter().map(Department::size).sum();
        let mut slots = Vec::with_capacity(capacity);
        let mut by_id = AHashMap::with_capacity(capacity);

        for (d, department) in departments.iter().enumerate() {
            for (v, division) in department.divisions.iter().enumerate() {
                for (s, squad) in division.squads.iter().enumerate() {
                    for (a, agent) in squad.agents.iter().enumerate() {
                        by_id.insert(agent.id, slots.len());
                        slots.push(AgentSlot {
                            department: d,
                            division: v,
                            squad: s,
                            agent: a,
                        });
                    }
                }
            }
        }

        Self { slots, by_id }
    }

    /// Slots in depth-first order
    pub fn slots(&self) -> &[AgentSlot] {
        &self.slots
    }

    pub fn get(&self, id: AgentId) -> Option<AgentSlot> {
        self.by_id.get(&id).map(|&i| self.slots[i])
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolve an agent's supervisor through the directory
    pub fn supervisor_of<'a>(
        &self,
        departments: &'a [Department],
        agent: &Agent,
    ) -> Option<&'a Agent> {
        self.get(agent.supervisor_id?)?.resolve(departments)
    }
}
