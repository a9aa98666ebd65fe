//! Time-stepped simulation over an organization forest
//!
//! One tick advances the clock once and applies needs decay to every agent
//! reachable from the department roots, each exactly once. The engine does
//! no internal locking: `&mut self` on every mutating call is the only
//! exclusion, so callers sharing an engine across threads must wrap it in
//! their own mutex.

use chrono::{Duration, NaiveDateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{NeedsConfig, SimulationConfig};
use crate::core::error::Result;
use crate::core::types::AgentId;
use crate::entity::Agent;
use crate::organization::{AgentDirectory, Department};
use crate::simulation::clock::SimulationClock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Advanced {
        time: NaiveDateTime,
        agents_updated: usize,
    },
    /// Engine was paused; nothing changed
    Paused,
}

pub struct SimulationEngine {
    clock: SimulationClock,
    departments: Vec<Department>,
    paused: bool,
    directory: AgentDirectory,
    directory_stale: bool,
    needs: NeedsConfig,
    decay_follows_time_scale: bool,
    rng: ChaCha8Rng,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig, needs: NeedsConfig) -> Result<Self> {
        config.validate()?;
        needs.validate()?;
        let interval = config.tick_interval()?;
        Ok(Self::build(config, needs, interval))
    }

    fn build(config: SimulationConfig, needs: NeedsConfig, interval: Duration) -> Self {
        let start = config.start_time.unwrap_or_else(|| Utc::now().naive_utc());
        let clock =
            SimulationClock::with_interval(start, interval).with_time_scale(config.time_scale);
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            clock,
            departments: Vec::new(),
            paused: false,
            directory: AgentDirectory::default(),
            directory_stale: false,
            needs,
            decay_follows_time_scale: config.decay_follows_time_scale,
            rng,
        }
    }

    pub fn add_department(&mut self, department: Department) {
        self.departments.push(department);
        self.directory_stale = true;
        self.refresh_directory();
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Mutable access to the hierarchy; the agent index is rebuilt on the
    /// next tick
    pub fn departments_mut(&mut self) -> &mut Vec<Department> {
        self.directory_stale = true;
        &mut self.departments
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Hours of needs decay applied per tick
    ///
    /// The unscaled tick interval unless `decay_follows_time_scale` is set,
    /// in which case it tracks the clock's `time_scale`.
    pub fn elapsed_hours(&self) -> f64 {
        let hours = self.clock.tick_interval_hours();
        if self.decay_follows_time_scale {
            hours * self.clock.time_scale
        } else {
            hours
        }
    }

    fn refresh_directory(&mut self) {
        if !self.directory_stale {
            return;
        }
        self.directory = AgentDirectory::build(&self.departments);
        self.directory_stale = false;
        if self.directory.is_empty() {
            tracing::warn!("Simulation has no agents to update");
        } else {
            tracing::debug!(agents = self.directory.len(), "Rebuilt agent directory");
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.paused {
            tracing::trace!("Tick skipped while paused");
            return TickOutcome::Paused;
        }

        let time = self.clock.tick();
        let hours = self.elapsed_hours();
        self.refresh_directory();

        let mut agents_updated = 0;
        for slot in self.directory.slots() {
            if let Some(agent) = slot.resolve_mut(&mut self.departments) {
                agent.needs.update(hours, &self.needs, &mut self.rng);
                agents_updated += 1;
            }
        }

        tracing::debug!(%time, agents_updated, hours, "Simulation tick");
        TickOutcome::Advanced {
            time,
            agents_updated,
        }
    }

    /// Run `ticks` ticks; returns how many actually advanced
    pub fn run(&mut self, ticks: u64) -> u64 {
        (0..ticks)
            .filter(|_| matches!(self.tick(), TickOutcome::Advanced { .. }))
            .count() as u64
    }

    /// Look up an agent by id
    ///
    /// Uses the directory when it is current; after `departments_mut` and
    /// before the next tick it falls back to walking the hierarchy.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        if self.directory_stale {
            return self
                .departments
                .iter()
                .flat_map(|d| &d.divisions)
                .flat_map(|v| &v.squads)
                .flat_map(|s| &s.agents)
                .find(|a| a.id == id);
        }
        self.directory.get(id)?.resolve(&self.departments)
    }

    pub fn agent_count(&self) -> usize {
        self.departments.iter().map(Department::size).sum()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::build(
            SimulationConfig::default(),
            NeedsConfig::default(),
            Duration::minutes(SimulationClock::DEFAULT_TICK_MINUTES),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MegadevError;
    use crate::entity::{HumanNeeds, Squad};
    use crate::organization::Division;
    use chrono::NaiveDate;

    fn nine_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn seeded(config: SimulationConfig) -> SimulationEngine {
        let config = SimulationConfig {
            start_time: Some(nine_am()),
            seed: Some(17),
            ..config
        };
        SimulationEngine::new(config, NeedsConfig::default()).unwrap()
    }

    fn department(squads: usize, size: usize) -> Department {
        let mut rng = ChaCha8Rng::seed_from_u64(61);
        let squads = (0..squads)
            .map(|i| Squad::create_random(format!("S{}", i), size, &mut rng))
            .collect();
        Department::new("Dept").with_divisions(vec![Division::new("Div").with_squads(squads)])
    }

    fn all_needs(engine: &SimulationEngine) -> Vec<HumanNeeds> {
        engine
            .departments()
            .iter()
            .flat_map(|d| &d.divisions)
            .flat_map(|v| &v.squads)
            .flat_map(|s| &s.agents)
            .map(|a| a.needs)
            .collect()
    }

    #[test]
    fn test_tick_updates_every_agent_once() {
        let mut engine = seeded(SimulationConfig::default());
        engine.add_department(department(2, 3));
        engine.add_department(department(1, 4));

        let outcome = engine.tick();
        assert_eq!(
            outcome,
            TickOutcome::Advanced {
                time: nine_am() + Duration::minutes(15),
                agents_updated: 10,
            }
        );
        for needs in all_needs(&engine) {
            assert!((needs.hunger - 2.5).abs() < 1e-9);
            assert!((needs.thirst - 3.75).abs() < 1e-9);
            assert!((needs.energy - 98.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pause_is_a_true_noop() {
        let mut engine = seeded(SimulationConfig::default());
        engine.add_department(department(2, 2));
        engine.tick();

        engine.pause();
        engine.pause();
        let time_before = engine.clock().current_time;
        let needs_before = all_needs(&engine);

        assert_eq!(engine.tick(), TickOutcome::Paused);
        assert_eq!(engine.clock().current_time, time_before);
        assert_eq!(engine.clock().ticks_elapsed(), 1);
        assert_eq!(all_needs(&engine), needs_before);

        engine.resume();
        assert!(!engine.is_paused());
        engine.tick();
        assert!(all_needs(&engine)[0].hunger > needs_before[0].hunger);
    }

    #[test]
    fn test_decay_ignores_time_scale_by_default() {
        let mut engine = seeded(SimulationConfig::default());
        engine.add_department(department(1, 1));
        engine.clock_mut().time_scale = 2.0;

        engine.tick();
        assert_eq!(engine.clock().current_time, nine_am() + Duration::minutes(30));
        assert_eq!(engine.elapsed_hours(), 0.25);
        assert!((all_needs(&engine)[0].hunger - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_decay_can_follow_time_scale() {
        let mut engine = seeded(SimulationConfig {
            decay_follows_time_scale: true,
            time_scale: 2.0,
            ..SimulationConfig::default()
        });
        engine.add_department(department(1, 1));

        engine.tick();
        assert_eq!(engine.elapsed_hours(), 0.5);
        assert!((all_needs(&engine)[0].hunger - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hierarchy_changes_are_picked_up() {
        let mut engine = seeded(SimulationConfig::default());
        engine.add_department(department(1, 2));
        engine.tick();

        let mut rng = ChaCha8Rng::seed_from_u64(62);
        let newcomer = Squad::create_random("Late", 3, &mut rng);
        let newcomer_id = newcomer.agents[0].id;
        engine.departments_mut()[0].divisions[0].squads.push(newcomer);

        assert_eq!(
            engine.tick(),
            TickOutcome::Advanced {
                time: nine_am() + Duration::minutes(30),
                agents_updated: 5,
            }
        );
        assert_eq!(engine.agent_count(), 5);
        let agent = engine.agent(newcomer_id).unwrap();
        assert!((agent.needs.hunger - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_engine_still_advances_clock() {
        let mut engine = seeded(SimulationConfig::default());
        assert_eq!(engine.run(4), 4);
        assert_eq!(engine.clock().current_time, nine_am() + Duration::hours(1));
    }

    #[test]
    fn test_run_counts_only_advanced_ticks() {
        let mut engine = seeded(SimulationConfig::default());
        engine.pause();
        assert_eq!(engine.run(3), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            tick_interval_minutes: -5,
            ..SimulationConfig::default()
        };
        assert!(SimulationEngine::new(config, NeedsConfig::default()).is_err());
    }

    #[test]
    fn test_agent_lookup_is_read_only() {
        let mut engine = seeded(SimulationConfig::default());
        engine.add_department(department(1, 2));
        let known = engine.departments()[0].divisions[0].squads[0].agents[1].id;

        let shared = &engine;
        assert_eq!(shared.agent(known).map(|a| a.id), Some(known));

        let mut rng = ChaCha8Rng::seed_from_u64(63);
        let newcomer = Squad::create_random("Late", 1, &mut rng);
        let newcomer_id = newcomer.agents[0].id;
        engine.departments_mut()[0].divisions[0].squads.push(newcomer);

        // Found before any tick rebuilds the directory
        let shared = &engine;
        assert_eq!(shared.agent(newcomer_id).map(|a| a.id), Some(newcomer_id));
        assert!(shared.agent(AgentId::new()).is_none());
    }

    #[test]
    fn test_huge_time_scale_does_not_panic() {
        let mut engine = seeded(SimulationConfig::default());
        engine.add_department(department(1, 1));
        engine.clock_mut().time_scale = 1e12;

        assert!(matches!(engine.tick(), TickOutcome::Advanced { .. }));
        assert_eq!(engine.clock().current_time, NaiveDateTime::MAX);
        assert!(matches!(engine.tick(), TickOutcome::Advanced { .. }));
    }

    #[test]
    fn test_oversized_interval_rejected_at_construction() {
        let config = SimulationConfig {
            tick_interval_minutes: 1_000_000_000_000_000,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            SimulationEngine::new(config, NeedsConfig::default()),
            Err(MegadevError::InvalidConfig(_))
        ));
    }
}
