//! Engine configuration with documented constants
//!
//! Every tunable number lives here. Configs are plain values handed to the
//! engines that use them; there is no process-wide config instance.

use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::error::{MegadevError, Result};

/// Configuration for the evolution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of squads in every generation
    ///
    /// Must be at least 2 so there is something to select between.
    pub population_size: usize,

    /// Number of top squads copied unchanged into the next generation
    ///
    /// Must be strictly smaller than `population_size`, otherwise no
    /// offspring would ever be produced.
    pub elite_size: usize,

    /// Agents per squad when creating the initial population
    pub squad_size: usize,

    /// Per-field probability that a trait is perturbed during mutation
    pub mutation_rate: f64,

    /// Standard deviation of the Gaussian perturbation
    ///
    /// Applied in raw units to every field, so integer traits only move
    /// when the sample is large enough to survive truncation.
    pub mutation_sigma: f64,

    /// Re-clamp `attention_span` and `memory_capacity` to their creation
    /// ceilings (10 and 100) after mutation
    ///
    /// With `false` only the lower bound of 1 is enforced and the integer
    /// traits may in principle drift past their creation domain.
    pub clamp_integer_ceiling: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            elite_size: 2,
            squad_size: 5,
            mutation_rate: 0.1,
            mutation_sigma: 0.1,
            clamp_integer_ceiling: true,
        }
    }
}

impl EvolutionConfig {
    pub fn new(population_size: usize, elite_size: usize) -> Self {
        Self {
            population_size,
            elite_size,
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MegadevError::PopulationTooSmall(self.population_size));
        }
        if self.elite_size >= self.population_size {
            return Err(MegadevError::EliteTooLarge {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        if self.squad_size == 0 {
            return Err(MegadevError::InvalidConfig(
                "squad_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(MegadevError::InvalidConfig(format!(
                "mutation_rate ({}) must be within [0, 1]",
                self.mutation_rate
            )));
        }
        if self.mutation_sigma.is_nan() || self.mutation_sigma < 0.0 {
            return Err(MegadevError::InvalidConfig(format!(
                "mutation_sigma ({}) must be non-negative",
                self.mutation_sigma
            )));
        }
        Ok(())
    }
}

/// Hourly rates for the needs decay model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedsConfig {
    /// Hunger gained per hour
    pub hunger_rate: f64,

    /// Thirst gained per hour (fastest-building need)
    pub thirst_rate: f64,

    /// Bathroom pressure gained per hour
    pub bathroom_rate: f64,

    /// Base stress gained per hour, before jitter
    pub stress_rate: f64,

    /// Lower bound of the uniform multiplier applied to stress growth
    pub stress_jitter_min: f64,

    /// Upper bound of the uniform multiplier applied to stress growth
    pub stress_jitter_max: f64,

    /// Energy lost per hour
    pub energy_rate: f64,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 10.0,
            thirst_rate: 15.0,
            bathroom_rate: 12.0,
            stress_rate: 5.0,
            stress_jitter_min: 0.8,
            stress_jitter_max: 1.2,
            energy_rate: 8.0,
        }
    }
}

impl NeedsConfig {
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("hunger_rate", self.hunger_rate),
            ("thirst_rate", self.thirst_rate),
            ("bathroom_rate", self.bathroom_rate),
            ("stress_rate", self.stress_rate),
            ("energy_rate", self.energy_rate),
        ];
        for (name, rate) in rates {
            if rate.is_nan() || rate < 0.0 {
                return Err(MegadevError::InvalidConfig(format!(
                    "{} ({}) must be non-negative",
                    name, rate
                )));
            }
        }
        if !self.stress_jitter_min.is_finite()
            || !self.stress_jitter_max.is_finite()
            || self.stress_jitter_min < 0.0
            || self.stress_jitter_min > self.stress_jitter_max
        {
            return Err(MegadevError::InvalidConfig(format!(
                "stress jitter range [{}, {}] is invalid",
                self.stress_jitter_min, self.stress_jitter_max
            )));
        }
        Ok(())
    }
}

/// Longest simulated advance a single tick may make, one year in minutes
pub const MAX_SCALED_TICK_MINUTES: f64 = 525_600.0;

/// Configuration for the simulation clock and engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated minutes per tick before scaling
    pub tick_interval_minutes: i64,

    /// Multiplier applied to the clock advance
    ///
    /// 1.0 means one tick interval per tick, 2.0 means twice as fast.
    pub time_scale: f64,

    /// Whether needs decay uses the scaled interval
    ///
    /// Off by default: the clock moves by `tick_interval * time_scale` but
    /// agents decay by the unscaled interval. The two are independent
    /// quantities and this switch couples them.
    pub decay_follows_time_scale: bool,

    /// Clock start; current UTC time when absent
    pub start_time: Option<NaiveDateTime>,

    /// Seed for the stress jitter RNG; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_minutes: 15,
            time_scale: 1.0,
            decay_follows_time_scale: false,
            start_time: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_minutes <= 0 {
            return Err(MegadevError::InvalidConfig(format!(
                "tick_interval_minutes ({}) must be positive",
                self.tick_interval_minutes
            )));
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(MegadevError::InvalidConfig(format!(
                "time_scale ({}) must be a non-negative finite number",
                self.time_scale
            )));
        }
        let scaled = self.tick_interval_minutes as f64 * self.time_scale.max(1.0);
        if scaled > MAX_SCALED_TICK_MINUTES {
            return Err(MegadevError::InvalidConfig(format!(
                "tick_interval_minutes ({}) times time_scale ({}) exceeds {} minutes",
                self.tick_interval_minutes, self.time_scale, MAX_SCALED_TICK_MINUTES
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Result<Duration> {
        Duration::try_minutes(self.tick_interval_minutes).ok_or_else(|| {
            MegadevError::InvalidConfig(format!(
                "tick_interval_minutes ({}) is out of range",
                self.tick_interval_minutes
            ))
        })
    }
}

/// Top-level configuration document
///
/// ```toml
/// [evolution]
/// population_size = 20
/// elite_size = 4
///
/// [simulation]
/// tick_interval_minutes = 30
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MegadevConfig {
    pub evolution: EvolutionConfig,
    pub needs: NeedsConfig,
    pub simulation: SimulationConfig,
}

impl MegadevConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        self.needs.validate()?;
        self.simulation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MegadevConfig::default().validate().is_ok());
    }

    #[test]
    fn test_elite_must_be_smaller_than_population() {
        let config = EvolutionConfig::new(4, 4);
        assert!(matches!(
            config.validate(),
            Err(MegadevError::EliteTooLarge { elite_size: 4, population_size: 4 })
        ));
    }

    #[test]
    fn test_population_of_one_rejected() {
        let config = EvolutionConfig::new(1, 0);
        assert!(matches!(
            config.validate(),
            Err(MegadevError::PopulationTooSmall(1))
        ));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MegadevConfig::from_toml_str(
            r#"
            [evolution]
            population_size = 20
            elite_size = 4

            [simulation]
            time_scale = 2.0
            start_time = "2024-01-01T09:00:00"
            "#,
        )
        .unwrap();

        assert_eq!(config.evolution.population_size, 20);
        assert_eq!(config.evolution.squad_size, 5);
        assert_eq!(config.simulation.time_scale, 2.0);
        assert_eq!(config.simulation.tick_interval_minutes, 15);
        assert!(config.simulation.start_time.is_some());
        assert_eq!(config.needs, NeedsConfig::default());
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let result = MegadevConfig::from_toml_str(
            r#"
            [simulation]
            tick_interval_minutes = 0
            "#,
        );
        assert!(matches!(result, Err(MegadevError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = MegadevConfig::from_toml_str("[evolution\npopulation_size = ");
        assert!(matches!(result, Err(MegadevError::Toml(_))));
    }

    #[test]
    fn test_nan_jitter_rejected() {
        for config in [
            NeedsConfig {
                stress_jitter_min: f64::NAN,
                ..NeedsConfig::default()
            },
            NeedsConfig {
                stress_jitter_max: f64::NAN,
                ..NeedsConfig::default()
            },
            NeedsConfig {
                stress_jitter_max: f64::INFINITY,
                ..NeedsConfig::default()
            },
        ] {
            assert!(matches!(config.validate(), Err(MegadevError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_oversized_tick_rejected() {
        let huge_interval = SimulationConfig {
            tick_interval_minutes: 1_000_000_000_000_000,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            huge_interval.validate(),
            Err(MegadevError::InvalidConfig(_))
        ));

        let huge_scale = SimulationConfig {
            time_scale: 1e12,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            huge_scale.validate(),
            Err(MegadevError::InvalidConfig(_))
        ));

        let one_year = SimulationConfig {
            tick_interval_minutes: 60,
            time_scale: 8_760.0,
            ..SimulationConfig::default()
        };
        assert!(one_year.validate().is_ok());
        assert_eq!(one_year.tick_interval().unwrap(), Duration::hours(1));
    }
}
