use thiserror::Error;

#[derive(Error, Debug)]
pub enum MegadevError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("elite_size ({elite_size}) must be smaller than population_size ({population_size})")]
    EliteTooLarge {
        elite_size: usize,
        population_size: usize,
    },

    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("Cannot evolve an empty population")]
    EmptyPopulation,

    #[error("Squad {squad} has {found} agents, expected {expected}")]
    SquadSizeMismatch {
        squad: String,
        expected: usize,
        found: usize,
    },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("no population initialized")]
    NoPopulation,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MegadevError>;
