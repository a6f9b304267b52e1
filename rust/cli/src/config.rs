//! Layered configuration: defaults, then a TOML file named by `HOLDEM_CONFIG`,
//! then `HOLDEM_*` environment variables. Each value remembers which layer
//! supplied it.

use serde::{Deserialize, Serialize};
use std::fs;

use holdem_engine::engine::{MAX_SEATS, MIN_SEATS};
use holdem_engine::player::STARTING_STACK;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub seats: usize,
    /// Regret-matching iterations per advice request
    pub iterations: u32,
    pub starting_stack: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub seats: ValueSource,
    pub iterations: ValueSource,
    pub starting_stack: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            seats: ValueSource::Default,
            iterations: ValueSource::Default,
            starting_stack: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            seats: MAX_SEATS,
            iterations: 1_000,
            starting_stack: STARTING_STACK,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HOLDEM_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(seats) = std::env::var("HOLDEM_SEATS")
        && !seats.is_empty()
    {
        cfg.seats = seats
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid seats".into()))?;
        sources.seats = ValueSource::Env;
    }
    if let Ok(iters) = std::env::var("HOLDEM_ITERATIONS")
        && !iters.is_empty()
    {
        cfg.iterations = iters
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid iterations".into()))?;
        sources.iterations = ValueSource::Env;
    }
    if let Ok(stack) = std::env::var("HOLDEM_STARTING_STACK")
        && !stack.is_empty()
    {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting_stack".into()))?;
        sources.starting_stack = ValueSource::Env;
    }

    validate(&cfg)?;
    tracing::debug!(?cfg, "configuration resolved");
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    iterations: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&cfg.seats) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: seats must be {}..={}",
            MIN_SEATS, MAX_SEATS
        )));
    }
    if cfg.iterations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: iterations must be >=1".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cfg = Config {
            seats: 5,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
        let cfg = Config {
            iterations: 0,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
        let cfg = Config {
            starting_stack: 0,
            ..Config::default()
        };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        assert!(toml::from_str::<FileConfig>("level = 3").is_err());
        let f: FileConfig = toml::from_str("seats = 3\nseed = 9").unwrap();
        assert_eq!(f.seats, Some(3));
        assert_eq!(f.seed, Some(9));
        assert_eq!(f.iterations, None);
    }
}
