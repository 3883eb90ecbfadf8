use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use tablemind_ai::DEFAULT_ENDPOINT;
use tablemind_engine::rules::TableRules;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub deck_count: u32,
    pub shuffle: bool,
    pub min_bet: u64,
    pub hit_soft_17: bool,
    pub max_rounds: u32,
    pub starting_balance: u64,
    pub seed: Option<u64>,
    pub decision_timeout_secs: Option<u64>,
    pub endpoint: String,
    pub log_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub deck_count: ValueSource,
    pub shuffle: ValueSource,
    pub min_bet: ValueSource,
    pub hit_soft_17: ValueSource,
    pub max_rounds: ValueSource,
    pub starting_balance: ValueSource,
    pub seed: ValueSource,
    pub decision_timeout_secs: ValueSource,
    pub endpoint: ValueSource,
    pub log_dir: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            deck_count: ValueSource::Default,
            shuffle: ValueSource::Default,
            min_bet: ValueSource::Default,
            hit_soft_17: ValueSource::Default,
            max_rounds: ValueSource::Default,
            starting_balance: ValueSource::Default,
            seed: ValueSource::Default,
            decision_timeout_secs: ValueSource::Default,
            endpoint: ValueSource::Default,
            log_dir: ValueSource::Default,
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
        let rules = TableRules::default();
        Self {
            deck_count: rules.deck_count,
            shuffle: rules.shuffle,
            min_bet: rules.min_bet,
            hit_soft_17: rules.hit_soft_17,
            max_rounds: rules.max_rounds,
            starting_balance: rules.starting_balance,
            seed: None,
            decision_timeout_secs: None,
            endpoint: DEFAULT_ENDPOINT.into(),
            log_dir: "Results".into(),
        }
    }
}

impl Config {
    pub fn table_rules(&self) -> TableRules {
        TableRules {
            deck_count: self.deck_count,
            shuffle: self.shuffle,
            min_bet: self.min_bet,
            hit_soft_17: self.hit_soft_17,
            max_rounds: self.max_rounds,
            starting_balance: self.starting_balance,
            decision_timeout: self.decision_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub deck_count: Option<u32>,
    pub min_bet: Option<u64>,
    pub hit_soft_17: Option<bool>,
    pub max_rounds: Option<u32>,
    pub starting_balance: Option<u64>,
    pub seed: Option<u64>,
    pub decision_timeout_secs: Option<u64>,
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub const CONFIG_ENV: &str = "TABLEMIND_CONFIG";
pub const API_KEY_ENV: &str = "TABLEMIND_API_KEY";
const LEGACY_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// API key for model-backed seats. Never part of [`Config`], so it is never printed.
pub fn api_key() -> Option<String> {
    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_overrides(&CliOverrides::default())
}

pub fn load_with_overrides(cli: &CliOverrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    apply_env(&mut cfg, &mut sources)?;
    apply_cli(&mut cfg, &mut sources, cli);

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    deck_count: Option<u32>,
    #[serde(default)]
    shuffle: Option<bool>,
    #[serde(default)]
    min_bet: Option<u64>,
    #[serde(default)]
    hit_soft_17: Option<bool>,
    #[serde(default)]
    max_rounds: Option<u32>,
    #[serde(default)]
    starting_balance: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    decision_timeout_secs: Option<u64>,
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    log_dir: Option<String>,
}

macro_rules! layer {
    ($cfg:ident . $field:ident, $sources:ident, $value:expr, $src:expr) => {
        if let Some(v) = $value {
            $cfg.$field = v;
            $sources.$field = $src;
        }
    };
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    let src = ValueSource::File;
    layer!(cfg.deck_count, sources, f.deck_count, src);
    layer!(cfg.shuffle, sources, f.shuffle, src);
    layer!(cfg.min_bet, sources, f.min_bet, src);
    layer!(cfg.hit_soft_17, sources, f.hit_soft_17, src);
    layer!(cfg.max_rounds, sources, f.max_rounds, src);
    layer!(cfg.starting_balance, sources, f.starting_balance, src);
    layer!(cfg.seed, sources, f.seed.map(Some), src);
    layer!(
        cfg.decision_timeout_secs,
        sources,
        f.decision_timeout_secs.map(Some),
        src
    );
    layer!(cfg.endpoint, sources, f.endpoint, src);
    layer!(cfg.log_dir, sources, f.log_dir, src);
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_number<T: std::str::FromStr>(key: &str, what: &str) -> Result<Option<T>, ConfigError> {
    match env_value(key) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, v))),
    }
}

fn apply_env(cfg: &mut Config, sources: &mut ConfigSources) -> Result<(), ConfigError> {
    let src = ValueSource::Env;
    let seed: Option<u64> = env_number("TABLEMIND_SEED", "seed")?;
    layer!(cfg.seed, sources, seed.map(Some), src);
    let min_bet: Option<u64> = env_number("TABLEMIND_MIN_BET", "min bet")?;
    layer!(cfg.min_bet, sources, min_bet, src);
    let decks: Option<u32> = env_number("TABLEMIND_DECKS", "deck count")?;
    layer!(cfg.deck_count, sources, decks, src);
    let rounds: Option<u32> = env_number("TABLEMIND_MAX_ROUNDS", "max rounds")?;
    layer!(cfg.max_rounds, sources, rounds, src);

    if let Some(v) = env_value("TABLEMIND_HIT_SOFT_17") {
        let b = parse_bool(&v)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid hit_soft_17: {}", v)))?;
        layer!(cfg.hit_soft_17, sources, Some(b), src);
    }
    layer!(cfg.endpoint, sources, env_value("TABLEMIND_ENDPOINT"), src);
    Ok(())
}

fn apply_cli(cfg: &mut Config, sources: &mut ConfigSources, cli: &CliOverrides) {
    let src = ValueSource::Cli;
    layer!(cfg.deck_count, sources, cli.deck_count, src);
    layer!(cfg.min_bet, sources, cli.min_bet, src);
    layer!(cfg.hit_soft_17, sources, cli.hit_soft_17, src);
    layer!(cfg.max_rounds, sources, cli.max_rounds, src);
    layer!(cfg.starting_balance, sources, cli.starting_balance, src);
    layer!(cfg.seed, sources, cli.seed.map(Some), src);
    layer!(
        cfg.decision_timeout_secs,
        sources,
        cli.decision_timeout_secs.map(Some),
        src
    );
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_rules()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if cfg.decision_timeout_secs == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: decision_timeout_secs must be >0".into(),
        ));
    }
    if cfg.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: endpoint must not be empty".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
