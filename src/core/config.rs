//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mathdash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Constraint validation happens at the end of [`resolve`], before the
//! caller touches the terminal.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::equation::Operator;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub ranges: RangesSection,
    #[serde(default)]
    pub game: GameSection,
}

/// Operand bounds. Field names match the CLI flags: `a*` for addition,
/// `m*` for multiplication.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RangesSection {
    pub a1_min: Option<u32>,
    pub a1_max: Option<u32>,
    pub a2_min: Option<u32>,
    pub a2_max: Option<u32>,
    pub m1_min: Option<u32>,
    pub m1_max: Option<u32>,
    pub m2_min: Option<u32>,
    pub m2_max: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GameSection {
    pub operators: Option<String>,
    pub time: Option<u64>,
}

/// CLI-provided overrides, already parsed by clap in `main`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub a1_min: Option<u32>,
    pub a1_max: Option<u32>,
    pub a2_min: Option<u32>,
    pub a2_max: Option<u32>,
    pub m1_min: Option<u32>,
    pub m1_max: Option<u32>,
    pub m2_min: Option<u32>,
    pub m2_max: Option<u32>,
    pub operators: Option<String>,
    pub time: Option<u64>,
    pub debug: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ADD_MIN: u32 = 2;
pub const DEFAULT_ADD_MAX: u32 = 100;
pub const DEFAULT_MUL1_MIN: u32 = 2;
pub const DEFAULT_MUL1_MAX: u32 = 12;
pub const DEFAULT_MUL2_MIN: u32 = 2;
pub const DEFAULT_MUL2_MAX: u32 = 100;
pub const DEFAULT_OPERATORS: &str = "+-*/";
pub const DEFAULT_TIME_SECS: u64 = 120;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Inclusive operand bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandRange {
    pub min: u32,
    pub max: u32,
}

impl OperandRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Immutable, validated game settings. Owned by `main`, read-only to the
/// core once the session starts.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub add1: OperandRange,
    pub add2: OperandRange,
    pub mul1: OperandRange,
    pub mul2: OperandRange,
    pub operators: Vec<Operator>,
    pub duration_secs: u64,
    pub debug: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    NonPositive { name: &'static str },
    InvertedRange { name: &'static str },
    EmptyOperators,
    TooManyOperators(usize),
    InvalidOperator(char),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::NonPositive { name } => {
                write!(f, "{name} must be greater than 0")
            }
            ConfigError::InvertedRange { name } => {
                write!(f, "invalid operand range ({name}): min exceeds max")
            }
            ConfigError::EmptyOperators => {
                write!(f, "invalid number of operations: expected 1-4 of \"+-*/\"")
            }
            ConfigError::TooManyOperators(n) => {
                write!(f, "invalid number of operations: got {n}, expected at most 4")
            }
            ConfigError::InvalidOperator(c) => {
                write!(f, "invalid operation detected: {c:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mathdash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mathdash").join("config.toml"))
}

/// Load config from `~/.mathdash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FileConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_file_config() -> Result<FileConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FileConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FileConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# mathdash Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [ranges]
# a1_min = 2      # first addend minimum
# a1_max = 100    # first addend maximum
# a2_min = 2      # second addend minimum
# a2_max = 100    # second addend maximum
# m1_min = 2      # first factor minimum
# m1_max = 12     # first factor maximum
# m2_min = 2      # second factor minimum
# m2_max = 100    # second factor maximum

# [game]
# operators = "+-*/"   # 1-4 characters from "+-*/"
# time = 120           # game duration in seconds
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI, then validate every constraint. Runs before any terminal
/// mode change; a `ConfigError` here aborts startup.
pub fn resolve(file: &FileConfig, cli: &Overrides) -> Result<GameConfig, ConfigError> {
    let r = &file.ranges;
    let add1 = OperandRange::new(
        cli.a1_min.or(r.a1_min).unwrap_or(DEFAULT_ADD_MIN),
        cli.a1_max.or(r.a1_max).unwrap_or(DEFAULT_ADD_MAX),
    );
    let add2 = OperandRange::new(
        cli.a2_min.or(r.a2_min).unwrap_or(DEFAULT_ADD_MIN),
        cli.a2_max.or(r.a2_max).unwrap_or(DEFAULT_ADD_MAX),
    );
    let mul1 = OperandRange::new(
        cli.m1_min.or(r.m1_min).unwrap_or(DEFAULT_MUL1_MIN),
        cli.m1_max.or(r.m1_max).unwrap_or(DEFAULT_MUL1_MAX),
    );
    let mul2 = OperandRange::new(
        cli.m2_min.or(r.m2_min).unwrap_or(DEFAULT_MUL2_MIN),
        cli.m2_max.or(r.m2_max).unwrap_or(DEFAULT_MUL2_MAX),
    );

    // Operators: CLI → env → config → default
    let operator_spec = cli
        .operators
        .clone()
        .or_else(|| std::env::var("MATHDASH_OPERATORS").ok())
        .or_else(|| file.game.operators.clone())
        .unwrap_or_else(|| DEFAULT_OPERATORS.to_string());

    // Duration: CLI → env → config → default
    let duration_secs = cli
        .time
        .or_else(|| match std::env::var("MATHDASH_TIME").ok() {
            Some(raw) => match raw.parse() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!("Ignoring unparsable MATHDASH_TIME={:?}", raw);
                    None
                }
            },
            None => None,
        })
        .or(file.game.time)
        .unwrap_or(DEFAULT_TIME_SECS);

    let config = GameConfig {
        add1,
        add2,
        mul1,
        mul2,
        operators: parse_operators(&operator_spec)?,
        duration_secs,
        debug: cli.debug,
    };
    validate(&config)?;
    debug!("Resolved config: {:?}", config);
    Ok(config)
}

/// Parse an operator spec like `"+-*/"`. Order and duplicates are kept;
/// a repeated character weights the random operator choice.
fn parse_operators(spec: &str) -> Result<Vec<Operator>, ConfigError> {
    if spec.is_empty() {
        return Err(ConfigError::EmptyOperators);
    }
    let count = spec.chars().count();
    if count > 4 {
        return Err(ConfigError::TooManyOperators(count));
    }
    spec.chars()
        .map(|c| Operator::from_symbol(c).ok_or(ConfigError::InvalidOperator(c)))
        .collect()
}

fn validate(config: &GameConfig) -> Result<(), ConfigError> {
    let ranges = [
        ("a1", config.add1),
        ("a2", config.add2),
        ("m1", config.mul1),
        ("m2", config.mul2),
    ];
    for (name, range) in ranges {
        if range.min == 0 || range.max == 0 {
            return Err(ConfigError::NonPositive { name });
        }
        if range.min > range.max {
            return Err(ConfigError::InvertedRange { name });
        }
    }
    if config.duration_secs == 0 {
        return Err(ConfigError::NonPositive { name: "time" });
    }
    Ok(())
}
