//! Parameter files for the synsim CLI.
//!
//! A parameter file is a flat table of scalars in TOML (default) or JSON
//! (`.json` extension):
//!
//! ```toml
//! sim_duration = 10.0
//! dt = 0.01
//! learning_rate = 0.5
//! decay_rate = 0.1
//! initial_weight = 0.5
//! region = "hippocampus"   # optional
//! seed = 42                # optional
//! output = "out/run.csv"   # optional
//! ```
//!
//! Keys are resolved one at a time so a missing or malformed value is
//! reported by name. Numbers may also be given as numeric strings. Keys
//! that are not recognised are ignored.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use synsim::prelude::*;

pub const SIM_DURATION: &str = "sim_duration";
pub const DT: &str = "dt";
pub const LEARNING_RATE: &str = "learning_rate";
pub const DECAY_RATE: &str = "decay_rate";
pub const INITIAL_WEIGHT: &str = "initial_weight";
pub const REGION: &str = "region";
pub const SEED: &str = "seed";
pub const OUTPUT: &str = "output";

/// Everything a parameter file can specify.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub params: SimulationParameters,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
}

impl RunConfig {
    /// Load and resolve a parameter file.
    pub fn load(path: &Path) -> Result<Self> {
        let table = read_table(path)?;
        Self::resolve(&table)
    }

    /// Parameters from the three-number command-line form. `dt` and the
    /// initial weight keep their defaults.
    pub fn from_rates(learning_rate: &str, decay_rate: &str, sim_duration: &str) -> Result<Self> {
        let number = |name: &str, text: &str| -> Result<f64> {
            text.trim().parse::<f64>().map_err(|_| {
                SynsimError::invalid_arguments(format!("{} must be a number, got '{}'", name, text))
            })
        };

        let params = SimulationParameters {
            learning_rate: number(LEARNING_RATE, learning_rate)?,
            decay_rate: number(DECAY_RATE, decay_rate)?,
            duration: number(SIM_DURATION, sim_duration)?,
            ..SimulationParameters::default()
        };
        validate(&params)?;

        Ok(Self {
            params,
            ..Self::default()
        })
    }

    fn resolve(table: &Table) -> Result<Self> {
        let params = SimulationParameters {
            duration: required_number(table, SIM_DURATION)?,
            dt: required_number(table, DT)?,
            learning_rate: required_number(table, LEARNING_RATE)?,
            decay_rate: required_number(table, DECAY_RATE)?,
            initial_weight: required_number(table, INITIAL_WEIGHT)?,
            region: optional_text(table, REGION)?.filter(|r| !r.trim().is_empty()),
        };
        validate(&params)?;

        Ok(Self {
            params,
            seed: optional_seed(table)?,
            output: optional_text(table, OUTPUT)?.map(PathBuf::from),
        })
    }
}

/// Range checks applied to every parameter set entering from outside.
pub fn validate(params: &SimulationParameters) -> Result<()> {
    positive(SIM_DURATION, params.duration)?;
    positive(DT, params.dt)?;
    non_negative(LEARNING_RATE, params.learning_rate)?;
    non_negative(DECAY_RATE, params.decay_rate)?;
    if !params.initial_weight.is_finite() {
        return Err(SynsimError::out_of_range(
            INITIAL_WEIGHT,
            params.initial_weight,
            "must be finite",
        ));
    }
    Ok(())
}

fn positive(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SynsimError::out_of_range(key, value, "must be finite and greater than zero"))
    }
}

fn non_negative(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SynsimError::out_of_range(key, value, "must be finite and not negative"))
    }
}

/// A single value from a parameter file.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Booleans, arrays, tables and nulls: never valid for a known key.
    Other(String),
}

impl Scalar {
    fn describe(&self) -> String {
        match self {
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) | Scalar::Other(s) => s.clone(),
        }
    }
}

type Table = BTreeMap<String, Scalar>;

enum Format {
    Toml,
    Json,
}

impl Format {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Toml,
        }
    }
}

fn read_table(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path).map_err(|_| SynsimError::config_not_found(path))?;
    let unparsable = |reason: String| {
        SynsimError::Config(ConfigError::Unparsable {
            path: path.to_path_buf(),
            reason,
        })
    };

    match Format::for_path(path) {
        Format::Toml => {
            let table: toml::Table = toml::from_str(&content).map_err(|e| unparsable(e.to_string()))?;
            Ok(table.into_iter().map(|(k, v)| (k, toml_scalar(v))).collect())
        }
        Format::Json => {
            let value: serde_json::Value =
                serde_json::from_str(&content).map_err(|e| unparsable(e.to_string()))?;
            match value {
                serde_json::Value::Object(map) => Ok(map.into_iter().map(|(k, v)| (k, json_scalar(v))).collect()),
                _ => Err(unparsable("expected a JSON object at the top level".to_string())),
            }
        }
    }
}

fn toml_scalar(value: toml::Value) -> Scalar {
    match value {
        toml::Value::Integer(i) => Scalar::Integer(i),
        toml::Value::Float(f) => Scalar::Float(f),
        toml::Value::String(s) => Scalar::Text(s),
        other => Scalar::Other(other.to_string()),
    }
}

fn json_scalar(value: serde_json::Value) -> Scalar {
    match value {
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Scalar::Integer(i),
            // Integers past i64 keep their exact digits
            (None, _) if n.is_u64() => Scalar::Text(n.to_string()),
            (None, Some(f)) => Scalar::Float(f),
            (None, None) => Scalar::Other(n.to_string()),
        },
        serde_json::Value::String(s) => Scalar::Text(s),
        other => Scalar::Other(other.to_string()),
    }
}

fn required_number(table: &Table, key: &str) -> Result<f64> {
    match table.get(key) {
        None => Err(SynsimError::missing_key(key)),
        Some(Scalar::Integer(i)) => Ok(*i as f64),
        Some(Scalar::Float(f)) => Ok(*f),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| SynsimError::malformed_value(key, s.as_str())),
        Some(other) => Err(SynsimError::malformed_value(key, other.describe())),
    }
}

fn optional_text(table: &Table, key: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(Scalar::Text(s)) => Ok(Some(s.clone())),
        Some(scalar @ (Scalar::Integer(_) | Scalar::Float(_))) => Ok(Some(scalar.describe())),
        Some(other) => Err(SynsimError::malformed_value(key, other.describe())),
    }
}

fn optional_seed(table: &Table) -> Result<Option<u64>> {
    match table.get(SEED) {
        None => Ok(None),
        Some(Scalar::Integer(i)) => u64::try_from(*i)
            .map(Some)
            .map_err(|_| SynsimError::malformed_value(SEED, i.to_string())),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| SynsimError::malformed_value(SEED, s.as_str())),
        Some(other) => Err(SynsimError::malformed_value(SEED, other.describe())),
    }
}

/// On-disk shape of the default parameter file.
#[derive(Serialize)]
struct DefaultFile {
    sim_duration: f64,
    dt: f64,
    learning_rate: f64,
    decay_rate: f64,
    initial_weight: f64,
}

/// The built-in defaults as a TOML document.
pub fn default_toml() -> Result<String> {
    let defaults = SimulationParameters::default();
    let file = DefaultFile {
        sim_duration: defaults.duration,
        dt: defaults.dt,
        learning_rate: defaults.learning_rate,
        decay_rate: defaults.decay_rate,
        initial_weight: defaults.initial_weight,
    };
    toml::to_string_pretty(&file).map_err(|e| SynsimError::Serialization(e.to_string()))
}

/// Write the built-in defaults to `path`, creating parent directories.
pub fn save_default(path: &Path) -> Result<()> {
    let content = default_toml()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynsimError::not_writable(path, e))?;
    }
    std::fs::write(path, content).map_err(|e| SynsimError::not_writable(path, e))
}
