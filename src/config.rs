//! Configuration for crisisguard.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CRISISGUARD_HOME, CRISISGUARD_INCIDENT_LOG)
//! 2. Config file (.crisisguard/config.yaml)
//! 3. Defaults (~/.crisisguard)
//!
//! Config file discovery:
//! - Searches current directory and parents for .crisisguard/config.yaml
//! - Paths in config file are relative to the .crisisguard/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::AssessorSettings;
use crate::domain::RiskLevel;

pub const ENV_HOME: &str = "CRISISGUARD_HOME";
pub const ENV_INCIDENT_LOG: &str = "CRISISGUARD_INCIDENT_LOG";

const CONFIG_DIR: &str = ".crisisguard";
const DEFAULT_INCIDENT_LOG: &str = "incidents.jsonl";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub assessment: AssessorSettings,
    #[serde(default)]
    pub incidents: Option<IncidentsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .crisisguard/)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncidentsConfig {
    pub min_level: Option<RiskLevel>,
    pub log_path: Option<String>,
}

/// Incident persistence settings
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentSettings {
    /// Lowest level persisted as an incident
    pub min_level: RiskLevel,
    pub log_path: PathBuf,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Assessor tunables
    pub assessment: AssessorSettings,
    pub incidents: IncidentSettings,
}

/// Environment overrides, captured once so resolution stays testable
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<String>,
    incident_log: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var(ENV_HOME).ok(),
            incident_log: std::env::var(ENV_INCIDENT_LOG).ok(),
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine file, environment and defaults into a resolved config
fn resolve(
    config_file: Option<PathBuf>,
    env: EnvOverrides,
    default_home: PathBuf,
) -> Result<ResolvedConfig> {
    let parsed = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    // Relative paths in the file resolve against .crisisguard/
    let config_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));

    let home = if let Some(env_home) = env.home {
        PathBuf::from(env_home)
    } else if let Some(home_path) = parsed.as_ref().and_then(|c| c.paths.home.as_deref()) {
        resolve_path(config_dir, home_path)
    } else {
        default_home
    };

    let file_incidents = parsed.as_ref().and_then(|c| c.incidents.as_ref());

    let log_path = if let Some(env_log) = env.incident_log {
        PathBuf::from(env_log)
    } else if let Some(log_path) = file_incidents.and_then(|i| i.log_path.as_deref()) {
        resolve_path(config_dir, log_path)
    } else {
        home.join(DEFAULT_INCIDENT_LOG)
    };

    let min_level = file_incidents
        .and_then(|i| i.min_level)
        .unwrap_or(RiskLevel::Low);

    let assessment = parsed.map(|c| c.assessment).unwrap_or_default();
    assessment.validate().with_context(|| {
        format!(
            "Invalid assessment settings in {}",
            config_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string())
        )
    })?;

    Ok(ResolvedConfig {
        home,
        config_file,
        assessment,
        incidents: IncidentSettings {
            min_level,
            log_path,
        },
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    resolve(find_config_file(&cwd), EnvOverrides::from_env(), default_home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the crisisguard home directory
pub fn crisisguard_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the incident log path ($CRISISGUARD_HOME/incidents.jsonl by default)
pub fn incident_log_path() -> Result<PathBuf> {
    Ok(config()?.incidents.log_path.clone())
}

/// Get the configured assessor settings
pub fn assessor_settings() -> Result<AssessorSettings> {
    Ok(config()?.assessment.clone())
}
