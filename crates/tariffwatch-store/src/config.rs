//! YAML configuration loader
//!
//! Any string value of the form `ENV:NAME` is replaced by the environment
//! variable `NAME`. An unset variable behaves as if the key were absent,
//! so the field default applies.

use crate::errors::{config_error, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tariffwatch_core::logging_facility::Profile;
use tariffwatch_core::snapshot::TrackingMode;

const ENV_PREFIX: &str = "ENV:";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: TrackingMode,
    #[serde(deserialize_with = "codes")]
    pub tracked_hts: Vec<String>,
    pub sources: SourcesConfig,
    pub storage: StorageConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Local export file. Fetching is handled outside this tool.
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub snapshots_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub retain_weeks: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshots_dir: PathBuf::from("snapshots"),
            reports_dir: PathBuf::from("reports"),
            retain_weeks: 12,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub log_profile: Profile,
}

/// Unquoted codes like `8471300000` arrive as YAML integers
fn codes<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Number(u64),
    }

    let raw: Vec<Code> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|c| match c {
            Code::Text(s) => s,
            Code::Number(n) => n.to_string(),
        })
        .collect())
}

/// Replace `ENV:NAME` strings and drop entries that resolve to nothing
fn resolve_env(value: Value, lookup: &dyn Fn(&str) -> Option<String>) -> Value {
    match value {
        Value::String(s) => match s.strip_prefix(ENV_PREFIX) {
            Some(name) => match lookup(name) {
                Some(v) => Value::String(v),
                None => {
                    tracing::debug!(var = name, "environment variable not set");
                    Value::Null
                }
            },
            None => Value::String(s),
        },
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, resolve_env(v, lookup)))
                .filter(|(_, v)| !v.is_null())
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(
            seq.into_iter()
                .map(|v| resolve_env(v, lookup))
                .filter(|v| !v.is_null())
                .collect(),
        ),
        other => other,
    }
}

fn parse_with(content: &str, lookup: &dyn Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let raw: Value =
        serde_yaml::from_str(content).map_err(|e| config_error(format!("YAML parse error: {}", e)))?;
    let resolved = match resolve_env(raw, lookup) {
        Value::Null => return Ok(AppConfig::default()),
        v => v,
    };
    serde_yaml::from_value(resolved).map_err(|e| config_error(format!("invalid config: {}", e)))
}

/// Parse configuration from YAML text, resolving `ENV:` from the process
/// environment
///
/// # Errors
///
/// `ERR_CONFIG` on malformed YAML or invalid values.
pub fn parse_config_str(content: &str) -> Result<AppConfig> {
    parse_with(content, &|name| std::env::var(name).ok())
}

/// Load configuration from a file
///
/// # Errors
///
/// `ERR_CONFIG` if the file is missing or invalid.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(config_error(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| config_error(format!("cannot read {}: {}", path.display(), e)))?;
    let config = parse_config_str(&content)?;
    tracing::debug!(path = %path.display(), mode = %config.mode, "loaded config");
    Ok(config)
}

/// Read tracked codes from a file, one per line
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// `ERR_CONFIG` if the file cannot be read.
pub fn load_tracked_hts_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        config_error(format!(
            "cannot read tracked HTS file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_indirection_resolves() {
        let lookup = lookup_from(&[("TW_EXPORT", "/data/hts.csv")]);
        let config = parse_with("sources:\n  export_path: ENV:TW_EXPORT\n", &lookup).unwrap();
        assert_eq!(
            config.sources.export_path,
            Some(PathBuf::from("/data/hts.csv"))
        );
    }

    #[test]
    fn test_unset_env_falls_back_to_default() {
        let lookup = lookup_from(&[]);
        let yaml = "mode: ENV:TW_MODE\nstorage:\n  reports_dir: ENV:TW_REPORTS\n";
        let config = parse_with(yaml, &lookup).unwrap();
        assert_eq!(config.mode, TrackingMode::TrackedOnly);
        assert_eq!(config.storage.reports_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_env_in_sequence() {
        let lookup = lookup_from(&[("TW_CODE", "8471.30")]);
        let yaml = "tracked_hts:\n  - \"6111.20\"\n  - ENV:TW_CODE\n  - ENV:TW_MISSING\n";
        let config = parse_with(yaml, &lookup).unwrap();
        assert_eq!(config.tracked_hts, vec!["6111.20", "8471.30"]);
    }
}
