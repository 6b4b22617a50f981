//! TOML-based configuration for mica.
//!
//! Supports a config file (mica.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [target]
//! project = "my-project"
//! location = "us-central1"
//! entry_group = "oracle-prod"
//!
//! [source]
//! system = "oracle"
//! host = "db.example.com:1521"
//! database = "ORCLPDB"
//! user = "ingest"
//! password_secret = "${ORACLE_PASSWORD_SECRET}"
//! exclude_databases = ["guest"]
//!
//! [output]
//! bucket = "gs://my-bucket"
//! folder = "oracle"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::system::System;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing required configuration key: {0}")]
    MissingKey(&'static str),

    #[error("Unsupported source system: {0}. Supported: oracle, sqlserver, aws_glue")]
    UnsupportedSystem(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Target catalog coordinates.
    pub target: TargetConfig,

    /// Source connection details.
    pub source: SourceSettings,

    /// Output destination.
    pub output: OutputSettings,
}

/// Where the generated import items land: project, location and entry group
/// of the target catalog. Read-only for the lifetime of a run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    pub project: String,
    pub location: String,
    pub entry_group: String,
}

impl TargetConfig {
    /// Reject empty coordinates before any node is built.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.project.is_empty() {
            return Err(SettingsError::MissingKey("target.project"));
        }
        if self.location.is_empty() {
            return Err(SettingsError::MissingKey("target.location"));
        }
        if self.entry_group.is_empty() {
            return Err(SettingsError::MissingKey("target.entry_group"));
        }
        Ok(())
    }
}

/// Source system connection configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Source system tag (oracle, sqlserver, aws_glue).
    pub system: String,

    /// Host (and optional instance or port suffix) for database sources.
    pub host: Option<String>,

    /// Database, service or SID name for database sources.
    pub database: Option<String>,

    /// Region for catalog-service sources (AWS Glue).
    pub region: Option<String>,

    pub user: Option<String>,

    /// Reference resolved through the `SecretResolver` collaborator
    /// (supports ${ENV_VAR} expansion).
    pub password_secret: Option<String>,

    /// If non-empty, only these raw database names are ingested.
    pub include_databases: Vec<String>,

    /// These raw database names are never ingested, include list or not.
    pub exclude_databases: Vec<String>,
}

impl SourceSettings {
    pub fn system(&self) -> Result<System, SettingsError> {
        System::from_str(&self.system)
            .ok_or_else(|| SettingsError::UnsupportedSystem(self.system.clone()))
    }

    /// Raw root segment of the hierarchy: host for databases, region for
    /// catalog services.
    pub fn root(&self) -> Result<&str, SettingsError> {
        match self.system()? {
            System::AwsGlue => self
                .region
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or(SettingsError::MissingKey("source.region")),
            System::Oracle | System::SqlServer => self
                .host
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or(SettingsError::MissingKey("source.host")),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let system = self.system()?;
        self.root()?;
        if matches!(system, System::Oracle | System::SqlServer)
            && self.database.as_deref().unwrap_or("").is_empty()
        {
            return Err(SettingsError::MissingKey("source.database"));
        }
        Ok(())
    }
}

/// Output destination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Object storage bucket to upload the import file to.
    pub bucket: Option<String>,

    /// Folder within the bucket.
    pub folder: Option<String>,

    /// Local directory for the generated file.
    pub local_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file with environment variable expansion.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        let expanded = expand_env_vars(&raw)?;
        let settings: Settings = toml::from_str(&expanded)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string (no env expansion, no validation).
    pub fn from_toml(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.target.validate()?;
        self.source.validate()
    }
}

/// Expand `${VAR}` references against the process environment.
fn expand_env_vars(input: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                let value =
                    env::var(var).map_err(|_| SettingsError::MissingEnvVar(var.to_string()))?;
                result.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    Ok(result)
}
