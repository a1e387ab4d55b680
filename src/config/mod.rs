use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

pub use validator::{SchemaError, SchemaValidator};

use crate::domain::FieldDescriptor;

/// Process-wide engine settings, loaded once at startup and injected
/// explicitly into whatever issues network calls.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub lookup: LookupSettings,
}

/// Settings for the backend API collaborator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL for form submission endpoints
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

/// Settings for the postal-code address lookup side effect.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupSettings {
    /// Base URL of the lookup-by-code service
    #[serde(default = "default_lookup_base_url")]
    pub base_url: String,
    /// Delay before a scheduled lookup fires; a newer edit within this
    /// window supersedes the pending lookup
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Request timeout for the lookup client
    #[serde(default = "default_lookup_timeout")]
    pub timeout_seconds: u64,
    /// Name of the postal-code field that triggers the lookup
    #[serde(default = "default_postal_field")]
    pub postal_field: String,
    /// Fields overwritten with the lookup result
    #[serde(default = "default_street_field")]
    pub street_field: String,
    #[serde(default = "default_city_field")]
    pub city_field: String,
    #[serde(default = "default_state_field")]
    pub state_field: String,
    /// Digit count of a complete postal code
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: default_lookup_base_url(),
            debounce_ms: default_debounce_ms(),
            timeout_seconds: default_lookup_timeout(),
            postal_field: default_postal_field(),
            street_field: default_street_field(),
            city_field: default_city_field(),
            state_field: default_state_field(),
            code_length: default_code_length(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_lookup_base_url() -> String {
    "https://viacep.com.br".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_lookup_timeout() -> u64 {
    10
}

fn default_postal_field() -> String {
    "cep".to_string()
}

fn default_street_field() -> String {
    "street".to_string()
}

fn default_city_field() -> String {
    "city".to_string()
}

fn default_state_field() -> String {
    "state".to_string()
}

fn default_code_length() -> usize {
    8
}

impl EngineSettings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Load settings from `<root>/formwork.{toml,yaml,json}` if present,
    /// overlaid with `FORMWORK__*` environment variables. Missing sources
    /// fall back to defaults.
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("formwork");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(config::Environment::with_prefix("FORMWORK").separator("__"))
            .build()?;

        let settings: EngineSettings = s.try_deserialize()?;
        Ok(settings)
    }
}

/// Load a field schema from a JSON or YAML file, selected by extension,
/// and validate it before handing it to the engine.
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Vec<FieldDescriptor>, anyhow::Error> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let fields: Vec<FieldDescriptor> = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("JSON parse error in {}: {}", path.display(), e))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("YAML parse error in {}: {}", path.display(), e))?,
        other => anyhow::bail!("unsupported schema format: {:?}", other),
    };

    SchemaValidator::validate(&fields).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::anyhow!("Schema validation failed:\n{}", messages.join("\n"))
    })?;

    Ok(fields)
}
