use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use anamnesis_formatter::config::FormatterConfig;
use anamnesis_storage::save::DEFAULT_MAX_ATTEMPTS;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_BUCKET: &str = "anamnesis";

pub const BUCKET_ENV: &str = "ANAMNESIS_BUCKET";
pub const REGION_ENV: &str = "AWS_REGION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub bucket: String,
    /// Falls back to the AWS default chain when unset.
    #[serde(default)]
    pub region: Option<String>,
    /// Added in v1.
    pub max_save_attempts: u32,
    #[serde(default)]
    pub formatter: FormatterConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bucket: DEFAULT_BUCKET.to_string(),
            region: None,
            max_save_attempts: DEFAULT_MAX_ATTEMPTS,
            formatter: FormatterConfig::default(),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("anamnesis").join("anamnesis.json"))
}

/// Load the config at `path`, or the defaults when no file exists there.
pub fn load_config(path: &Path) -> eyre::Result<CliConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(CliConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse as raw JSON, migrate, then deserialize.
pub fn parse_config(contents: &str) -> eyre::Result<CliConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version = u32::try_from(on_disk_version)
        .map_err(|_| eyre::eyre!("config_version {on_disk_version} is out of range"))?;

    let migrated = migrate(json, on_disk_version)?;
    let config: CliConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: add max_save_attempts
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("max_save_attempts")
            .or_insert(serde_json::Value::Number(DEFAULT_MAX_ATTEMPTS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added max_save_attempts)");
    }

    Ok(json)
}

pub fn save_config(config: &CliConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Override bucket and region with non-empty values.
pub fn apply_overrides(config: &mut CliConfig, bucket: Option<String>, region: Option<String>) {
    if let Some(bucket) = bucket.filter(|b| !b.is_empty()) {
        config.bucket = bucket;
    }
    if let Some(region) = region.filter(|r| !r.is_empty()) {
        config.region = Some(region);
    }
}

/// [`apply_overrides`] from `ANAMNESIS_BUCKET` and `AWS_REGION`.
pub fn apply_env(config: &mut CliConfig) {
    apply_overrides(
        config,
        std::env::var(BUCKET_ENV).ok(),
        std::env::var(REGION_ENV).ok(),
    );
}
