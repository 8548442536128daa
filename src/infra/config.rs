use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::extract::{ExtractOptions, ReceiverMatch};

/// Config file names probed in the working directory, first match wins
pub const CONFIG_FILES: [&str; 2] = ["ifacegen.toml", ".ifacegen.toml"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Interface generation settings
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig
{
    /// Receiver forms that bind a method to the type: "value" or "any"
    pub receivers: ReceiverMatch,

    /// Include methods with unexported (lower-case) names
    pub include_unexported: bool,
}

impl Default for GenerateConfig
{
    fn default() -> Self
    {
        Self { receivers: ReceiverMatch::Value, include_unexported: true }
    }
}

impl Config
{
    /// Extraction options with an optional CLI override for receivers
    pub fn extract_options(
        &self,
        receivers: Option<ReceiverMatch>,
    ) -> ExtractOptions
    {
        ExtractOptions {
            receivers: receivers.unwrap_or(self.generate.receivers),
            include_unexported: self
                .generate
                .include_unexported,
        }
    }
}

/// Layered load: explicit file (must exist) or the first of
/// `CONFIG_FILES` found in the working directory, then `IFACEGEN_*`
/// environment variables (`IFACEGEN_GENERATE__RECEIVERS=value`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let mut builder = config::Config::builder();

    if let Some(path) = explicit
    {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    else
    {
        for path in &CONFIG_FILES
        {
            if Path::new(path).exists()
            {
                builder = builder.add_source(
                    config::File::new(path, config::FileFormat::Toml).required(false),
                );
                break;
            }
        }
    }

    // Double underscore separates nesting so `include_unexported` survives
    builder = builder.add_source(
        config::Environment::with_prefix("IFACEGEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

/// Write a default config into `dir`. Refuses to overwrite unless `force`.
pub fn init(
    dir: &Path,
    force: bool,
) -> Result<PathBuf>
{
    let config_path = dir.join(CONFIG_FILES[0]);

    if config_path.exists() && !force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let toml_string =
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn explicit_file_overrides_defaults() -> Result<()>
    {
        let dir = tempfile::TempDir::new()?;
        let path = dir
            .path()
            .join("custom.toml");
        std::fs::write(&path, "[generate]\nreceivers = \"any\"\n")?;

        let cfg = load_config(Some(&path))?;
        assert_eq!(cfg.generate.receivers, ReceiverMatch::Any);
        // Unset keys keep their defaults
        assert!(cfg.generate.include_unexported);

        Ok(())
    }

    #[test]
    fn missing_explicit_file_is_an_error()
    {
        assert!(load_config(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[test]
    fn cli_override_wins()
    {
        let cfg = Config::default();
        assert_eq!(cfg.extract_options(None).receivers, ReceiverMatch::Value);
        assert_eq!(
            cfg.extract_options(Some(ReceiverMatch::Any))
                .receivers,
            ReceiverMatch::Any
        );
    }

    #[test]
    fn init_round_trips_and_refuses_overwrite() -> Result<()>
    {
        let dir = tempfile::TempDir::new()?;

        let path = init(dir.path(), false)?;
        let cfg = load_config(Some(&path))?;
        assert_eq!(cfg, Config::default());

        assert!(init(dir.path(), false).is_err());
        assert!(init(dir.path(), true).is_ok());

        Ok(())
    }
}
