use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::depth::EmptyPolicy;
use crate::error::SourceError;

pub const DEFAULT_CONFIG_FILE: &str = "squat-depth.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Landmark file used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub empty_policy: EmptyPolicy,
    pub warn_out_of_range: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            empty_policy: EmptyPolicy::NoDepth,
            warn_out_of_range: true,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `squat-depth.toml` in the working directory
    /// if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            if source.as_os_str().is_empty() {
                anyhow::bail!("config `source` must not be an empty path");
            }
        }
        Ok(())
    }

    /// The landmark file to analyze: the explicit argument wins over the
    /// configured one.
    pub fn resolve_source(&self, arg: Option<PathBuf>) -> Result<PathBuf, SourceError> {
        arg.or_else(|| self.source.clone())
            .ok_or(SourceError::NotConfigured)
    }
}
