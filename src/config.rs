use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{Encoding, FormatStyle};

pub const CONFIG_FILE_NAME: &str = ".bundlegenrc.json";

const DEFAULT_SOURCE_ROOT: &str = "./src/main/resources";

/// Contents of `.bundlegenrc.json`. Missing fields fall back to defaults.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory dotted bundle names are resolved against.
    pub source_root: String,
    /// Glob patterns (or literal paths) excluded from scanning.
    pub ignores: Vec<String>,
    pub format_style: FormatStyle,
    pub encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            ignores: Vec::new(),
            format_style: FormatStyle::default(),
            encoding: Encoding::default(),
        }
    }
}

impl Config {
    /// Every entry in `ignores` must be a valid glob.
    pub fn validate(&self) -> Result<()> {
        self.ignores.iter().try_for_each(|ignore| {
            Pattern::new(ignore)
                .map(drop)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", ignore))
        })
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }
}

/// Pretty-printed default config written by `bundlegen init`.
pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default()).context("Failed to generate default config.")
}

/// Walk up from `start_dir` looking for the config file, stopping at the
/// first directory that holds `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// False when no config file was found and defaults are in use.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    };

    Ok(ConfigLoadResult {
        config: Config::from_file(&path)?,
        from_file: true,
    })
}
