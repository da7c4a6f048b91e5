use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Directory `init` scaffolds the shared knowledge base into.
pub const SKILL_DIR: &str = ".shared/quant-trading-pro";
/// Data directory used when nothing else can be found.
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub max_results: usize,
    pub k1: f64,
    pub b: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 3, k1: 1.5, b: 0.75 }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.max_results == 0 {
            return Err(Error::InvalidConfig("search.max_results must be at least 1".into()));
        }
        if !(search.k1.is_finite() && search.k1 > 0.0) {
            return Err(Error::InvalidConfig(format!("search.k1 must be positive, got {}", search.k1)));
        }
        if !(0.0..=1.0).contains(&search.b) {
            return Err(Error::InvalidConfig(format!("search.b must be within [0, 1], got {}", search.b)));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
    settings: Settings,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("quantpro.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("quantpro.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("quantpro.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("quantpro.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("QUANTPRO_").split("__"));
        Ok(Self::from_figment(figment)?)
    }

    /// Extracts and validates the typed settings once; they are kept for
    /// [`Config::settings`].
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(Self { figment, settings })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> &Settings { &self.settings }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Picks the dataset directory.
///
/// A configured directory always wins (after expansion). Otherwise the first
/// existing candidate is used: `./data`, the scaffolded skill directory, a
/// `data` directory next to the executable, then the per-user install.
pub fn locate_data_dir(configured: Option<&str>) -> PathBuf {
    if let Some(dir) = configured {
        return expand_path(dir);
    }
    candidate_data_dirs()
        .into_iter()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

fn candidate_data_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from(SKILL_DIR).join("data")];
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.join("data"))) {
        dirs.push(dir);
    }
    dirs.push(expand_path("~/.quant-trading-skill/data"));
    dirs
}
