use crate::constants::{CONFIG_FILE_NAME, DEFAULT_REGIONS_URL, DEFAULT_RSS_URL};
use crate::error::{FeedError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Run configuration. Every field is optional in `config.json`; missing keys
/// keep the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Status page listing the per-service feeds
    #[serde(rename = "RssURL", alias = "rss_url")]
    pub rss_url: String,

    /// JSON document of IP ranges carrying `prefixes[].region`
    #[serde(rename = "RegionsJSON", alias = "regions_url")]
    pub regions_url: String,

    /// Where the manifests go; the executable's directory when unset
    #[serde(rename = "OutputDir", alias = "output_dir")]
    pub output_dir: Option<PathBuf>,

    #[serde(rename = "Verbose", alias = "verbose")]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rss_url: DEFAULT_RSS_URL.to_string(),
            regions_url: DEFAULT_REGIONS_URL.to_string(),
            output_dir: None,
            verbose: false,
        }
    }
}

/// Values given on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub rss_url: Option<String>,
    pub regions_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    /// Loads `config.json` from the executable's directory.
    pub fn load() -> Result<Self> {
        let path = exec_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FeedError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(rss_url) = overrides.rss_url {
            self.rss_url = rss_url;
        }
        if let Some(regions_url) = overrides.regions_url {
            self.regions_url = regions_url;
        }
        if overrides.output_dir.is_some() {
            self.output_dir = overrides.output_dir;
        }
        self.verbose |= overrides.verbose;
        self
    }

    pub fn status_page_url(&self) -> Result<Url> {
        Ok(Url::parse(self.rss_url.trim())?)
    }

    pub fn region_list_url(&self) -> Result<Url> {
        Ok(Url::parse(self.regions_url.trim())?)
    }

    /// Resolved output directory.
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => exec_dir(),
        }
    }
}

/// Directory holding the running executable.
pub fn exec_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| FeedError::Config(format!("'{}' has no parent directory", exe.display())))
}
