use std::path::{Path, PathBuf};

use serde::Deserialize;

use skysnap_common::{ConfigError, ConfigFile, Versioned};
use skysnap_sources::Auth;

/// Directory name under `$HOME/.config`
pub const TAG: &str = "skysnap";
/// Current version
pub const CVERSION: usize = 1;

/// Configuration for the CLI tool, every field is optional and the command line wins.
///
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// File format version
    pub version: usize,
    /// API endpoint
    pub base_url: Option<String>,
    /// Timeout in seconds
    pub timeout: Option<u64>,
    /// Raw dump of every response
    pub dump: Option<PathBuf>,
    /// Opensky credentials
    pub auth: Option<Auth>,
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Load either the given file or the default one if it exists.
    ///
    pub fn load(fname: Option<&Path>) -> Result<Config, ConfigError> {
        Ok(ConfigFile::<Config>::load(TAG, CVERSION, fname)?.into_inner())
    }
}
