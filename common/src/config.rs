//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default location for the configuration file of a given
//! tool and loading it.  The format itself is HCL, the content is whatever `T` is.
//!
//! An explicitly named file must exist, the default one is optional and we fall back on
//! `T::default()` when it is not there.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Config filename
const CONFIG: &str = "config.hcl";

/// Every configuration file carries its own version.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bad file version {0}, expected {1}")]
    BadFileVersion(usize, usize),
    #[error("Missing configuration file {0:?}")]
    MissingConfig(PathBuf),
    #[error("Can not read {0:?}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Error parsing configuration: {0}")]
    Parse(#[from] hcl::Error),
}

/// Configuration file for a given tool, stored in `<basedir>/<tag>/config.hcl`.
///
#[derive(Debug)]
pub struct ConfigFile<T> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Where the data came from, `None` if we used the defaults
    source: Option<PathBuf>,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    fn new(tag: &str) -> Self {
        #[cfg(unix)]
        let base = BaseDirs::new().map(|b| b.home_dir().join(".config"));

        #[cfg(windows)]
        let base = BaseDirs::new().map(|b| b.data_local_dir().to_path_buf());

        let basedir = makepath!(base.unwrap_or_else(|| PathBuf::from(".")), tag);
        debug!("basedir = {basedir:?}");

        ConfigFile {
            tag: tag.to_string(),
            basedir,
            source: None,
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        self.config_path().join(CONFIG)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (based on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load(tag: &str, version: usize, fname: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = ConfigFile::<T>::new(tag);

        let fname = match fname {
            Some(fname) if !fname.exists() => {
                return Err(ConfigError::MissingConfig(fname.to_path_buf()))
            }
            Some(fname) => fname.to_path_buf(),
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    trace!("no {def:?}, using defaults");
                    return Ok(cfg);
                }
                def
            }
        };

        trace!("Loading config file {fname:?}");
        let data = fs::read_to_string(&fname).map_err(|e| ConfigError::Read(fname.clone(), e))?;

        let data = Self::from_hcl(&data, version)?;
        debug!("struct data = {data:?}");

        cfg.inner = data;
        cfg.source = Some(fname);
        Ok(cfg)
    }

    /// Decode HCL content and check its version.
    ///
    pub fn from_hcl(data: &str, version: usize) -> Result<T, ConfigError> {
        let data: T = hcl::from_str(data)?;
        if data.version() != version {
            return Err(ConfigError::BadFileVersion(data.version(), version));
        }
        Ok(data)
    }

    /// Project name
    ///
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// File actually loaded, if any
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume and return the inner configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
