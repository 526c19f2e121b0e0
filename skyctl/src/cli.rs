//! Module describing the options of the `skyctl` driver
//!
//! There is no sub-command, `skyctl` does exactly one thing: fetch the current snapshot of
//! state vectors from Opensky and print it.
//!
//! - `skyctl` is an anonymous request
//! - `skyctl USERNAME PASSWORD` is an authenticated one
//!
//! Any other number of positional arguments is ignored and we fall back to an anonymous
//! request, even when the configuration file has credentials.
//!
//! Once the username is seen, everything that follows is taken verbatim so a password may
//! start with `-` (or be `--`).  Options must come before the credentials.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use strum::EnumString;
use tracing::warn;

use skysnap_sources::Auth;

/// CLI options
#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Write the raw response into this file before decoding.
    #[clap(short = 'd', long)]
    pub dump: Option<PathBuf>,
    /// Output format (text, table or json).
    #[clap(short = 'F', long, default_value = "text", value_parser)]
    pub format: Output,
    /// Timeout for the request in seconds.
    #[clap(short = 't', long)]
    pub timeout: Option<u64>,
    /// Use another API endpoint.
    #[clap(short = 'u', long)]
    pub url: Option<String>,
    /// Hierarchical log output.
    #[clap(long)]
    pub tree: bool,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
    /// Optional USERNAME PASSWORD.
    #[clap(allow_hyphen_values = true, num_args = 0..)]
    pub credentials: Vec<String>,
}

impl Opts {
    /// Credentials given on the command line, only if we have exactly two arguments.
    ///
    pub fn auth(&self) -> Option<Auth> {
        if self.bad_credentials() {
            warn!("{} arguments, ignoring them", self.credentials.len());
            return None;
        }

        match self.credentials.as_slice() {
            [username, password] => Some(Auth::login(username, password)),
            _ => None,
        }
    }

    /// Positional arguments were given but not exactly two of them.
    ///
    pub fn bad_credentials(&self) -> bool {
        !matches!(self.credentials.len(), 0 | 2)
    }
}

/// How do we display the snapshot
///
#[derive(Clone, Copy, Debug, Default, strum::Display, EnumString, strum::VariantNames, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Output {
    /// One labeled line per state vector
    #[default]
    Text,
    /// Everything in a table
    Table,
    /// Pretty-printed JSON with named fields
    Json,
}
