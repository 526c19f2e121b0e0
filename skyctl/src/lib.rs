//! Library part of the `skyctl` utility.
//!
//! The flow is always the same: fetch one snapshot from a `Fetchable` site, optionally dump
//! the raw bytes somewhere, decode into a `StateList` and print it.  Every error is fatal and
//! goes back to the caller, nothing is retried and no partial snapshot is ever printed.
//!

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use eyre::{eyre, Result};
use tracing::{debug, info, trace};

use skysnap_formats::StateList;
use skysnap_sources::{Fetchable, Opensky};

pub use cli::*;
pub use config::*;
pub use report::*;

mod cli;
mod config;
mod report;

/// Build the Opensky source from the command line and the configuration file, in that order.
///
/// A wrong number of positional arguments means an anonymous request, the credentials from
/// the configuration file are not used either.
///
pub fn make_site(opts: &Opts, cfg: &Config) -> Opensky {
    let mut site = Opensky::new();

    if let Some(url) = opts.url.as_ref().or(cfg.base_url.as_ref()) {
        site.base_url(url);
    }
    if let Some(secs) = opts.timeout.or(cfg.timeout) {
        site.timeout(Duration::from_secs(secs));
    }
    let auth = if opts.credentials.is_empty() {
        cfg.auth.clone()
    } else {
        opts.auth()
    };
    if let Some(auth) = auth {
        site.auth(auth);
    }
    debug!("site = {}", site);
    site
}

/// Write the raw response verbatim, overwriting whatever was there.
///
#[tracing::instrument(skip(data))]
pub fn dump_raw(path: &Path, data: &[u8]) -> Result<()> {
    trace!("dump {} bytes", data.len());

    fs::write(path, data).map_err(|e| eyre!("Can not write {:?}: {}", path, e))
}

/// The heart of the matter: fetch, decode and display.
///
#[tracing::instrument(skip(out, site), fields(source = %site.name()))]
pub fn run<W: Write>(
    out: &mut W,
    site: &dyn Fetchable,
    dump: Option<&Path>,
    format: Output,
) -> Result<StateList> {
    let payload = site.fetch()?;
    writeln!(out, "Status : {}", payload.status)?;

    if !payload.is_ok() {
        return Err(eyre!("HTTP error: {}", payload.status));
    }
    info!("{} bytes received", payload.body.len());

    if let Some(path) = dump {
        dump_raw(path, &payload.body)?;
    }

    let list = StateList::from_json(&payload.body)?;
    report(out, &list, format)?;
    Ok(list)
}
