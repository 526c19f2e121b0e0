//! `skyctl` fetches the current snapshot of state vectors from the Opensky Network and
//! prints them.
//!
//! Usage: `skyctl [OPTIONS] [USERNAME PASSWORD]`
//!
//! Logging is controlled by `RUST_LOG` and goes to `stderr`.
//!

use std::io;

use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::Result;
use tracing::{info, trace};

use skysnap_common::init_logging;
use skyctl::{make_site, run, usage_hint, Config, Opts};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(opts.tree)?;

    // Exit if needed
    //
    if opts.version {
        println!("{}", version());
        eprintln!("Modules:");
        eprintln!("\t{}", skysnap_common::version());
        eprintln!("\t{}", skysnap_formats::version());
        eprintln!("\t{}", skysnap_sources::version());
        return Ok(());
    }

    // Banner
    //
    banner()?;

    // Config has the defaults & credentials.
    //
    trace!("load config");
    let cfg = Config::load(opts.config.as_deref())?;

    let site = make_site(&opts, &cfg);
    info!("Fetching from {}", site);

    let dump = opts.dump.clone().or(cfg.dump.clone());

    let mut out = io::stdout().lock();
    run(&mut out, &site, dump.as_deref(), opts.format)?;

    if site.auth.is_anon() {
        usage_hint(&mut out, NAME)?;
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
