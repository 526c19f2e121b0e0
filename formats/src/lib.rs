//! Definition of the data formats we can decode.
//!
//! Right now this is only the `/states/all` snapshot from Opensky: a timestamp and a list of
//! positional arrays, each one a `StateVector`.
//!
//! Decoding is strict and all-or-nothing, see `SchemaError` for what is checked.
//!

// Re-export for convenience
//
pub use error::*;
pub use opensky::*;

mod error;
mod opensky;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
