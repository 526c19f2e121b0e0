//! Module to deal with the sources we can connect to to fetch data.
//!
//! For now this is only Opensky but the `Fetchable` trait is what the rest of the code uses,
//! the site-specific parts are in `access`:
//!
//! - authentication (anonymous or login/password)
//! - fetching data (URL building, headers, etc.).
//!

use std::fmt::Debug;

pub use reqwest::StatusCode;

// Re-export these modules for a shorted import path.
//
pub use access::*;
pub use auth::*;
pub use error::*;

mod access;
mod auth;
mod error;

#[macro_use]
mod macros;

/// What we get back from a site: the HTTP status and the raw, fully buffered body.
///
#[derive(Clone, Debug)]
pub struct Payload {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Payload {
    /// Only a `200 OK` carries data we can decode
    ///
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// This trait enables us to manage different ways of connecting and fetching data under
/// a single interface.
///
pub trait Fetchable: Debug {
    /// Return site's name
    fn name(&self) -> String;
    /// Fetch actual data, one request
    fn fetch(&self) -> Result<Payload, FetchError>;
}

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
