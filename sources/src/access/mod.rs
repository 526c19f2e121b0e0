pub use opensky::*;

mod opensky;
