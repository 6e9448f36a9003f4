#![no_std]

//! An incremental, allocation-free decoder for NMEA 0183 satellite-navigation
//! sentences.
//!
//! Astrolabe consumes a receiver's output one byte at a time, with constant
//! work per byte and fixed memory, and maintains a set of strongly typed
//! records (position, date and time, velocity, satellite visibility) that only
//! ever reflect sentences whose checksum validated.
//!
//! Most users should begin with [`Decoder`], feeding it bytes and reading the
//! fields in [`field`]. Applications reading from a [`std::io::Read`] can use
//! the conveniences in the [`avec`] module. The pieces of the underlying
//! finite-state machine are exposed in the [`sans`] module.
//!
//! ```
//! let mut gps = astrolabe::Decoder::new();
//!
//! gps.feed_all(b"$GPRMC,175628.00,A,6504.56965,N,02529.16680,E,0.866,,081019,,,A*7D\r\n");
//!
//! if gps.location.is_updated() {
//!     let (lat, lng) = (gps.location.lat(), gps.location.lng());
//! }
//! ```
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader and writer conveniences, and a monotonic default
//!   clock (default).
//! - `log`: emit diagnostics through the `log` crate.
//! - `defmt`: emit diagnostics through `defmt`, and implement `defmt::Format`
//!   for public value types.

#[cfg(feature = "std")]
extern crate std;

mod fmt;

pub mod avec;
pub mod field;
pub mod geo;
pub mod sans;

pub use sans::{
    Decoder,
    decoder::{Outcome, Stats},
    sentence::Sentence,
};
