//! Decoded quantities, as maintained by the [`Decoder`](crate::Decoder).
//!
//! Every field holds two copies of its value. Terms are parsed into a
//! *staging* copy while a sentence is being decoded, and only once the
//! sentence's checksum has been verified is the staging copy promoted to the
//! *committed* copy returned by the accessors. A reader therefore never sees
//! a value from a corrupt sentence, or half of one from a sentence in
//! progress.
//!
//! All fields share the same status accessors:
//!
//! - `is_valid()`: a value has been committed at least once. Once set, this
//!   never clears; a later corrupt sentence leaves the last value in place,
//!   which then grows stale.
//! - `is_updated()`: a value has been committed since it was last read. Any
//!   value accessor clears this.
//! - `age(now)`: milliseconds between the last commit and `now` (as read from
//!   [`Decoder::millis`](crate::Decoder::millis)), or `u32::MAX` if no value
//!   was ever committed.

/// Status accessors for a newtype over [`Staged`].
macro_rules! staged_status {
    () => {
        /// Whether a value has ever been committed.
        pub fn is_valid(&self) -> bool {
            self.0.is_valid()
        }

        /// Whether a value has been committed since the last read.
        pub fn is_updated(&self) -> bool {
            self.0.is_updated()
        }

        /// Milliseconds since the last commit, or `u32::MAX` if never valid.
        pub fn age(&self, now: u32) -> u32 {
            self.0.age(now)
        }
    };
}

pub mod datetime;
pub mod decimal;
pub mod gsa;
pub mod location;
pub mod satellites;

pub use datetime::{Date, Time};
pub use decimal::{Altitude, Course, GroundSpeed, Hdop, Speed};
pub use gsa::{FixQuality, Gsa, GsaFix};
pub use location::Location;
pub use satellites::{SatelliteSlot, SatsInView};

use crate::sans::term::parse_u32;

/// Promotion of staged values, available only to the decoder.
pub(crate) trait Commit {
    /// Promote the staging copy, timestamping the commit with `now`.
    fn commit(&mut self, now: u32);
}

/// A value with separate staging and committed copies.
#[derive(Debug, Default, Clone)]
pub(crate) struct Staged<T> {
    value: T,
    staging: T,
    valid: bool,
    updated: bool,
    committed_at: u32,
}

impl<T: Clone> Staged<T> {
    pub(crate) fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn is_updated(&self) -> bool {
        self.updated
    }

    pub(crate) fn age(&self, now: u32) -> u32 {
        if self.valid {
            now.wrapping_sub(self.committed_at)
        } else {
            u32::MAX
        }
    }

    /// Read the committed value, clearing the updated flag.
    pub(crate) fn value(&mut self) -> &T {
        self.updated = false;
        &self.value
    }

    /// Read the committed value without affecting the updated flag.
    pub(crate) fn committed(&self) -> &T {
        &self.value
    }

    pub(crate) fn staging_mut(&mut self) -> &mut T {
        &mut self.staging
    }

    pub(crate) fn stage(&mut self, value: T) {
        self.staging = value;
    }
}

impl<T: Clone> Commit for Staged<T> {
    fn commit(&mut self, now: u32) {
        self.value.clone_from(&self.staging);
        self.committed_at = now;
        self.valid = true;
        self.updated = true;
    }
}

/// An unsigned count, such as the number of satellites used for a fix.
#[derive(Debug, Default, Clone)]
pub struct Integer(Staged<u32>);

impl Integer {
    staged_status!();

    /// The committed count. Clears the updated flag.
    pub fn value(&mut self) -> u32 {
        *self.0.value()
    }

    pub(crate) fn set(&mut self, term: &[u8]) {
        self.0.stage(parse_u32(term));
    }
}

impl Commit for Integer {
    fn commit(&mut self, now: u32) {
        self.0.commit(now);
    }
}
