//! Position.

use crate::sans::term::{RawDegrees, parse_degrees};

use super::{Commit, Staged};

#[derive(Debug, Default, Clone, Copy)]
struct Position {
    lat: RawDegrees,
    lng: RawDegrees,
}

/// Latitude and longitude, committed together as a pair.
#[derive(Debug, Default, Clone)]
pub struct Location(Staged<Position>);

impl Location {
    staged_status!();

    /// Latitude in raw form.
    pub fn raw_lat(&mut self) -> RawDegrees {
        self.0.value().lat
    }

    /// Longitude in raw form.
    pub fn raw_lng(&mut self) -> RawDegrees {
        self.0.value().lng
    }

    /// Latitude in signed decimal degrees, negative south of the equator.
    pub fn lat(&mut self) -> f64 {
        self.0.value().lat.to_degrees()
    }

    /// Longitude in signed decimal degrees, negative west of Greenwich.
    pub fn lng(&mut self) -> f64 {
        self.0.value().lng.to_degrees()
    }

    pub(crate) fn set_latitude(&mut self, term: &[u8]) {
        self.0.staging_mut().lat = parse_degrees(term);
    }

    pub(crate) fn set_longitude(&mut self, term: &[u8]) {
        self.0.staging_mut().lng = parse_degrees(term);
    }

    pub(crate) fn set_north_south(&mut self, term: &[u8]) {
        self.0.staging_mut().lat.negative = term.first() == Some(&b'S');
    }

    pub(crate) fn set_east_west(&mut self, term: &[u8]) {
        self.0.staging_mut().lng.negative = term.first() == Some(&b'W');
    }
}

impl Commit for Location {
    fn commit(&mut self, now: u32) {
        self.0.commit(now);
    }
}
