//! Fixed-point quantities with two decimal places.
//!
//! Each type stores its value in hundredths of its wire unit (`value()`), and
//! offers floating-point conversions to common units.

use crate::sans::term::parse_decimal;

use super::{Commit, Staged};

const MPH_PER_KNOT: f64 = 1.15077945;
const MPS_PER_KNOT: f64 = 0.51444444;
const KMPH_PER_KNOT: f64 = 1.852;
const MILES_PER_METER: f64 = 0.00062137112;
const KM_PER_METER: f64 = 0.001;
const FEET_PER_METER: f64 = 3.2808399;

macro_rules! decimal_field {
    (
        $t:ident,
        $(#[$attr:meta])*
        { $($(#[$method_attr:meta])* $method:ident => $factor:expr),* $(,)? }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Default, Clone)]
        pub struct $t(Staged<i32>);

        impl $t {
            staged_status!();

            /// The committed value, in hundredths of the wire unit.
            pub fn value(&mut self) -> i32 {
                *self.0.value()
            }

            $(
                $(#[$method_attr])*
                pub fn $method(&mut self) -> f64 {
                    $factor * self.value() as f64 / 100.0
                }
            )*

            pub(crate) fn set(&mut self, term: &[u8]) {
                self.0.stage(parse_decimal(term));
            }
        }

        impl Commit for $t {
            fn commit(&mut self, now: u32) {
                self.0.commit(now);
            }
        }
    };
}

decimal_field!(Speed, /** Speed over ground, from RMC (knots on the wire). */ {
    /** Knots. */
    knots => 1.0,
    /** Miles per hour. */
    mph => MPH_PER_KNOT,
    /** Metres per second. */
    mps => MPS_PER_KNOT,
    /** Kilometres per hour. */
    kmph => KMPH_PER_KNOT,
});

decimal_field!(Course, /** Course over ground in degrees from true north, from RMC. */ {
    /** Degrees. */
    deg => 1.0,
});

decimal_field!(Altitude, /** Altitude above mean sea level, from GGA (metres on the wire). */ {
    /** Metres. */
    meters => 1.0,
    /** Miles. */
    miles => MILES_PER_METER,
    /** Kilometres. */
    kilometers => KM_PER_METER,
    /** Feet. */
    feet => FEET_PER_METER,
});

decimal_field!(Hdop, /** Horizontal dilution of precision, from GGA. */ {
    /** Dilution as a plain ratio. */
    hdop => 1.0,
});

decimal_field!(GroundSpeed, /** Ground speed in kilometres per hour, from VTG. */ {
    /** Kilometres per hour. */
    kmph => 1.0,
});
