//! Dilution of precision and active satellites, from GSA.

use heapless::Vec;

use crate::sans::term::{parse_decimal, parse_u32};

use super::{Commit, Staged};

/// Maximum number of active satellite ids carried by a GSA sentence.
pub const MAX_GSA_SATELLITES: usize = 12;

/// Fix type reported by GSA.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    /// No fix available.
    None,
    /// Two-dimensional fix.
    Fix2d,
    /// Three-dimensional fix.
    Fix3d,
    /// Fix type missing or not recognized.
    #[default]
    NotApplicable,
}

impl From<u32> for FixQuality {
    fn from(value: u32) -> Self {
        match value {
            1 => Self::None,
            2 => Self::Fix2d,
            3 => Self::Fix3d,
            _ => Self::NotApplicable,
        }
    }
}

/// The contents of one GSA sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsaFix {
    mode: char,
    fix: FixQuality,
    satellites: Vec<u16, MAX_GSA_SATELLITES>,
    pdop: i32,
    hdop: i32,
    vdop: i32,
}

impl Default for GsaFix {
    fn default() -> Self {
        Self {
            mode: 'N',
            fix: FixQuality::default(),
            satellites: Vec::new(),
            pdop: 0,
            hdop: 0,
            vdop: 0,
        }
    }
}

impl GsaFix {
    /// Selection mode: `M` (manual) or `A` (automatic), `N` if not reported.
    pub fn mode(&self) -> char {
        self.mode
    }

    /// Fix type.
    pub fn fix(&self) -> FixQuality {
        self.fix
    }

    /// Whether the fix is three-dimensional.
    pub fn is_3d(&self) -> bool {
        self.fix == FixQuality::Fix3d
    }

    /// Ids of the satellites used for the fix, in reported order.
    pub fn satellites(&self) -> &[u16] {
        &self.satellites
    }

    /// Number of satellites used for the fix.
    pub fn num_sats(&self) -> usize {
        self.satellites.len()
    }

    /// Position dilution of precision.
    pub fn pdop(&self) -> f64 {
        self.pdop as f64 / 100.0
    }

    /// Horizontal dilution of precision.
    pub fn hdop(&self) -> f64 {
        self.hdop as f64 / 100.0
    }

    /// Vertical dilution of precision.
    pub fn vdop(&self) -> f64 {
        self.vdop as f64 / 100.0
    }
}

/// The most recent GSA sentence.
#[derive(Debug, Default, Clone)]
pub struct Gsa(Staged<GsaFix>, u32);

impl Gsa {
    staged_status!();

    /// The committed sentence. Clears the updated flag.
    pub fn value(&mut self) -> &GsaFix {
        self.0.value()
    }

    /// Whether the committed sentence reports a three-dimensional fix. Does
    /// not clear the updated flag.
    pub fn fix_is_3d(&self) -> bool {
        self.0.committed().is_3d()
    }

    /// Number of GSA sentences whose mode term has been decoded.
    pub fn amount(&self) -> u32 {
        self.1
    }

    /// Discard the terms staged by an earlier sentence.
    pub(crate) fn begin(&mut self) {
        self.0.stage(GsaFix::default());
    }

    pub(crate) fn set_mode(&mut self, term: &[u8]) {
        self.0.staging_mut().mode = match term.first() {
            Some(b) if b.is_ascii() => *b as char,
            _ => 'N',
        };
        self.1 = self.1.wrapping_add(1);
    }

    pub(crate) fn set_fix(&mut self, term: &[u8]) {
        self.0.staging_mut().fix = FixQuality::from(parse_u32(term));
    }

    pub(crate) fn add_satellite(&mut self, term: &[u8]) {
        // Ids past the twelfth are not dispatched.
        let _ = self.0.staging_mut().satellites.push(parse_u32(term) as u16);
    }

    pub(crate) fn set_pdop(&mut self, term: &[u8]) {
        self.0.staging_mut().pdop = parse_decimal(term);
    }

    pub(crate) fn set_hdop(&mut self, term: &[u8]) {
        self.0.staging_mut().hdop = parse_decimal(term);
    }

    pub(crate) fn set_vdop(&mut self, term: &[u8]) {
        self.0.staging_mut().vdop = parse_decimal(term);
    }
}

impl Commit for Gsa {
    fn commit(&mut self, now: u32) {
        self.0.commit(now);
    }
}
