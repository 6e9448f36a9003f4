//! Satellites in view, aggregated across the sentences of a GSV group.
//!
//! A receiver reports its satellites in groups of GSV sentences, up to four
//! satellites per sentence. A sentence whose message index is 1 opens a new
//! group and clears every slot; satellites from that and the following
//! sentences of the group then fill the slots in arrival order. Satellites are
//! placed in the first free slot and are never matched by id, so a group that
//! repeats an id yields two slots for it.
//!
//! A sentence only joins the open group if its index follows the last one
//! committed. Once a sentence of a group is lost to a bad checksum, the rest
//! of that group is dropped and the slots keep describing the last group
//! opened.

use heapless::{String, Vec};

use crate::sans::term::{parse_u32, to_text};

use super::Commit;

/// Maximum number of satellites kept for a group.
pub const MAX_SATELLITES: usize = 30;

/// Maximum number of satellites reported by a single GSV sentence.
const PER_SENTENCE: usize = 4;

const SNR_CAPACITY: usize = 3;

/// A satellite in view, or an empty slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SatelliteSlot {
    id: Option<u16>,
    snr: String<SNR_CAPACITY>,
}

impl SatelliteSlot {
    /// Satellite id (PRN), or `None` for an empty slot.
    pub fn id(&self) -> Option<u16> {
        self.id
    }

    /// Signal-to-noise ratio in dB-Hz, as reported. Empty when the satellite is
    /// not being tracked.
    pub fn snr(&self) -> &str {
        &self.snr
    }

    /// Signal-to-noise ratio as an integer, zero when not reported.
    pub fn snr_int(&self) -> u32 {
        parse_u32(self.snr.as_bytes())
    }

    /// Whether no satellite occupies this slot.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// Terms of the GSV sentence being decoded.
#[derive(Debug, Default, Clone)]
struct Pending {
    message_total: u32,
    message_index: u32,
    in_view: u32,
    satellites: Vec<SatelliteSlot, PER_SENTENCE>,
}

/// The satellites of the most recent GSV group.
#[derive(Debug, Default, Clone)]
pub struct SatsInView {
    slots: [SatelliteSlot; MAX_SATELLITES],
    in_view: u32,
    message_total: u32,
    groups: u32,
    /// Message index expected next in the open group, if any.
    next_index: Option<u32>,
    valid: bool,
    updated: bool,
    committed_at: u32,
    pending: Pending,
}

impl SatsInView {
    /// Whether a GSV sentence has ever been committed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether a GSV sentence has been committed since the slots were last
    /// read.
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Milliseconds since the last commit, or `u32::MAX` if never valid.
    pub fn age(&self, now: u32) -> u32 {
        if self.valid {
            now.wrapping_sub(self.committed_at)
        } else {
            u32::MAX
        }
    }

    /// Number of groups begun (sentences with message index 1) so far.
    pub fn message_amount(&self) -> u32 {
        self.groups
    }

    /// Number of sentences in the current group, as reported.
    pub fn message_total(&self) -> u32 {
        self.message_total
    }

    /// Number of satellites in view, as reported.
    pub fn num_of(&self) -> u32 {
        self.in_view
    }

    /// Number of occupied slots.
    pub fn num_of_db(&self) -> u32 {
        self.slots.iter().filter(|s| !s.is_empty()).count() as u32
    }

    /// Sum of the signal-to-noise ratios of occupied slots.
    pub fn total_snr(&self) -> u32 {
        self.slots
            .iter()
            .filter(|s| !s.is_empty())
            .map(SatelliteSlot::snr_int)
            .sum()
    }

    /// A slot by position, if within capacity.
    pub fn get(&self, i: usize) -> Option<&SatelliteSlot> {
        self.slots.get(i)
    }

    /// All slots, occupied ones first in arrival order. Clears the updated
    /// flag.
    pub fn satellites(&mut self) -> &[SatelliteSlot] {
        self.updated = false;
        &self.slots
    }

    /// Discard the terms staged by an earlier sentence.
    pub(crate) fn begin(&mut self) {
        self.pending = Pending::default();
    }

    pub(crate) fn set_message_total(&mut self, term: &[u8]) {
        self.pending.message_total = parse_u32(term);
    }

    pub(crate) fn set_message_index(&mut self, term: &[u8]) {
        self.pending.message_index = parse_u32(term);
    }

    pub(crate) fn set_in_view(&mut self, term: &[u8]) {
        self.pending.in_view = parse_u32(term);
    }

    pub(crate) fn add_id(&mut self, term: &[u8]) {
        let slot = SatelliteSlot {
            id: Some(parse_u32(term) as u16),
            snr: String::new(),
        };

        // At most four ids are dispatched per sentence.
        let _ = self.pending.satellites.push(slot);
    }

    pub(crate) fn add_snr(&mut self, term: &[u8]) {
        if let Some(slot) = self.pending.satellites.last_mut() {
            slot.snr = to_text(term);
        }
    }
}

impl Commit for SatsInView {
    fn commit(&mut self, now: u32) {
        let pending = core::mem::take(&mut self.pending);

        if pending.message_index == 1 {
            self.groups = self.groups.wrapping_add(1);
            self.slots = Default::default();
        } else if self.next_index != Some(pending.message_index) {
            log_warn!(
                "Dropped GSV message {} of {} outside an open group.",
                pending.message_index,
                pending.message_total
            );
            return;
        }

        self.next_index = (pending.message_index < pending.message_total)
            .then(|| pending.message_index + 1);

        self.message_total = pending.message_total;
        self.in_view = pending.in_view;

        for satellite in pending.satellites {
            match self.slots.iter_mut().find(|s| s.is_empty()) {
                Some(slot) => *slot = satellite,
                None => log_warn!("No free slot for satellite {}.", satellite.id.unwrap_or(0)),
            }
        }

        self.committed_at = now;
        self.valid = true;
        self.updated = true;
    }
}
