//! Caller subscriptions to arbitrary sentence terms.
//!
//! A subscription names a sentence by its literal first term (for example
//! `GPGSV`, or a proprietary `PUBX`) and a term position. While a sentence of
//! that name is decoded, the raw text of the term is staged, and it is
//! committed together with the built-in fields once the checksum verifies.
//!
//! Subscriptions are kept in a fixed-capacity index sorted by name and then
//! term position. When a sentence is classified, the contiguous run of
//! entries sharing its name becomes the candidate set for the remaining terms,
//! so terms of other sentences never touch the registry.

use core::ops::Range;

use heapless::{String, Vec};
use thiserror::Error;

use crate::field::{Commit, Staged};

use super::term::{TERM_CAPACITY, to_text};

/// Maximum number of concurrent subscriptions.
pub const MAX_SUBSCRIPTIONS: usize = 16;

/// An error registering a subscription.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscribeError {
    /// Every subscription slot is in use.
    #[error("All subscription slots are in use.")]
    Full,
    /// The sentence name cannot match any first term.
    #[error("Sentence name too long ({0} bytes).")]
    NameTooLong(usize),
}

/// Handle to a registered subscription.
///
/// Handles stay valid until passed to
/// [`Decoder::unsubscribe`](super::Decoder::unsubscribe); afterwards they
/// resolve to nothing, even if their slot is reused.
///
/// A handle is only meaningful to the decoder that issued it. Passed to
/// another decoder, it may resolve to an unrelated subscription. Staleness is
/// tracked with a 16-bit counter per slot, so a handle kept through 65 536
/// reuses of its slot may resolve again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    slot: u8,
    generation: u16,
}

/// The raw text of a subscribed term.
#[derive(Debug, Clone)]
pub struct CustomField {
    name: String<TERM_CAPACITY>,
    term: u8,
    text: Staged<String<TERM_CAPACITY>>,
}

impl CustomField {
    /// Name of the subscribed sentence.
    pub fn sentence(&self) -> &str {
        &self.name
    }

    /// Position of the subscribed term.
    pub fn term(&self) -> u8 {
        self.term
    }

    /// Whether the term has ever been committed.
    pub fn is_valid(&self) -> bool {
        self.text.is_valid()
    }

    /// Whether the term has been committed since the last read.
    pub fn is_updated(&self) -> bool {
        self.text.is_updated()
    }

    /// Milliseconds since the last commit, or `u32::MAX` if never valid.
    pub fn age(&self, now: u32) -> u32 {
        self.text.age(now)
    }

    /// The committed text. Clears the updated flag.
    pub fn value(&mut self) -> &str {
        self.text.value()
    }

    fn key(&self) -> (&[u8], u8) {
        (self.name.as_bytes(), self.term)
    }
}

#[derive(Debug)]
pub(crate) struct Registry {
    slots: [Option<CustomField>; MAX_SUBSCRIPTIONS],
    generations: [u16; MAX_SUBSCRIPTIONS],
    /// Occupied slots, sorted by name and term.
    order: Vec<u8, MAX_SUBSCRIPTIONS>,
    /// Positions in `order` subscribed to the current sentence.
    candidates: Range<usize>,
    /// First term of the current sentence.
    current: String<TERM_CAPACITY>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            slots: [const { None }; MAX_SUBSCRIPTIONS],
            generations: [0; MAX_SUBSCRIPTIONS],
            order: Vec::new(),
            candidates: 0..0,
            current: String::new(),
        }
    }
}

impl Registry {
    pub(crate) fn insert(&mut self, name: &str, term: u8) -> Result<Subscription, SubscribeError> {
        if name.len() > TERM_CAPACITY {
            Err(SubscribeError::NameTooLong(name.len()))?;
        }

        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SubscribeError::Full)?;

        let field = CustomField {
            name: to_text(name.as_bytes()),
            term,
            text: Staged::default(),
        };

        // After any equal keys, so subscriptions sharing a term keep their
        // registration order.
        let position = self
            .order
            .iter()
            .position(|&i| {
                self.slots[i as usize]
                    .as_ref()
                    .is_some_and(|other| field.key() < other.key())
            })
            .unwrap_or(self.order.len());

        self.order
            .insert(position, slot as u8)
            .map_err(|_| SubscribeError::Full)?;
        self.slots[slot] = Some(field);
        self.generations[slot] = self.generations[slot].wrapping_add(1);

        log_debug!("Subscribed to {} term {}.", name, term);

        self.reselect();

        Ok(Subscription {
            slot: slot as u8,
            generation: self.generations[slot],
        })
    }

    pub(crate) fn remove(&mut self, subscription: Subscription) -> Option<CustomField> {
        self.get(subscription)?;

        let position = self
            .order
            .iter()
            .position(|&i| i == subscription.slot)?;
        self.order.remove(position);

        let field = self.slots[subscription.slot as usize].take()?;

        log_debug!("Unsubscribed from {} term {}.", field.sentence(), field.term);

        self.reselect();

        Some(field)
    }

    pub(crate) fn get(&self, subscription: Subscription) -> Option<&CustomField> {
        let slot = subscription.slot as usize;
        if *self.generations.get(slot)? != subscription.generation {
            return None;
        }
        self.slots[slot].as_ref()
    }

    pub(crate) fn get_mut(&mut self, subscription: Subscription) -> Option<&mut CustomField> {
        let slot = subscription.slot as usize;
        if *self.generations.get(slot)? != subscription.generation {
            return None;
        }
        self.slots[slot].as_mut()
    }

    /// Select the candidates for a sentence by its first term.
    pub(crate) fn select(&mut self, name: &[u8]) {
        self.current = to_text(name);
        self.reselect();
    }

    /// Forget the candidates of the previous sentence.
    pub(crate) fn clear(&mut self) {
        self.current.clear();
        self.candidates = 0..0;
    }

    /// Stage a term for every candidate subscribed to its position.
    pub(crate) fn stage(&mut self, term_number: u8, text: &[u8]) {
        for position in self.candidates.clone() {
            let Some(field) = self.slots[self.order[position] as usize].as_mut() else {
                continue;
            };

            if field.term > term_number {
                break;
            }
            if field.term == term_number {
                field.text.stage(to_text(text));
            }
        }
    }

    /// Commit every candidate of the current sentence.
    pub(crate) fn commit(&mut self, now: u32) {
        for position in self.candidates.clone() {
            if let Some(field) = self.slots[self.order[position] as usize].as_mut() {
                field.text.commit(now);
            }
        }
    }

    fn name(&self, i: u8) -> &[u8] {
        self.slots[i as usize]
            .as_ref()
            .map_or(&[][..], |field| field.name.as_bytes())
    }

    fn reselect(&mut self) {
        let name = self.current.as_bytes();

        let start = self
            .order
            .iter()
            .position(|&i| self.name(i) >= name)
            .unwrap_or(self.order.len());

        let end = start
            + self.order[start..]
                .iter()
                .take_while(|&&i| self.name(i) == name)
                .count();

        self.candidates = if name.is_empty() { 0..0 } else { start..end };
    }
}
