//! Internal finite-state machine for decoding sentences.
//!
//! This module is intended for applications that need fine control over
//! decoder internals, or that want to reuse its pieces (checksums, term
//! parsing) on their own. See [`Decoder`] for the complete machine.
//!
//! # Architecture
//!
//! Sentences are framed as `$<talker><type>,<term>,...,<term>*<XX>\r\n`. The
//! decoder never holds more than one term at a time: each byte either extends
//! the current term (see [`term::Term`]) or ends it, and an ended term is
//! handed on immediately.
//!
//! - The first term names the sentence. It is classified into a
//!   [`sentence::Sentence`], and selects the run of caller subscriptions
//!   registered for that name (see [`custom`]).
//!
//! - Every following term is looked up in a constant dispatch table keyed by
//!   sentence kind and term position, and parsed into the *staging* half of
//!   the matching field.
//!
//! - The term after `*` is the checksum. Only if it matches the parity
//!   accumulated over the sentence (see [`check`]) are the staged values
//!   committed, and so become visible through the public accessors.
//!
//! A sentence that fails its checksum leaves every committed value as it was.
//! Values staged by such a sentence are simply overwritten by later ones.

pub mod check;
pub mod custom;
pub mod decoder;
pub mod sentence;
pub mod term;

/// Entrypoint to the finite-state machine.
pub type Decoder = decoder::Decoder;
