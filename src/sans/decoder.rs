//! The decoder engine.

use crate::field::{
    Altitude, Commit, Course, Date, GroundSpeed, Gsa, Hdop, Integer, Location, SatsInView, Speed,
    Time,
};

use super::{
    check::{parity_byte, parse_checksum},
    custom::{CustomField, Registry, SubscribeError, Subscription},
    sentence::{self, Field, Sentence},
    term::Term,
};

/// Result of feeding a byte to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// No sentence was completed by this byte.
    Unfinished,
    /// A sentence was completed, but failed its checksum. Nothing was
    /// committed.
    Invalid,
    /// A sentence of this kind was completed and committed.
    Sentence(Sentence),
}

impl Outcome {
    /// Whether a sentence was completed, valid or not.
    pub fn is_finished(&self) -> bool {
        *self != Self::Unfinished
    }
}

/// Counts of committed sentences, by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    /// RMC sentences.
    pub rmc: u32,
    /// GGA sentences.
    pub gga: u32,
    /// GSV sentences, including those dropped outside a group.
    pub gsv: u32,
    /// VTG sentences.
    pub vtg: u32,
    /// GSA sentences.
    pub gsa: u32,
    /// GLL sentences.
    pub gll: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingStart,
    InTerm,
    InChecksumTerm,
}

/// Incremental sentence decoder.
///
/// Feed bytes as they arrive with [`Decoder::feed`]; decoded values appear in
/// the public fields once the sentence carrying them has been verified. See
/// the [`field`](crate::field) module for the accessor contract.
///
/// ```
/// let mut gps = astrolabe::Decoder::new();
///
/// for &b in b"$GPGGA,175628.00,6504.56965,N,02529.16680,E,1,05,3.69,117.3,M,21.0,M,,*56\r\n" {
///     if gps.feed(b) == astrolabe::Outcome::Sentence(astrolabe::Sentence::Gga) {
///         assert!(gps.location.is_updated());
///     }
/// }
///
/// assert_eq!(gps.satellites.value(), 5);
/// ```
#[derive(Debug)]
pub struct Decoder {
    /// Position, from RMC, GGA and GLL with a fix.
    pub location: Location,
    /// UTC date, from RMC.
    pub date: Date,
    /// UTC time of day, from RMC, GGA and GLL.
    pub time: Time,
    /// Speed over ground, from RMC with a fix.
    pub speed: Speed,
    /// Course over ground, from RMC with a fix.
    pub course: Course,
    /// Altitude, from GGA with a fix.
    pub altitude: Altitude,
    /// Number of satellites used for the fix, from GGA.
    pub satellites: Integer,
    /// Horizontal dilution of precision, from GGA.
    pub hdop: Hdop,
    /// Satellites in view, from GSV groups.
    pub sats_in_view: SatsInView,
    /// Ground speed, from VTG.
    pub ground_speed: GroundSpeed,
    /// Dilution of precision and active satellites, from GSA.
    pub gsa: Gsa,

    state: State,
    term: Term,
    term_number: u8,
    parity: u8,
    sentence: Sentence,
    has_fix: bool,
    /// Outcome of a sentence closed by `\r`, reported on the following byte.
    deferred: Option<Outcome>,
    registry: Registry,

    stats: Stats,
    chars_processed: u32,
    sentences_with_fix: u32,
    passed_checksum: u32,
    failed_checksum: u32,

    clock: fn() -> u32,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder timestamping commits with the default clock.
    ///
    /// With the `std` feature, this is a monotonic count of milliseconds since
    /// the clock was first read. Without it, the default clock always
    /// reads zero, and [`Decoder::with_clock`] should be used instead.
    pub fn new() -> Self {
        Self::with_clock(monotonic_millis)
    }

    /// Create a decoder timestamping commits with a millisecond clock.
    ///
    /// The clock may wrap; ages are computed with wrapping arithmetic.
    pub fn with_clock(clock: fn() -> u32) -> Self {
        Self {
            location: Location::default(),
            date: Date::default(),
            time: Time::default(),
            speed: Speed::default(),
            course: Course::default(),
            altitude: Altitude::default(),
            satellites: Integer::default(),
            hdop: Hdop::default(),
            sats_in_view: SatsInView::default(),
            ground_speed: GroundSpeed::default(),
            gsa: Gsa::default(),

            state: State::AwaitingStart,
            term: Term::new(),
            term_number: 0,
            parity: 0,
            sentence: Sentence::Other,
            has_fix: false,
            deferred: None,
            registry: Registry::default(),

            stats: Stats::default(),
            chars_processed: 0,
            sentences_with_fix: 0,
            passed_checksum: 0,
            failed_checksum: 0,

            clock,
        }
    }

    /// Read the clock used to timestamp commits, for use with the `age`
    /// accessors.
    pub fn millis(&self) -> u32 {
        (self.clock)()
    }

    /// Process a single byte.
    ///
    /// Returns the outcome of the sentence completed by this byte, if any. A
    /// sentence is completed by its line terminator; when it ends in `\r\n`,
    /// the outcome is reported on the `\n`.
    pub fn feed(&mut self, b: u8) -> Outcome {
        self.chars_processed = self.chars_processed.wrapping_add(1);

        let deferred = self.deferred.take();

        let outcome = match (b, self.state) {
            (b'$', _) => {
                self.begin();
                Outcome::Unfinished
            }
            (_, State::AwaitingStart) => Outcome::Unfinished,
            (b',', _) => {
                self.parity = parity_byte(self.parity, b);
                let outcome = self.end_of_term();
                self.next_term(State::InTerm);
                outcome
            }
            (b'*', _) => {
                let outcome = self.end_of_term();
                self.next_term(State::InChecksumTerm);
                outcome
            }
            (b'\r', _) => {
                let outcome = self.end_of_term();
                self.next_term(State::AwaitingStart);
                if outcome.is_finished() {
                    self.deferred = Some(outcome);
                }
                Outcome::Unfinished
            }
            (b'\n', _) => {
                let outcome = self.end_of_term();
                self.next_term(State::AwaitingStart);
                outcome
            }
            (_, state) => {
                self.term.push(b);
                if state == State::InTerm {
                    self.parity = parity_byte(self.parity, b);
                }
                Outcome::Unfinished
            }
        };

        match (outcome, deferred) {
            (Outcome::Unfinished, Some(deferred)) => deferred,
            (outcome, _) => outcome,
        }
    }

    /// Report the outcome held back for a sentence closed by `\r`.
    ///
    /// Such a sentence is verified and committed at the `\r`, but its
    /// outcome is only reported by the following byte. Call this when input
    /// has ended, or paused, right after a `\r`. The outcome is reported once,
    /// so a `\n` fed afterwards reports nothing.
    pub fn flush(&mut self) -> Outcome {
        self.deferred.take().unwrap_or(Outcome::Unfinished)
    }

    /// Process a slice of bytes.
    ///
    /// Returns whether any sentence was completed, valid or not.
    pub fn feed_all(&mut self, bytes: &[u8]) -> bool {
        let mut finished = false;
        for &b in bytes {
            finished |= self.feed(b).is_finished();
        }
        finished
    }

    /// Subscribe to the raw text of a term of any sentence.
    ///
    /// `sentence` is matched against the literal first term, talker included
    /// (`GPGSV`, `PUBX`). Terms are numbered from 1 after the first term.
    pub fn subscribe(&mut self, sentence: &str, term: u8) -> Result<Subscription, SubscribeError> {
        self.registry.insert(sentence, term)
    }

    /// Remove a subscription, returning its last state.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> Option<CustomField> {
        self.registry.remove(subscription)
    }

    /// Look up a subscribed field. Returns `None` for a removed subscription.
    pub fn custom(&self, subscription: Subscription) -> Option<&CustomField> {
        self.registry.get(subscription)
    }

    /// Look up a subscribed field, to read its value.
    pub fn custom_mut(&mut self, subscription: Subscription) -> Option<&mut CustomField> {
        self.registry.get_mut(subscription)
    }

    /// Total number of bytes fed.
    pub fn chars_processed(&self) -> u32 {
        self.chars_processed
    }

    /// Number of verified sentences reporting a fix.
    pub fn sentences_with_fix(&self) -> u32 {
        self.sentences_with_fix
    }

    /// Number of sentences whose checksum verified.
    pub fn passed_checksum(&self) -> u32 {
        self.passed_checksum
    }

    /// Number of sentences whose checksum did not verify.
    pub fn failed_checksum(&self) -> u32 {
        self.failed_checksum
    }

    /// Counts of verified sentences, by kind.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn begin(&mut self) {
        self.state = State::InTerm;
        self.term.clear();
        self.term_number = 0;
        self.parity = 0;
        self.sentence = Sentence::Other;
        self.has_fix = false;
        self.registry.clear();
    }

    fn next_term(&mut self, state: State) {
        self.term.clear();
        self.term_number = self.term_number.saturating_add(1);
        self.state = state;
    }

    fn end_of_term(&mut self) -> Outcome {
        if self.state == State::InChecksumTerm {
            return self.verify();
        }

        if self.term_number == 0 {
            self.sentence = Sentence::classify(self.term.as_bytes());
            self.registry.select(self.term.as_bytes());

            match self.sentence {
                Sentence::Gsv => self.sats_in_view.begin(),
                Sentence::Gsa => self.gsa.begin(),
                _ => {}
            }

            return Outcome::Unfinished;
        }

        if !self.term.is_empty() {
            if let Some(field) = sentence::dispatch(self.sentence, self.term_number) {
                self.set(field);
            }
        }

        self.registry.stage(self.term_number, self.term.as_bytes());

        Outcome::Unfinished
    }

    /// Stage the current term into a field.
    fn set(&mut self, field: Field) {
        let t = self.term.as_bytes();

        match field {
            Field::Time => self.time.set(t),
            Field::Status => self.has_fix = t.first() == Some(&b'A'),
            Field::Quality => self.has_fix = t.first().is_some_and(|&b| b > b'0'),
            Field::Latitude => self.location.set_latitude(t),
            Field::NorthSouth => self.location.set_north_south(t),
            Field::Longitude => self.location.set_longitude(t),
            Field::EastWest => self.location.set_east_west(t),
            Field::Speed => self.speed.set(t),
            Field::Course => self.course.set(t),
            Field::Date => self.date.set(t),
            Field::Satellites => self.satellites.set(t),
            Field::Hdop => self.hdop.set(t),
            Field::Altitude => self.altitude.set(t),
            Field::GroundSpeed => self.ground_speed.set(t),
            Field::GsvMessageTotal => self.sats_in_view.set_message_total(t),
            Field::GsvMessageIndex => self.sats_in_view.set_message_index(t),
            Field::GsvSatellitesInView => self.sats_in_view.set_in_view(t),
            Field::GsvSatelliteId => self.sats_in_view.add_id(t),
            Field::GsvSnr => self.sats_in_view.add_snr(t),
            Field::GsaMode => self.gsa.set_mode(t),
            Field::GsaFix => self.gsa.set_fix(t),
            Field::GsaSatelliteId => self.gsa.add_satellite(t),
            Field::GsaPdop => self.gsa.set_pdop(t),
            Field::GsaHdop => self.gsa.set_hdop(t),
            Field::GsaVdop => self.gsa.set_vdop(t),
        }
    }

    /// Verify the checksum term, committing the sentence if it matches.
    fn verify(&mut self) -> Outcome {
        let found = parse_checksum(self.term.as_bytes());

        if found != Some(self.parity) {
            self.failed_checksum = self.failed_checksum.wrapping_add(1);
            log_debug!(
                "Checksum mismatch: calculated {}, found {}.",
                self.parity,
                found.unwrap_or(0)
            );
            return Outcome::Invalid;
        }

        self.passed_checksum = self.passed_checksum.wrapping_add(1);
        if self.has_fix {
            self.sentences_with_fix = self.sentences_with_fix.wrapping_add(1);
        }

        let now = (self.clock)();
        let fix = self.has_fix;

        match self.sentence {
            Sentence::Rmc => {
                self.date.commit(now);
                self.time.commit(now);
                if fix {
                    self.location.commit(now);
                    self.speed.commit(now);
                    self.course.commit(now);
                }
                self.stats.rmc = self.stats.rmc.wrapping_add(1);
            }
            Sentence::Gga => {
                self.time.commit(now);
                if fix {
                    self.location.commit(now);
                    self.altitude.commit(now);
                }
                self.satellites.commit(now);
                self.hdop.commit(now);
                self.stats.gga = self.stats.gga.wrapping_add(1);
            }
            Sentence::Gsv => {
                self.sats_in_view.commit(now);
                self.stats.gsv = self.stats.gsv.wrapping_add(1);
            }
            Sentence::Vtg => {
                self.ground_speed.commit(now);
                self.stats.vtg = self.stats.vtg.wrapping_add(1);
            }
            Sentence::Gsa => {
                self.gsa.commit(now);
                self.stats.gsa = self.stats.gsa.wrapping_add(1);
            }
            Sentence::Gll => {
                self.time.commit(now);
                if fix {
                    self.location.commit(now);
                }
                self.stats.gll = self.stats.gll.wrapping_add(1);
            }
            Sentence::Other => {}
        }

        self.registry.commit(now);

        log_trace!("Committed sentence (fix: {}).", fix);

        Outcome::Sentence(self.sentence)
    }
}

#[cfg(feature = "std")]
fn monotonic_millis() -> u32 {
    use std::{sync::OnceLock, time::Instant};

    static EPOCH: OnceLock<Instant> = OnceLock::new();

    EPOCH.get_or_init(Instant::now).elapsed().as_millis() as u32
}

#[cfg(not(feature = "std"))]
fn monotonic_millis() -> u32 {
    0
}
