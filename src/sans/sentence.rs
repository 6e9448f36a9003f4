//! Sentence classification, and the table mapping terms to fields.

/// Kinds of sentence recognized by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sentence {
    /// Recommended minimum data: time, date, position, speed and course.
    Rmc,
    /// Fix data: time, position, fix quality, satellites used, HDOP and
    /// altitude.
    Gga,
    /// Satellites in view.
    Gsv,
    /// Course over ground and ground speed.
    Vtg,
    /// Dilution of precision and active satellites.
    Gsa,
    /// Geographic position.
    Gll,
    /// Any other sentence. Framed and checksummed, but no built-in fields are
    /// decoded.
    Other,
}

impl Sentence {
    /// Classify a sentence by its first term (talker and type).
    ///
    /// The GPS (`GP`) and multi-constellation (`GN`) talkers are equivalent
    /// for every kind except [`Sentence::Gsv`], whose groups are reported per
    /// constellation and so are only accepted from `GP`.
    pub fn classify(term: &[u8]) -> Self {
        let [talker @ .., a, b, c] = term else {
            return Self::Other;
        };

        let kind = match [*a, *b, *c] {
            [b'R', b'M', b'C'] => Self::Rmc,
            [b'G', b'G', b'A'] => Self::Gga,
            [b'G', b'S', b'V'] => Self::Gsv,
            [b'V', b'T', b'G'] => Self::Vtg,
            [b'G', b'S', b'A'] => Self::Gsa,
            [b'G', b'L', b'L'] => Self::Gll,
            _ => return Self::Other,
        };

        match (talker, kind) {
            (b"GP", _) => kind,
            (b"GN", Self::Gsv) => Self::Other,
            (b"GN", _) => kind,
            _ => Self::Other,
        }
    }

    /// Position of this kind in the dispatch table, if it has one.
    const fn row(self) -> Option<usize> {
        match self {
            Self::Rmc => Some(0),
            Self::Gga => Some(1),
            Self::Gsv => Some(2),
            Self::Vtg => Some(3),
            Self::Gsa => Some(4),
            Self::Gll => Some(5),
            Self::Other => None,
        }
    }
}

/// The destination of a term within a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Time,
    /// RMC or GLL status; `A` marks a fix.
    Status,
    /// GGA fix quality; anything above `0` marks a fix.
    Quality,
    Latitude,
    NorthSouth,
    Longitude,
    EastWest,
    Speed,
    Course,
    Date,
    Satellites,
    Hdop,
    Altitude,
    GroundSpeed,
    GsvMessageTotal,
    GsvMessageIndex,
    GsvSatellitesInView,
    GsvSatelliteId,
    GsvSnr,
    GsaMode,
    GsaFix,
    GsaSatelliteId,
    GsaPdop,
    GsaHdop,
    GsaVdop,
}

/// Number of term positions covered by the dispatch table.
pub const TERMS: usize = 20;

const KINDS: usize = 6;

type Table = [[Option<Field>; TERMS]; KINDS];

static DISPATCH: Table = build();

/// Look up the field a term is decoded into.
pub fn dispatch(sentence: Sentence, term: u8) -> Option<Field> {
    DISPATCH.get(sentence.row()?)?.get(term as usize).copied().flatten()
}

const fn build() -> Table {
    use Field::*;

    let mut t: Table = [[None; TERMS]; KINDS];

    const RMC: usize = 0;
    const GGA: usize = 1;
    const GSV: usize = 2;
    const VTG: usize = 3;
    const GSA: usize = 4;
    const GLL: usize = 5;

    t[RMC][1] = Some(Time);
    t[RMC][2] = Some(Status);
    t[RMC][3] = Some(Latitude);
    t[RMC][4] = Some(NorthSouth);
    t[RMC][5] = Some(Longitude);
    t[RMC][6] = Some(EastWest);
    t[RMC][7] = Some(Speed);
    t[RMC][8] = Some(Course);
    t[RMC][9] = Some(Date);

    t[GGA][1] = Some(Time);
    t[GGA][2] = Some(Latitude);
    t[GGA][3] = Some(NorthSouth);
    t[GGA][4] = Some(Longitude);
    t[GGA][5] = Some(EastWest);
    t[GGA][6] = Some(Quality);
    t[GGA][7] = Some(Satellites);
    t[GGA][8] = Some(Hdop);
    t[GGA][9] = Some(Altitude);

    t[GSV][1] = Some(GsvMessageTotal);
    t[GSV][2] = Some(GsvMessageIndex);
    t[GSV][3] = Some(GsvSatellitesInView);

    // Four (id, elevation, azimuth, SNR) blocks.
    let mut i = 0;
    while i < 4 {
        t[GSV][4 + 4 * i] = Some(GsvSatelliteId);
        t[GSV][7 + 4 * i] = Some(GsvSnr);
        i += 1;
    }

    t[VTG][7] = Some(GroundSpeed);

    t[GSA][1] = Some(GsaMode);
    t[GSA][2] = Some(GsaFix);

    let mut i = 3;
    while i <= 14 {
        t[GSA][i] = Some(GsaSatelliteId);
        i += 1;
    }

    t[GSA][15] = Some(GsaPdop);
    t[GSA][16] = Some(GsaHdop);
    t[GSA][17] = Some(GsaVdop);

    t[GLL][1] = Some(Latitude);
    t[GLL][2] = Some(NorthSouth);
    t[GLL][3] = Some(Longitude);
    t[GLL][4] = Some(EastWest);
    t[GLL][5] = Some(Time);
    t[GLL][6] = Some(Status);

    t
}
