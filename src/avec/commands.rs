//! Configuration messages for u-blox receivers.
//!
//! Text commands are proprietary `PUBX` sentences, checksummed like any other
//! sentence; binary commands are UBX frames with their Fletcher checksum
//! included. Neither carries its line terminator, which the writers append.

/// Stop periodic GSV output.
pub const GSV_OFF: &str = "$PUBX,40,GSV,0,0,0,0,0,0*59";
/// Resume periodic GSV output.
pub const GSV_ON: &str = "$PUBX,40,GSV,0,1,0,0,0,0*58";
/// Stop periodic GSA output.
pub const GSA_OFF: &str = "$PUBX,40,GSA,0,0,0,0,0,0*4E";
/// Resume periodic GSA output.
pub const GSA_ON: &str = "$PUBX,40,GSA,0,1,0,0,0,0*4F";
/// Stop periodic VTG output.
pub const VTG_OFF: &str = "$PUBX,40,VTG,0,0,0,0,0,0*5E";
/// Resume periodic VTG output.
pub const VTG_ON: &str = "$PUBX,40,VTG,0,1,0,0,0,0*5F";
/// Stop periodic GLL output.
pub const GLL_OFF: &str = "$PUBX,40,GLL,0,0,0,0,0,0*5C";
/// Resume periodic GLL output.
pub const GLL_ON: &str = "$PUBX,40,GLL,0,1,0,0,0,0*5D";

/// Switch the receiver's UART to 115200 baud. The host must follow.
pub const BAUD_115200: &str = "$PUBX,41,1,0007,0003,115200,0*18";

/// Sentences disabled to leave only RMC and GGA.
pub const MINIMUM_SENTENCES: [&str; 4] = [GSV_OFF, GSA_OFF, VTG_OFF, GLL_OFF];

/// UBX-CFG-RATE: one measurement every 5000 ms.
pub const PERIOD_5000_MS: [u8; 14] = [
    0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0x88, 0x13, 0x01, 0x00, 0x01, 0x00, 0xB1, 0x49,
];

/// UBX-CFG-RATE: one measurement every 100 ms.
pub const PERIOD_100_MS: [u8; 14] = [
    0xB5, 0x62, 0x06, 0x08, 0x06, 0x00, 0x64, 0x00, 0x01, 0x00, 0x01, 0x00, 0x7A, 0x12,
];

/// Compute the Fletcher checksum of a UBX frame body (class through payload).
pub fn ubx_checksum(body: &[u8]) -> (u8, u8) {
    body.iter().fold((0u8, 0u8), |(a, b), &x| {
        let a = a.wrapping_add(x);
        (a, b.wrapping_add(a))
    })
}

#[cfg(feature = "std")]
pub use writer::*;

#[cfg(feature = "std")]
mod writer {
    use std::io::{Result, Write};

    use super::*;

    /// Write a text command followed by CR LF.
    pub fn send_sentence(w: &mut impl Write, sentence: &str) -> Result<()> {
        w.write_all(sentence.as_bytes())?;
        w.write_all(b"\r\n")
    }

    /// Write a binary command followed by CR LF.
    pub fn send_bytes(w: &mut impl Write, frame: &[u8]) -> Result<()> {
        w.write_all(frame)?;
        w.write_all(b"\r\n")
    }

    /// Disable GSV output.
    pub fn switch_off_gsv(w: &mut impl Write) -> Result<()> {
        send_sentence(w, GSV_OFF)
    }

    /// Disable GSV, GSA, VTG and GLL output.
    pub fn set_minimum_sentences(w: &mut impl Write) -> Result<()> {
        MINIMUM_SENTENCES
            .iter()
            .try_for_each(|sentence| send_sentence(w, sentence))
    }

    /// Switch the receiver to 115200 baud, flushing so the command leaves
    /// before the host changes its own rate.
    pub fn baudrate_to_115200(w: &mut impl Write) -> Result<()> {
        send_sentence(w, BAUD_115200)?;
        w.flush()
    }

    /// Measure once every 5000 ms.
    pub fn period_to_5000_ms(w: &mut impl Write) -> Result<()> {
        send_bytes(w, &PERIOD_5000_MS)
    }

    /// Measure once every 100 ms.
    pub fn period_to_100_ms(w: &mut impl Write) -> Result<()> {
        send_bytes(w, &PERIOD_100_MS)
    }
}
