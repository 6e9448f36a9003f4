//! Reader-based decoding.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use thiserror::Error;

use crate::{Decoder, Outcome};

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Feed every byte currently available from a reader to a decoder.
///
/// Reading stops at end of input, or when a non-blocking reader would block.
/// Returns whether any sentence was completed, valid or not.
///
/// This method is also re-exported as `astrolabe::avec::decode_reader`.
pub fn decode(r: &mut impl Read, d: &mut Decoder) -> Result<bool, Error> {
    let mut buf = [0; 64];
    let mut finished = false;

    while let Some(n) = fill(r, &mut buf)? {
        finished |= d.feed_all(&buf[..n]);
    }

    Ok(finished | d.flush().is_finished())
}

/// Feed bytes from a reader to a decoder until a sentence is completed.
///
/// Bytes are read one at a time, so nothing past the completing byte is
/// consumed. If input runs out right after a `\r`, the outcome of the
/// sentence it closed is returned; otherwise running out of input returns
/// [`Outcome::Unfinished`].
pub fn next(r: &mut impl Read, d: &mut Decoder) -> Result<Outcome, Error> {
    let mut buf = [0; 1];

    while fill(r, &mut buf)?.is_some() {
        let outcome = d.feed(buf[0]);

        if outcome.is_finished() {
            return Ok(outcome);
        }
    }

    Ok(d.flush())
}

/// Read into a buffer, returning `None` once no more bytes are available.
fn fill(r: &mut impl Read, buf: &mut [u8]) -> Result<Option<usize>, Error> {
    loop {
        match r.read(buf) {
            Ok(0) => return Ok(None),
            Ok(n) => return Ok(Some(n)),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}
