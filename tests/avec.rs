#![cfg(feature = "std")]

use std::io::{self, Cursor, ErrorKind, Read};

use astrolabe::{
    Decoder, Outcome, Sentence,
    avec::{commands, decode_reader, reader},
    sans::check::{compute_parity, verify},
};

const LOG: &[u8] = b"$GPRMC,175628.00,A,6504.56965,N,02529.16680,E,0.866,,081019,,,A*7D\r\n\
$GPGGA,175628.00,6504.56965,N,02529.16680,E,1,05,3.69,117.3,M,21.0,M,,*56\r\n";

/// Yields its input in small chunks, interrupting and then blocking along the
/// way.
struct Flaky<'a> {
    input: &'a [u8],
    calls: usize,
}

impl Read for Flaky<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;

        if self.calls % 3 == 0 {
            return Err(ErrorKind::Interrupted.into());
        }
        if self.input.is_empty() {
            return Err(ErrorKind::WouldBlock.into());
        }

        let n = buf.len().min(7).min(self.input.len());
        buf[..n].copy_from_slice(&self.input[..n]);
        self.input = &self.input[n..];
        Ok(n)
    }
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(ErrorKind::BrokenPipe.into())
    }
}

#[test]
fn decode_everything() {
    let mut gps = Decoder::new();
    assert!(decode_reader(&mut Cursor::new(LOG), &mut gps).unwrap());

    assert_eq!(gps.passed_checksum(), 2);
    assert_eq!(gps.satellites.value(), 5);
    assert_eq!(gps.chars_processed() as usize, LOG.len());

    assert!(!decode_reader(&mut io::empty(), &mut gps).unwrap());
}

#[test]
fn decode_interrupted() {
    let mut gps = Decoder::new();
    let mut r = Flaky { input: LOG, calls: 0 };

    assert!(reader::decode(&mut r, &mut gps).unwrap());
    assert_eq!(gps.passed_checksum(), 2);
}

#[test]
fn next_sentence() {
    let mut gps = Decoder::new();
    let mut r = Cursor::new(LOG);

    assert_eq!(reader::next(&mut r, &mut gps).unwrap(), Outcome::Sentence(Sentence::Rmc));
    assert_eq!(r.position() as usize, LOG.iter().position(|&b| b == b'\n').unwrap() + 1);
    assert!(!gps.satellites.is_valid());

    assert_eq!(reader::next(&mut r, &mut gps).unwrap(), Outcome::Sentence(Sentence::Gga));
    assert_eq!(reader::next(&mut r, &mut gps).unwrap(), Outcome::Unfinished);
}

#[test]
fn input_ending_in_carriage_return() {
    let rmc = &LOG[..LOG.iter().position(|&b| b == b'\r').unwrap() + 1];

    let mut gps = Decoder::new();
    let outcome = reader::next(&mut Cursor::new(rmc), &mut gps).unwrap();
    assert_eq!(outcome, Outcome::Sentence(Sentence::Rmc));
    assert!(gps.location.is_valid());

    // The line feed arriving later reports nothing more.
    assert_eq!(reader::next(&mut Cursor::new(b"\n"), &mut gps).unwrap(), Outcome::Unfinished);

    let mut gps = Decoder::new();
    assert!(decode_reader(&mut Cursor::new(rmc), &mut gps).unwrap());
}

#[test]
fn reader_errors() {
    let mut gps = Decoder::new();

    let err = reader::decode(&mut Broken, &mut gps).unwrap_err();
    let reader::Error::Io(e) = err;
    assert_eq!(e.kind(), ErrorKind::BrokenPipe);

    assert!(reader::next(&mut Broken, &mut gps).is_err());
}

#[test]
fn text_commands() {
    for command in [
        commands::GSV_OFF,
        commands::GSV_ON,
        commands::GSA_OFF,
        commands::GSA_ON,
        commands::VTG_OFF,
        commands::VTG_ON,
        commands::GLL_OFF,
        commands::GLL_ON,
        commands::BAUD_115200,
    ] {
        let (body, checksum) = command[1..].split_once('*').unwrap();
        assert!(command.starts_with("$PUBX,"), "{command}");
        assert!(verify(compute_parity(0, body.as_bytes()), checksum.as_bytes()), "{command}");
    }
}

#[test]
fn commands_decode() {
    let mut out = Vec::new();
    commands::set_minimum_sentences(&mut out).unwrap();
    commands::baudrate_to_115200(&mut out).unwrap();

    let mut gps = Decoder::new();
    gps.feed_all(&out);

    assert_eq!(gps.passed_checksum(), 5);
    assert_eq!(gps.failed_checksum(), 0);
    assert!(out.ends_with(b"*18\r\n"));
}

#[test]
fn binary_commands() {
    for frame in [commands::PERIOD_5000_MS, commands::PERIOD_100_MS] {
        let (body, checksum) = frame[2..].split_at(frame.len() - 4);
        assert_eq!(frame[..2], [0xB5, 0x62]);
        assert_eq!(commands::ubx_checksum(body), (checksum[0], checksum[1]));
    }

    let mut out = Vec::new();
    commands::period_to_100_ms(&mut out).unwrap();
    assert_eq!(out.len(), 16);
    assert_eq!(&out[..14], &commands::PERIOD_100_MS);
    assert_eq!(&out[14..], b"\r\n");
}

#[test]
fn switch_off_gsv() {
    let mut out = Vec::new();
    commands::switch_off_gsv(&mut out).unwrap();
    commands::period_to_5000_ms(&mut out).unwrap();

    assert!(out.starts_with(commands::GSV_OFF.as_bytes()));
    assert_eq!(out.len(), commands::GSV_OFF.len() + 2 + commands::PERIOD_5000_MS.len() + 2);
}
