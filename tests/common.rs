use std::path::Path;

use astrolabe::Decoder;
use csv::ReaderBuilder;

#[test]
fn replay_receiver_log() {
    const PATH: &str = "fixtures/receiver-log.nmea";
    let log = std::fs::read_to_string(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    let mut gps = Decoder::new();

    for line in log.lines() {
        let mut outcome = None;
        for &b in line.as_bytes().iter().chain(b"\r\n") {
            let o = gps.feed(b);
            if o.is_finished() {
                assert!(outcome.is_none(), "Two outcomes for {line}.");
                outcome = Some(o);
            }
        }

        let outcome = outcome.expect("Every line completes a sentence.");
        validator.validate(line, &format!("{outcome:?}"), &mut gps);
    }

    assert!(validator.0.is_empty(), "Unused expectations.");
    assert_eq!(gps.chars_processed() as usize, log.lines().map(|l| l.len() + 2).sum());
}

/// Expected decoder state after each sentence of a log.
struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn validate(&mut self, line: &str, outcome: &str, gps: &mut Decoder) {
        let expected = self.0.remove(0);

        let (lat, lng) = if gps.location.is_valid() {
            (
                format!("{:.6}", gps.location.lat()),
                format!("{:.6}", gps.location.lng()),
            )
        } else {
            Default::default()
        };

        let optional = |valid: bool, value: u32| {
            if valid { value.to_string() } else { String::new() }
        };

        let time = optional(gps.time.is_valid(), gps.time.value());
        let date = optional(gps.date.is_valid(), gps.date.value());
        let satellites = optional(gps.satellites.is_valid(), gps.satellites.value());

        let found = [
            outcome.to_string(),
            gps.passed_checksum().to_string(),
            gps.failed_checksum().to_string(),
            gps.sentences_with_fix().to_string(),
            lat,
            lng,
            time,
            date,
            satellites,
            gps.sats_in_view.num_of().to_string(),
            gps.sats_in_view.num_of_db().to_string(),
        ];

        assert_eq!(found.as_slice(), expected.as_slice(), "After {line}.");
    }
}
