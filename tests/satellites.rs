use astrolabe::{Decoder, Outcome, Sentence, field::FixQuality};

const GROUP: [&str; 3] = [
    "$GPGSV,3,1,09,02,15,220,28,05,40,300,33,07,10,050,,13,65,120,40*79\r\n",
    "$GPGSV,3,2,09,15,30,180,22,18,55,045,38,20,05,330,,24,22,270,30*7B\r\n",
    "$GPGSV,3,3,09,30,71,180,19*44\r\n",
];

const LATER_GROUP: [&str; 3] = [
    "$GPGSV,3,1,09,02,15,220,31,05,40,300,35,07,10,050,12,13,65,120,41*75\r\n",
    "$GPGSV,3,2,09,15,30,180,25,18,55,045,39,20,05,330,17,24,22,270,29*73\r\n",
    "$GPGSV,3,3,09,30,71,180,21*4F\r\n",
];

fn feed_group(gps: &mut Decoder, group: &[&str]) {
    for sentence in group {
        assert!(gps.feed_all(sentence.as_bytes()));
    }
}

fn ids(gps: &Decoder) -> Vec<u16> {
    (0..)
        .map_while(|i| gps.sats_in_view.get(i))
        .filter_map(|slot| slot.id())
        .collect()
}

#[test]
fn group_fills_slots_in_arrival_order() {
    let mut gps = Decoder::new();
    assert!(!gps.sats_in_view.is_valid());

    feed_group(&mut gps, &GROUP);

    assert_eq!(gps.passed_checksum(), 3);
    assert!(gps.sats_in_view.is_valid());
    assert_eq!(gps.sats_in_view.num_of(), 9);
    assert_eq!(gps.sats_in_view.num_of_db(), 9);
    assert_eq!(gps.sats_in_view.message_total(), 3);
    assert_eq!(gps.sats_in_view.message_amount(), 1);
    assert_eq!(ids(&gps), [2, 5, 7, 13, 15, 18, 20, 24, 30]);
    assert_eq!(gps.sats_in_view.total_snr(), 210);

    let untracked = gps.sats_in_view.get(2).unwrap();
    assert_eq!(untracked.id(), Some(7));
    assert_eq!(untracked.snr(), "");
    assert_eq!(untracked.snr_int(), 0);

    assert_eq!(gps.sats_in_view.get(8).unwrap().snr(), "19");
    assert!(gps.sats_in_view.get(9).unwrap().is_empty());
    assert!(gps.sats_in_view.get(astrolabe::field::satellites::MAX_SATELLITES).is_none());
}

#[test]
fn partial_group() {
    let mut gps = Decoder::new();
    feed_group(&mut gps, &GROUP[..2]);

    assert_eq!(gps.sats_in_view.num_of(), 9);
    assert_eq!(gps.sats_in_view.num_of_db(), 8);
}

#[test]
fn new_group_overwrites_slots() {
    let mut gps = Decoder::new();
    feed_group(&mut gps, &GROUP);
    feed_group(&mut gps, &LATER_GROUP);

    assert_eq!(gps.sats_in_view.num_of_db(), 9);
    assert_eq!(gps.sats_in_view.message_amount(), 2);
    assert_eq!(ids(&gps), [2, 5, 7, 13, 15, 18, 20, 24, 30]);
    assert_eq!(gps.sats_in_view.total_snr(), 250);
    assert_eq!(gps.sats_in_view.get(2).unwrap().snr(), "12");

    // A smaller group leaves no trace of the larger one.
    gps.feed_all(b"$GPGSV,1,1,02,07,10,050,,13,65,120,40*7E\r\n");
    assert_eq!(gps.sats_in_view.num_of(), 2);
    assert_eq!(ids(&gps), [7, 13]);
    assert_eq!(gps.sats_in_view.total_snr(), 40);
}

#[test]
fn corrupt_sentence_leaves_slots() {
    let mut gps = Decoder::new();
    feed_group(&mut gps, &GROUP);

    let corrupt = LATER_GROUP[0].replace("*75", "*76");
    let outcome = corrupt
        .bytes()
        .map(|b| gps.feed(b))
        .find(Outcome::is_finished);
    assert_eq!(outcome, Some(Outcome::Invalid));

    assert_eq!(gps.sats_in_view.message_amount(), 1);
    assert_eq!(gps.sats_in_view.num_of_db(), 9);
    assert_eq!(gps.sats_in_view.total_snr(), 210);

    // The rest of a group whose first sentence was lost is dropped.
    feed_group(&mut gps, &LATER_GROUP[1..]);

    let mut unique = ids(&gps);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids(&gps).len());
    assert!(gps.sats_in_view.num_of_db() <= gps.sats_in_view.num_of());
    assert_eq!(ids(&gps), [2, 5, 7, 13, 15, 18, 20, 24, 30]);
    assert_eq!(gps.sats_in_view.total_snr(), 210);

    // The next complete group is taken as usual.
    feed_group(&mut gps, &LATER_GROUP);
    assert_eq!(gps.sats_in_view.message_amount(), 2);
    assert_eq!(gps.sats_in_view.total_snr(), 250);
}

#[test]
fn lost_sentence_ends_group() {
    let mut gps = Decoder::new();
    feed_group(&mut gps, &GROUP);

    gps.feed_all(LATER_GROUP[0].as_bytes());
    gps.feed_all(LATER_GROUP[1].replace("*73", "*74").as_bytes());
    gps.feed_all(LATER_GROUP[2].as_bytes());

    assert_eq!(gps.failed_checksum(), 1);
    assert_eq!(ids(&gps), [2, 5, 7, 13]);
    assert!(gps.sats_in_view.num_of_db() <= gps.sats_in_view.num_of());
}

#[test]
fn sentence_outside_group_is_dropped() {
    let mut gps = Decoder::new();

    assert!(gps.feed_all(GROUP[2].as_bytes()));
    assert_eq!(gps.passed_checksum(), 1);
    assert_eq!(gps.sats_in_view.num_of_db(), 0);
    assert!(!gps.sats_in_view.is_valid());

    // A repeated sentence does not follow itself.
    feed_group(&mut gps, &GROUP[..2]);
    gps.feed_all(GROUP[1].as_bytes());
    assert_eq!(gps.sats_in_view.num_of_db(), 8);
}

#[test]
fn updated_until_read() {
    let mut gps = Decoder::new();
    feed_group(&mut gps, &GROUP[..1]);

    assert!(gps.sats_in_view.is_updated());
    assert_eq!(gps.sats_in_view.num_of_db(), 4);
    assert!(gps.sats_in_view.is_updated());

    let occupied = gps.sats_in_view.satellites().iter().filter(|s| !s.is_empty()).count();
    assert_eq!(occupied, 4);
    assert!(!gps.sats_in_view.is_updated());
}

#[test]
fn multi_constellation_gsv_ignored() {
    let mut gps = Decoder::new();

    let outcome = b"$GNGSV,1,1,01,07,10,050,33*55\r\n"
        .iter()
        .map(|&b| gps.feed(b))
        .find(Outcome::is_finished);

    assert_eq!(outcome, Some(Outcome::Sentence(Sentence::Other)));
    assert!(!gps.sats_in_view.is_valid());
}

#[test]
fn gsa_fix() {
    let mut gps = Decoder::new();
    assert!(!gps.gsa.is_valid());
    assert_eq!(gps.gsa.value().mode(), 'N');
    assert_eq!(gps.gsa.value().fix(), FixQuality::NotApplicable);

    gps.feed_all(b"$GPGSA,A,3,02,05,13,15,18,24,,,,,,,2.10,1.20,1.72*08\r\n");

    assert!(gps.gsa.is_updated());
    assert!(gps.gsa.fix_is_3d());
    assert_eq!(gps.gsa.amount(), 1);

    let fix = gps.gsa.value().clone();
    assert!(!gps.gsa.is_updated());
    assert_eq!(fix.mode(), 'A');
    assert_eq!(fix.fix(), FixQuality::Fix3d);
    assert!(fix.is_3d());
    assert_eq!(fix.satellites(), [2, 5, 13, 15, 18, 24]);
    assert_eq!(fix.num_sats(), 6);
    assert!((fix.pdop() - 2.1).abs() < 1e-9);
    assert!((fix.hdop() - 1.2).abs() < 1e-9);
    assert!((fix.vdop() - 1.72).abs() < 1e-9);
    assert_eq!(gps.stats().gsa, 1);
}

#[test]
fn gsa_without_fix_replaces_previous() {
    let mut gps = Decoder::new();
    gps.feed_all(b"$GPGSA,A,3,02,05,13,15,18,24,,,,,,,2.10,1.20,1.72*08\r\n");
    gps.feed_all(b"$GPGSA,A,1,,,,,,,,,,,,,99.99,99.99,99.99*30\r\n");

    assert_eq!(gps.gsa.amount(), 2);
    assert!(!gps.gsa.fix_is_3d());

    let fix = gps.gsa.value();
    assert_eq!(fix.fix(), FixQuality::None);
    assert!(fix.satellites().is_empty());
    assert!((fix.pdop() - 99.99).abs() < 1e-9);
}

#[test]
fn gsa_without_mode_starts_afresh() {
    let mut gps = Decoder::new();
    gps.feed_all(b"$GPGSA,A,3,02,05,13,15,18,24,,,,,,,2.10,1.20,1.72*08\r\n");
    gps.feed_all(b"$GPGSA,,3,07,09,,,,,,,,,,,2.50,1.30,2.10*4B\r\n");

    assert_eq!(gps.passed_checksum(), 2);
    assert_eq!(gps.gsa.amount(), 1);

    let fix = gps.gsa.value();
    assert_eq!(fix.mode(), 'N');
    assert_eq!(fix.satellites(), [7, 9]);
    assert!((fix.pdop() - 2.5).abs() < 1e-9);
}
