use super::*;

#[test]
fn now_is_after_2020() {
    assert!(now_unix_secs() > 1_577_836_800);
}

#[test]
fn millis_round_down_to_whole_seconds() {
    assert_eq!(millis_to_secs(1_700_000_000_999.0), 1_700_000_000);
    assert_eq!(millis_to_secs(0.0), 0);
}
