use super::*;

#[test]
fn validate_signup_accepts_matching_passwords() {
    assert_eq!(validate_signup("bob", "pw", "pw").unwrap().username, "bob");
}

#[test]
fn validate_signup_rejects_mismatch() {
    assert_eq!(validate_signup("bob", "pw", "wp").unwrap_err(), "Passwords do not match");
}

#[test]
fn validate_signup_checks_blank_fields_first() {
    assert_eq!(validate_signup("", "pw", "x").unwrap_err(), "Username is required");
}
