//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::{BillId, ParticipantId};

#[test]
fn test_core_error_invalid_identifier() {
    let error = CoreError::invalid_identifier("participant must not be empty");

    match error {
        CoreError::InvalidIdentifier(msg) => assert!(msg.contains("participant")),
    }
}

#[test]
fn test_empty_identifiers_surface_as_core_errors() {
    let participant = "".parse::<ParticipantId>().unwrap_err();
    let bill = "".parse::<BillId>().unwrap_err();

    assert_eq!(participant.to_string(), "Invalid identifier: participant must not be empty");
    assert_eq!(bill.to_string(), "Invalid identifier: bill must not be empty");
}

#[test]
fn test_whitespace_is_a_valid_identifier_character() {
    let parsed = " ".parse::<ParticipantId>().unwrap();
    assert_eq!(parsed.as_str(), " ");
}
