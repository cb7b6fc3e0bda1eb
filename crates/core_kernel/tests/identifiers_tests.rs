//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, ordering and serialization
//! of participant and bill identifiers.

use core_kernel::{BillId, ParticipantId};
use std::collections::{BTreeMap, HashMap};

mod participant_id_tests {
    use super::*;

    #[test]
    fn test_new_keeps_value_verbatim() {
        let id = ParticipantId::new(" Alice ");
        assert_eq!(id.as_str(), " Alice ");
    }

    #[test]
    fn test_label() {
        assert_eq!(ParticipantId::label(), "participant");
    }

    #[test]
    fn test_display_format() {
        let id = ParticipantId::new("Bob");
        assert_eq!(format!("{}", id), "Bob");
    }

    #[test]
    fn test_from_str_round_trip() {
        let parsed: ParticipantId = "Carol".parse().unwrap();
        assert_eq!(parsed, ParticipantId::new("Carol"));
    }

    #[test]
    fn test_string_conversion() {
        let id: ParticipantId = String::from("Dave").into();
        let back: String = id.into();
        assert_eq!(back, "Dave");
    }

    #[test]
    fn test_is_empty() {
        assert!(ParticipantId::new("").is_empty());
        assert!(!ParticipantId::new("x").is_empty());
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ParticipantId::new("A"), 1.0);
        assert_eq!(map.get("A"), Some(&1.0));
    }
}

mod bill_id_tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(BillId::label(), "bill");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut map = BTreeMap::new();
        map.insert(BillId::new("b"), ());
        map.insert(BillId::new("a"), ());
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let id = BillId::new("first_bill");
        let json = serde_json::to_string(&id).unwrap();
        let back: BillId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_into_inner() {
        assert_eq!(BillId::new("rent").into_inner(), "rent");
    }
}
