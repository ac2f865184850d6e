//! Unit tests for the Identifiers module

use core_kernel::{CoreError, IdError, PaymentId, StudentId};
use uuid::Uuid;

mod student_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(StudentId::new(), StudentId::new());
    }

    #[test]
    fn test_prefix() {
        assert_eq!(StudentId::prefix(), "STU");
    }

    #[test]
    fn test_from_str_accepts_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: StudentId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(matches!("STU-not-a-uuid".parse::<StudentId>(), Err(IdError::Malformed(_))));
    }

    #[test]
    fn test_from_str_trims_pasted_whitespace() {
        let id = StudentId::new();
        let parsed: StudentId = format!("  {}\n", id).parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_receipt_number_cannot_select_a_student() {
        let receipt = PaymentId::new().to_string();
        let err: CoreError = receipt.parse::<StudentId>().unwrap_err().into();
        assert_eq!(err.to_string(), "Identifier error: Expected a STU id, got a PAY id");
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = StudentId::from(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

mod payment_id_tests {
    use super::*;

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = PaymentId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = PaymentId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_display_format() {
        assert!(PaymentId::new().to_string().starts_with("PAY-"));
        assert_eq!(PaymentId::prefix(), "PAY");
    }

    #[test]
    fn test_student_tag_rejected() {
        let enrolment = StudentId::new().to_string();
        assert_eq!(
            enrolment.parse::<PaymentId>(),
            Err(IdError::WrongKind {
                expected: "PAY",
                found: "STU"
            })
        );
    }
}
