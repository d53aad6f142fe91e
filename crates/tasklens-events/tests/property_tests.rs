//! Property-based tests for event tags and metadata.

use proptest::prelude::*;
use tasklens_events::{EventType, MetadataValue, TaskEvent};

proptest! {
    #[test]
    fn test_any_tag_survives_serde(tag in "[a-zA-Z]{1,24}") {
        let event_type = EventType::from(tag.as_str());
        prop_assert_eq!(event_type.as_str(), tag.as_str());

        let json = serde_json::to_string(&event_type).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded: EventType = serde_json::from_str(&json).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, event_type);
    }

    #[test]
    fn test_finite_numbers_survive_serde(value in -1.0e12f64..1.0e12f64) {
        let event = TaskEvent::scheduled("p").with_metadata("v", value);
        let json = serde_json::to_string(&event).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded: TaskEvent = serde_json::from_str(&json).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let restored = decoded.metadata.get("v").and_then(MetadataValue::as_f64);
        prop_assert!(restored.is_some_and(|v| (v - value).abs() <= f64::EPSILON * value.abs()));
    }

    #[test]
    fn test_error_message_always_marks_failure(message in ".{0,64}", success in any::<bool>()) {
        let event = TaskEvent::execution_completed("p", 1.0, success).with_error_message(message.clone());
        prop_assert!(!event.success);
        prop_assert_eq!(event.error_message, Some(message));
    }
}
