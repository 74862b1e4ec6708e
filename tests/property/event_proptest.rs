//! Property-based tests for gateway frames

use proptest::prelude::*;
use serde_json::json;

use social_media_api::shared::{group_key, ClientMessage, ServerMessage};

proptest! {
    #[test]
    fn test_echo_preserves_message(message in ".*") {
        let inbound = json!({"message": message}).to_string();
        let reply = ServerMessage::from(ClientMessage::parse(&inbound));

        prop_assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"message": message})
        );
    }

    #[test]
    fn test_arbitrary_text_never_panics(text in ".*") {
        let reply = ServerMessage::from(ClientMessage::parse(&text));
        let value = serde_json::to_value(&reply).unwrap();

        prop_assert!(value["message"].is_string());
    }

    #[test]
    fn test_group_key_is_prefixed_user_id(user_id in any::<i64>()) {
        prop_assert_eq!(group_key(user_id), format!("user_{}", user_id));
    }
}
