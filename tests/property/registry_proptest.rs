//! Property-based tests for the notification registry
//!
//! Random connect/disconnect sequences are replayed against the registry
//! and a plain model; group sizes must agree after every step.

use std::collections::HashMap;

use proptest::prelude::*;
use uuid::Uuid;

use social_media_api::backend::realtime::{outbound_channel, NotificationRegistry, Outbound};

#[derive(Debug, Clone)]
enum Op {
    Connect { slot: usize, user_id: i64 },
    Disconnect { slot: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, 1..4i64).prop_map(|(slot, user_id)| Op::Connect { slot, user_id }),
        (0..6usize).prop_map(|slot| Op::Disconnect { slot }),
    ]
}

proptest! {
    #[test]
    fn test_membership_matches_model(ops in prop::collection::vec(op(), 0..64)) {
        let registry = NotificationRegistry::new();
        let ids: Vec<Uuid> = (0..6).map(|_| Uuid::new_v4()).collect();
        // slot -> user of the open connection in that slot
        let mut model: HashMap<usize, i64> = HashMap::new();
        let mut receivers = Vec::new();

        for op in ops {
            match op {
                Op::Connect { slot, user_id } => {
                    let (tx, rx) = outbound_channel();
                    let registered = registry.register(ids[slot], user_id, tx);
                    // A slot holds at most one live connection
                    if model.contains_key(&slot) {
                        prop_assert!(registered.is_err());
                        continue;
                    }
                    prop_assert!(registered.is_ok());
                    receivers.push(rx);
                    model.insert(slot, user_id);
                }
                Op::Disconnect { slot } => {
                    let was_open = model.remove(&slot).is_some();
                    prop_assert_eq!(registry.unregister(ids[slot]), was_open);
                    // Second disconnect is a no-op
                    prop_assert!(!registry.unregister(ids[slot]));
                }
            }

            for user_id in 1..4i64 {
                let expected = model.values().filter(|&&owner| owner == user_id).count();
                prop_assert_eq!(registry.group_size(user_id), expected);
            }
            prop_assert_eq!(registry.connection_count(), model.len());
        }
    }

    #[test]
    fn test_notify_reaches_exactly_the_target_group(
        users in prop::collection::vec(1..5i64, 1..12),
        target in 1..5i64,
    ) {
        let registry = NotificationRegistry::new();
        let mut receivers = Vec::new();

        for &user_id in &users {
            let (tx, rx) = outbound_channel();
            registry.register(Uuid::new_v4(), user_id, tx).unwrap();
            receivers.push((user_id, rx));
        }

        registry.notify(target, serde_json::json!({"n": 1}));

        for (user_id, mut rx) in receivers {
            let received = std::iter::from_fn(|| rx.try_recv().ok())
                .filter(|outbound| matches!(outbound, Outbound::Frame(_)))
                .count();
            prop_assert_eq!(received, usize::from(user_id == target));
        }
    }
}
