//! # End-to-End Notification Flows
//!
//! Drives the bridge the way a host runtime would: attach to the engine,
//! subscribe on the event channel, push raw records from the bus side, and
//! observe what each subscriber receives.
//!
//! ## Flows
//!
//! 1. Subscribe → push → payload with the four fixed keys
//! 2. Push before subscribe → dropped, never replayed
//! 3. Subscribe S1 → cancel → subscribe S2 → only S2 receives
//! 4. Records without usable content are dropped silently
//! 5. Engine detach releases both channels; records keep flowing harmlessly

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use notification_bridge::{
        BridgeLifecycle, ExtractorConfig, MethodCall, MethodResult, NotificationListener,
        RawNotificationRecord, EVENT_CHANNEL, METHOD_CHANNEL,
    };
    use serde_json::json;

    use crate::integration::fixtures::{attached_bridge, record, FlakySink, RecordingSink};

    // =========================================================================
    // FLOW 1: subscribe and receive
    // =========================================================================

    #[test]
    fn test_subscriber_receives_title_only_notification() {
        let (bridge, messenger) = attached_bridge();
        let subscriber = RecordingSink::new();
        messenger
            .listen(EVENT_CHANNEL, None, subscriber.clone())
            .expect("event channel registered");

        bridge
            .listener()
            .on_notification_posted(record("com.a", json!({"title": "T"}), 1000));

        let received = subscriber.received();
        assert_eq!(received.len(), 1);
        assert_eq!(
            received[0].to_value(),
            json!({
                "packageName": "com.a",
                "title": "T",
                "message": "",
                "timeStamp": 1000
            })
        );
    }

    #[test]
    fn test_big_text_used_only_when_text_empty() {
        let (bridge, messenger) = attached_bridge();
        let subscriber = RecordingSink::new();
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        let listener = bridge.listener();
        listener.on_notification_posted(record(
            "com.mail",
            json!({"title": "Inbox", "text": "short", "big_text": "the whole thread"}),
            7,
        ));
        listener.on_notification_posted(record(
            "com.mail",
            json!({"title": "Inbox", "text": "short", "big_text": ""}),
            8,
        ));
        listener.on_notification_posted(record(
            "com.mail",
            json!({"title": "Inbox", "text": "", "big_text": "the whole thread"}),
            9,
        ));

        let messages: Vec<String> = subscriber
            .received()
            .into_iter()
            .map(|p| p.message)
            .collect();
        assert_eq!(messages, vec!["short", "short", "the whole thread"]);
    }

    #[test]
    fn test_events_arrive_in_bus_order() {
        let (bridge, messenger) = attached_bridge();
        let subscriber = RecordingSink::new();
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        let listener = bridge.listener();
        for t in 0..50 {
            listener.on_notification_posted(record("com.seq", json!({"text": format!("m{t}")}), t));
        }

        let stamps: Vec<i64> = subscriber.received().iter().map(|p| p.time_stamp).collect();
        assert_eq!(stamps, (0..50).collect::<Vec<_>>());
    }

    // =========================================================================
    // FLOW 2: no replay
    // =========================================================================

    #[test]
    fn test_records_before_subscribe_are_not_replayed() {
        let (bridge, messenger) = attached_bridge();
        bridge
            .listener()
            .on_notification_posted(record("com.a", json!({"big_text": "Long body"}), 1));

        let subscriber = RecordingSink::new();
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        assert_eq!(subscriber.count(), 0);
        let snapshot = bridge.sink().metrics().snapshot();
        assert_eq!(snapshot.events_extracted, 1);
        assert_eq!(snapshot.events_discarded, 1);
        assert_eq!(snapshot.events_delivered, 0);
    }

    // =========================================================================
    // FLOW 3: subscriber hand-over
    // =========================================================================

    #[test]
    fn test_only_current_subscriber_receives() {
        let (bridge, messenger) = attached_bridge();
        let first = RecordingSink::new();
        let second = RecordingSink::new();

        messenger.listen(EVENT_CHANNEL, None, first.clone()).unwrap();
        messenger.cancel(EVENT_CHANNEL, None).unwrap();
        messenger.listen(EVENT_CHANNEL, None, second.clone()).unwrap();

        bridge
            .listener()
            .on_notification_posted(record("com.a", json!({"title": "hello"}), 5));

        assert_eq!(first.count(), 0);
        assert_eq!(second.count(), 1);
    }

    #[test]
    fn test_listen_supersedes_without_cancel() {
        let (bridge, messenger) = attached_bridge();
        let first = RecordingSink::new();
        let second = RecordingSink::new();

        messenger.listen(EVENT_CHANNEL, None, first.clone()).unwrap();
        messenger.listen(EVENT_CHANNEL, None, second.clone()).unwrap();

        bridge
            .listener()
            .on_notification_posted(record("com.a", json!({"title": "hello"}), 5));

        assert_eq!(first.count(), 0);
        assert_eq!(second.count(), 1);
    }

    #[test]
    fn test_double_cancel_leaves_no_subscriber() {
        let (bridge, messenger) = attached_bridge();
        messenger.listen(EVENT_CHANNEL, None, RecordingSink::new()).unwrap();

        messenger.cancel(EVENT_CHANNEL, None).unwrap();
        messenger.cancel(EVENT_CHANNEL, None).unwrap();

        assert!(!bridge.sink().is_attached());
    }

    #[test]
    fn test_failing_subscriber_does_not_stop_pipeline() {
        let (bridge, messenger) = attached_bridge();
        let subscriber = Arc::new(FlakySink::default());
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        let listener = bridge.listener();
        for t in 1..=4 {
            listener.on_notification_posted(record("com.a", json!({"title": "x"}), t));
        }

        let stamps: Vec<i64> = subscriber.accepted().iter().map(|p| p.time_stamp).collect();
        assert_eq!(stamps, vec![2, 4]);
        let snapshot = bridge.sink().metrics().snapshot();
        assert_eq!(snapshot.delivery_failures, 2);
        assert_eq!(snapshot.events_delivered, 2);
    }

    // =========================================================================
    // FLOW 4: records without content
    // =========================================================================

    #[test]
    fn test_unusable_records_are_dropped() {
        let (bridge, messenger) = attached_bridge();
        let subscriber = RecordingSink::new();
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        let listener = bridge.listener();
        listener.on_notification_posted(record("com.a", json!({}), 1));
        listener.on_notification_posted(record("com.a", json!({"title": "", "text": ""}), 2));
        listener.on_notification_posted(record("com.a", json!(null), 3));
        listener.on_notification_posted(RawNotificationRecord::without_notification("com.a", 4));
        listener.on_notification_posted(record("com.a", json!({"title": ["not", "text"]}), 5));
        listener.on_notification_posted(record("com.a", json!({"text": "kept"}), 6));

        let received = subscriber.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].time_stamp, 6);

        let snapshot = bridge.sink().metrics().snapshot();
        assert_eq!(snapshot.records_received, 6);
        assert_eq!(snapshot.records_dropped(), 5);
    }

    #[test]
    fn test_removed_notifications_are_ignored() {
        let (bridge, messenger) = attached_bridge();
        let subscriber = RecordingSink::new();
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        bridge
            .listener()
            .on_notification_removed(record("com.a", json!({"title": "gone"}), 1));

        assert_eq!(subscriber.count(), 0);
    }

    // =========================================================================
    // FLOW 5: engine lifecycle
    // =========================================================================

    #[test]
    fn test_method_channel_replies_not_implemented() {
        let (_bridge, messenger) = attached_bridge();
        let reply = messenger
            .invoke_method(METHOD_CHANNEL, &MethodCall::new("getActiveNotifications", None))
            .unwrap();
        assert_eq!(reply, MethodResult::NotImplemented);
    }

    #[test]
    fn test_detach_from_engine_releases_channels() {
        let (bridge, messenger) = attached_bridge();
        assert_eq!(bridge.lifecycle(), BridgeLifecycle::Attached);

        bridge.on_detached_from_engine();

        assert_eq!(bridge.lifecycle(), BridgeLifecycle::Unattached);
        assert!(bridge.application_context().is_none());
        assert!(!messenger.has_method_call_handler(METHOD_CHANNEL));
        assert!(!messenger.has_stream_handler(EVENT_CHANNEL));
        assert!(messenger.listen(EVENT_CHANNEL, None, RecordingSink::new()).is_err());

        // the bus does not know about the engine and keeps pushing
        bridge
            .listener()
            .on_notification_posted(record("com.a", json!({"title": "late"}), 9));
        bridge.on_detached_from_engine();
        assert!(!bridge.is_attached());
    }

    #[test]
    fn test_android_key_preset_end_to_end() {
        use notification_bridge::{
            ApplicationContext, BridgeConfig, InMemoryMessenger, NotificationsBridge,
            PluginBinding,
        };

        let messenger = Arc::new(InMemoryMessenger::new());
        let bridge = NotificationsBridge::new(BridgeConfig {
            extractor: ExtractorConfig::android(),
            ..BridgeConfig::default()
        });
        bridge.on_attached_to_engine(PluginBinding::new(
            ApplicationContext::new("com.example.host"),
            messenger.clone(),
        ));
        let subscriber = RecordingSink::new();
        messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();

        bridge.listener().on_notification_posted(record(
            "com.chat",
            json!({"android.title": "Ana", "android.text": "hi", "android.bigText": "hi there"}),
            42,
        ));
        bridge.listener().on_notification_posted(record(
            "com.chat",
            json!({"android.title": "Ana", "android.text": "", "android.bigText": "hi there"}),
            43,
        ));

        let received = subscriber.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].title, "Ana");
        assert_eq!(received[0].message, "hi");
        assert_eq!(received[1].message, "hi there");
    }
}
