//! # Bus Thread vs. Host Thread
//!
//! The bus pushes records on its own thread while the host subscribes and
//! unsubscribes on another. These tests check that:
//!
//! - nothing panics and every record is accounted for exactly once
//! - each subscriber sees its events in bus order
//! - a subscriber blocked inside delivery never stalls attach/detach

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use notification_bridge::{
        DistributionSink, NotificationEvent, NotificationListener, EVENT_CHANNEL,
    };
    use rand::Rng;
    use serde_json::json;

    use crate::integration::fixtures::{attached_bridge, record, BlockingSink, RecordingSink};

    const RECORDS: i64 = 2_000;

    #[test]
    fn test_churn_preserves_order_and_accounting() {
        let (bridge, messenger) = attached_bridge();
        let listener = bridge.listener();

        let producer = thread::spawn(move || {
            for t in 0..RECORDS {
                listener.on_notification_posted(record("com.bus", json!({"text": "tick"}), t));
                if t % 97 == 0 {
                    thread::yield_now();
                }
            }
        });

        let mut subscribers = Vec::new();
        let mut rng = rand::thread_rng();
        while !producer.is_finished() {
            match rng.gen_range(0..3) {
                0 => {
                    let subscriber = RecordingSink::new();
                    messenger
                        .listen(EVENT_CHANNEL, None, subscriber.clone())
                        .expect("attached");
                    subscribers.push(subscriber);
                }
                1 => messenger.cancel(EVENT_CHANNEL, None).expect("attached"),
                _ => thread::sleep(Duration::from_micros(rng.gen_range(0..200))),
            }
        }
        producer.join().expect("producer must not panic");

        let mut delivered = 0u64;
        for subscriber in &subscribers {
            let stamps: Vec<i64> = subscriber.received().iter().map(|p| p.time_stamp).collect();
            assert!(
                stamps.windows(2).all(|w| w[0] < w[1]),
                "subscriber saw events out of order: {stamps:?}"
            );
            delivered += stamps.len() as u64;
        }

        let snapshot = bridge.sink().metrics().snapshot();
        assert_eq!(snapshot.records_received, RECORDS as u64);
        assert_eq!(snapshot.events_extracted, RECORDS as u64);
        assert_eq!(snapshot.events_delivered, delivered);
        assert_eq!(
            snapshot.events_delivered + snapshot.events_discarded,
            RECORDS as u64
        );
    }

    #[test]
    fn test_event_never_delivered_to_two_subscribers() {
        let (bridge, messenger) = attached_bridge();
        let listener = bridge.listener();

        let producer = thread::spawn(move || {
            for t in 0..RECORDS {
                listener.on_notification_posted(record("com.bus", json!({"title": "t"}), t));
            }
        });

        let mut subscribers = Vec::new();
        while !producer.is_finished() {
            let subscriber = RecordingSink::new();
            messenger.listen(EVENT_CHANNEL, None, subscriber.clone()).unwrap();
            subscribers.push(subscriber);
            thread::yield_now();
        }
        producer.join().unwrap();

        let mut all: Vec<i64> = subscribers
            .iter()
            .flat_map(|s| s.received().into_iter().map(|p| p.time_stamp))
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_blocked_subscriber_does_not_stall_detach() {
        let sink = Arc::new(DistributionSink::default());
        let (blocking, entered, release) = BlockingSink::new();
        sink.attach(blocking);

        let producer = {
            let sink = sink.clone();
            thread::spawn(move || {
                let event = NotificationEvent::new("com.a", "t", "", 1).expect("valid event");
                sink.send(event);
            })
        };

        entered
            .recv_timeout(Duration::from_secs(5))
            .expect("delivery started");

        // The slot lock must be free while the subscriber is parked.
        sink.detach();
        assert!(!sink.is_attached());
        let replacement = RecordingSink::new();
        sink.attach(replacement.clone());
        assert!(sink.is_attached());

        release.send(()).unwrap();
        producer.join().expect("producer must not panic");

        assert_eq!(replacement.count(), 0);
        assert_eq!(sink.metrics().snapshot().events_delivered, 1);
    }

    #[test]
    fn test_engine_detach_while_bus_running() {
        let (bridge, messenger) = attached_bridge();
        messenger.listen(EVENT_CHANNEL, None, RecordingSink::new()).unwrap();
        let listener = bridge.listener();

        let producer = thread::spawn(move || {
            for t in 0..RECORDS {
                listener.on_notification_posted(record("com.bus", json!({"title": "t"}), t));
            }
        });

        thread::sleep(Duration::from_millis(1));
        messenger.cancel(EVENT_CHANNEL, None).unwrap();
        bridge.on_detached_from_engine();
        producer.join().expect("producer must not panic");

        assert!(!bridge.is_attached());
        assert_eq!(
            bridge.sink().metrics().snapshot().records_received,
            RECORDS as u64
        );
    }
}
