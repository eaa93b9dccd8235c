//! End-to-end scenarios: producer and subscriber over one loopback broker.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use fortunecast::{
    Broker, FortuneStore, Producer, RunConfig, Sample, StreamState, Subscriber, Verbosity,
    FORTUNE_TOPIC,
};

fn config(samples: u32) -> RunConfig {
    RunConfig {
        domain_id: 0,
        sample_count: samples,
        verbosity: Verbosity::Silent,
    }
}

#[tokio::test]
async fn three_publish_cycles_satisfy_a_budget_of_six() {
    let broker = Broker::new(0);
    let token = CancellationToken::new();

    // Subscriber budget 6 = 3 fortunes + 3 frames; attach before publishing.
    let subscriber = Subscriber::new(&broker, &config(6))
        .unwrap()
        .with_timeout(Duration::from_millis(50));
    let tally = subscriber.tally();

    let producer = Producer::new(&broker, &config(3), FortuneStore::defaults())
        .unwrap()
        .with_interval(Duration::from_millis(20));

    let receiving = tokio::spawn(subscriber.run(token.clone()));
    let written = producer.run(token.clone()).await.unwrap();
    let received = receiving.await.unwrap();

    assert_eq!(written, 3);
    assert_eq!(received, 6);
    assert_eq!(tally.count(), 6);
    assert_eq!(tally.state_changes(), 0);
}

#[tokio::test]
async fn subscriber_observes_the_producer_going_quiet() {
    let broker = Broker::new(0);

    // Producer publishes fewer samples than the subscriber wants, then its
    // writers drop; the subscriber should observe the state changes without
    // counting them, and terminate only on cancellation.
    let subscriber = Subscriber::new(&broker, &config(10))
        .unwrap()
        .with_timeout(Duration::from_millis(20));
    let tally = subscriber.tally();

    let producer = Producer::new(&broker, &config(2), FortuneStore::defaults())
        .unwrap()
        .with_interval(Duration::from_millis(5));

    let token = CancellationToken::new();
    let receiving = tokio::spawn(subscriber.run(token.clone()));

    producer.run(token.clone()).await.unwrap();
    // Give the subscriber time to drain the backlog and the state samples.
    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();

    let received = receiving.await.unwrap();
    assert_eq!(received, 4);
    assert_eq!(tally.state_changes(), 2);
}

#[tokio::test]
async fn immediate_shutdown_beats_any_sample_budget() {
    let broker = Broker::new(0);
    let token = CancellationToken::new();
    token.cancel();

    let subscriber = Subscriber::new(&broker, &config(u32::MAX)).unwrap();
    let producer = Producer::new(&broker, &config(u32::MAX), FortuneStore::defaults()).unwrap();

    let started = Instant::now();
    let received = subscriber.run(token.clone()).await;
    let written = producer.run(token).await.unwrap();

    assert_eq!(received, 0);
    assert_eq!(written, 0);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn late_reader_only_sees_live_traffic_and_the_quiet_transition() {
    let broker = Broker::new(0);
    let writer = broker.writer::<String>(FORTUNE_TOPIC).unwrap();
    writer.publish("missed".to_string()).unwrap();

    let mut reader = broker.reader::<String>(FORTUNE_TOPIC).unwrap();
    writer.publish("seen".to_string()).unwrap();
    drop(writer);

    assert_eq!(
        reader.take_available(),
        vec![
            Sample::Valid("seen".to_string()),
            Sample::State(StreamState::WritersGone)
        ]
    );
}
