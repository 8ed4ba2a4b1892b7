use super::{decode_payload, handler, log_location, run, subscribe_location};
use crate::client::fake::FakeLink;
use crate::client::{LoopTiming, RunOutcome};
use crate::shutdown::Shutdown;
use crate::topics::CAR_LOCATION_TOPIC;
use rumqttc::{Publish, QoS};
use std::sync::atomic::Ordering;
use std::time::Duration;

fn fast_timing() -> LoopTiming {
    LoopTiming {
        connect_timeout: Duration::from_millis(50),
        poll_interval: Duration::from_millis(5),
        publish_interval: Duration::from_millis(10),
    }
}

#[test]
fn test_decode_payload() {
    assert_eq!(decode_payload(b"The car location is: XYZ").unwrap(), "The car location is: XYZ");
    assert!(decode_payload(&[0xff, 0xfe]).is_err());
}

#[test]
fn test_log_location_handles_bad_utf8() {
    // Should not panic
    log_location(&Publish::new(CAR_LOCATION_TOPIC, QoS::AtLeastOnce, vec![0xff, 0xfe]));
    let handler = handler();
    handler(&Publish::new(CAR_LOCATION_TOPIC, QoS::AtLeastOnce, "hello"));
}

#[tokio::test]
async fn test_subscribe_location_records_topic() {
    let link = FakeLink::new(true);
    subscribe_location(&link, CAR_LOCATION_TOPIC).await;
    assert_eq!(
        link.state.subscriptions.lock().unwrap().as_slice(),
        [CAR_LOCATION_TOPIC.to_string()]
    );
}

#[tokio::test]
async fn test_subscribe_failure_is_logged_not_fatal() {
    let link = FakeLink::failing();
    let state = link.state.clone();
    let shutdown = Shutdown::new();

    let handle = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move { run(link, &shutdown, fast_timing()).await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    shutdown.trigger();
    let outcome = handle.await.unwrap();

    assert_eq!(outcome, RunOutcome::Stopped);
    assert!(state.subscriptions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_run_subscribes_once_and_stops_on_shutdown() {
    let link = FakeLink::new(true);
    let state = link.state.clone();
    let shutdown = Shutdown::new();

    let handle = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move { run(link, &shutdown, fast_timing()).await })
    };

    tokio::time::sleep(Duration::from_millis(40)).await;
    shutdown.trigger();
    let outcome = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("loop should stop after shutdown")
        .unwrap();

    assert_eq!(outcome, RunOutcome::Stopped);
    assert_eq!(state.subscriptions.lock().unwrap().len(), 1);
    assert!(state.shut_down.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_run_gives_up_when_never_connected() {
    let link = FakeLink::new(false);
    let state = link.state.clone();

    let outcome = run(link, &Shutdown::new(), fast_timing()).await;

    assert_eq!(outcome, RunOutcome::NeverConnected);
    assert!(state.subscriptions.lock().unwrap().is_empty());
    assert!(state.shut_down.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_run_gives_up_when_reconnect_fails() {
    let link = FakeLink::new(true);
    let state = link.state.clone();

    let handle = tokio::spawn(async move { run(link, &Shutdown::new(), fast_timing()).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    state.connected.store(false, Ordering::SeqCst);

    let outcome = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("loop should give up on its own")
        .unwrap();

    assert_eq!(outcome, RunOutcome::ReconnectFailed);
    assert!(state.shut_down.load(Ordering::SeqCst));
}
