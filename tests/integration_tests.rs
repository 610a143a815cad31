use lorawan_uplink::{
    config::RetainedState,
    controller::{UplinkController, SEND_INTERVAL_MS},
};

use mock::{test_record, MockBackend, MockRadio, MockSleep, MockStore};

#[test]
fn test_unprovisioned_device_to_first_uplink() {
    let record = test_record();
    let mut store = MockStore::new();
    let mut backend = MockBackend::new(true);

    assert!(!store.provisioned);

    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        RetainedState::new(),
        0,
    )
    .unwrap();

    assert!(store.provisioned);
    assert!(node.joined());

    let report = node.poll(SEND_INTERVAL_MS).unwrap();
    assert_eq!(report.counter, 0);
    assert_eq!(node.session().uplinks[0].as_slice(), b"ABCD1234_0");
}

#[test]
fn test_session_counters_monotonic_across_sleep_cycles() {
    let record = test_record();
    let mut store = MockStore::new();
    let mut backend = MockBackend::new(true);
    let mut all_saves = Vec::new();

    // first boot: provision, join, three uplink cycles, then deep sleep
    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        RetainedState::new(),
        0,
    )
    .unwrap();
    for k in 1..=3 {
        node.poll(k * SEND_INTERVAL_MS).unwrap();
    }

    let mut sleeper = MockSleep::new();
    node.sleep(&mut sleeper, 300_000).unwrap();
    assert_eq!(sleeper.armed, Some(300_000));

    all_saves.extend(node.session().saves.iter().copied());
    let retained = node.retained();
    drop(node);

    // wake-up is a full restart: session restored from durable storage,
    // retained state from wake-surviving memory
    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        retained,
        0,
    )
    .unwrap();

    assert_eq!(node.tx_counter(), 3);
    for k in 1..=2 {
        node.poll(k * SEND_INTERVAL_MS).unwrap();
    }
    all_saves.extend(node.session().saves.iter().copied());

    // payload tagging continues where the previous boot left off
    assert_eq!(node.session().uplinks[0].as_slice(), b"ABCD1234_3");
    assert_eq!(node.tx_counter(), 5);

    // DevNonce as persisted never decreases over the whole history
    assert!(!all_saves.is_empty());
    for pair in all_saves.windows(2) {
        assert!(pair[1].dev_nonce >= pair[0].dev_nonce);
    }
}

#[test]
fn test_sleep_saves_session_first() {
    let record = test_record();
    let mut store = MockStore::new();
    let mut backend = MockBackend::new(true);
    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        RetainedState::new(),
        0,
    )
    .unwrap();

    let mut sleeper = MockSleep::new();
    node.sleep(&mut sleeper, 60_000).unwrap();

    assert_eq!(node.session().saves.len(), 1);
    assert_eq!(sleeper.armed, Some(60_000));
}

#[test]
fn test_sleep_proceeds_when_save_fails() {
    let record = test_record();
    let mut store = MockStore::new();
    let mut backend = MockBackend::new(true);
    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        RetainedState::new(),
        0,
    )
    .unwrap();
    node.session_mut().save_fail = true;

    let mut sleeper = MockSleep::new();
    node.sleep(&mut sleeper, 5_000).unwrap();

    // a failed save must not block the sleep
    assert_eq!(sleeper.armed, Some(5_000));
    assert!(node.session().saves.is_empty());
}

#[test]
fn test_power_loss_resets_retained_state() {
    let record = test_record();
    let mut store = MockStore::new();
    let mut backend = MockBackend::new(true);

    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        RetainedState::new(),
        0,
    )
    .unwrap();
    node.poll(SEND_INTERVAL_MS).unwrap();
    assert_eq!(node.tx_counter(), 1);
    drop(node);

    // full power cycle: retained memory is gone, durable state is not
    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        MockRadio,
        RetainedState::new(),
        0,
    )
    .unwrap();

    assert_eq!(node.tx_counter(), 0);
    assert!(store.provisioned);
    assert_eq!(node.session().uplinks.len(), 0);
}
