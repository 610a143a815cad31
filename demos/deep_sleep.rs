//! Deep-sleep cycle walkthrough.
//!
//! Simulates a battery-powered node that wakes, sends one uplink, saves
//! its session and goes back to sleep. Each wake-up is a full restart:
//! only the retained state crosses the sleep, everything else is restored
//! from the (simulated) durable stores.
//!
//! Run with: cargo run --example deep_sleep --features std

use lorawan_uplink::{
    config::{Band, ProvisioningRecord, RetainedState},
    controller::{UplinkController, SEND_INTERVAL_MS},
    radio::Radio,
    session::{SendError, SendOutcome, SessionBackend, SessionManager, SessionSnapshot},
    sleep::SleepController,
    store::CredentialStore,
};

const SLEEP_MS: u32 = 300_000;

struct SimRadio;

impl Radio for SimRadio {
    type Error = ();

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transmit(&mut self, _buffer: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn receive(&mut self, _buffer: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Default)]
struct SimStore {
    record: Option<ProvisioningRecord>,
}

impl CredentialStore for SimStore {
    type Error = ();

    fn is_provisioned(&self) -> bool {
        self.record.is_some()
    }

    fn provision(&mut self, record: &ProvisioningRecord) -> Result<(), Self::Error> {
        self.record = Some(record.clone());
        Ok(())
    }
}

struct SimSession {
    dev_nonce: u16,
    fcnt_up: u32,
}

impl SessionManager for SimSession {
    type Error = ();

    fn is_activated(&self) -> bool {
        true
    }

    fn set_duty_cycle(&mut self, _enabled: bool, _guard_interval_ms: u32) {}

    fn send_receive(
        &mut self,
        uplink: &[u8],
        _port: u8,
        _downlink: &mut [u8],
    ) -> Result<SendOutcome, SendError<Self::Error>> {
        println!("[session] uplink: {}", String::from_utf8_lossy(uplink));
        self.fcnt_up += 1;
        Ok(SendOutcome::Delivered { downlink_len: 0 })
    }

    fn time_until_uplink(&self) -> u32 {
        0
    }

    fn save_session(&mut self) -> Result<SessionSnapshot, Self::Error> {
        Ok(SessionSnapshot {
            dev_nonce: self.dev_nonce,
            fcnt_up: self.fcnt_up,
            fcnt_down: 0,
        })
    }
}

/// Stands in for the session-persistence library: the join counter and
/// frame counters live in (simulated) flash, not in retained RAM.
struct SimBackend {
    dev_nonce: u16,
    fcnt_up: u32,
}

impl SessionBackend<SimRadio> for SimBackend {
    type Session = SimSession;
    type Error = ();

    fn manage(&mut self, _radio: SimRadio, _auto_join: bool) -> Result<SimSession, Self::Error> {
        Ok(SimSession {
            dev_nonce: self.dev_nonce,
            fcnt_up: self.fcnt_up,
        })
    }
}

struct SimSleep;

impl SleepController for SimSleep {
    type Error = ();

    fn enter_deep_sleep(&mut self, duration_ms: u32) -> Result<(), Self::Error> {
        println!("[sleep] timer armed for {} ms, suspending", duration_ms);
        Ok(())
    }
}

fn main() {
    let record = ProvisioningRecord::new(
        Band::EU868,
        0,
        0x0000_0000_0000_0000,
        0x70B3_D57E_D006_6298,
        [0x4E; 16],
        [0x83; 16],
    );

    let mut store = SimStore::default();
    let mut backend = SimBackend {
        dev_nonce: 1,
        fcnt_up: 0,
    };
    let mut sleeper = SimSleep;

    // survives the simulated deep sleeps below
    let mut retained = RetainedState::new();

    for boot in 0..3 {
        println!("--- boot {} (tx_counter={}) ---", boot, retained.tx_counter);

        let mut node =
            UplinkController::start(&mut store, &record, &mut backend, SimRadio, retained, 0)
                .expect("startup failed");

        let report = node.poll(SEND_INTERVAL_MS).expect("send cycle due");
        if let Some(snapshot) = report.saved {
            // mirror what the persistence layer wrote back to flash
            backend.fcnt_up = snapshot.fcnt_up;
        }

        node.sleep(&mut sleeper, SLEEP_MS).expect("sleep failed");
        retained = node.retained();
    }

    println!("--- done, next payload would be tagged {}", retained.tx_counter);
}
