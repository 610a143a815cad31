//! Periodic uplink walkthrough against simulated collaborators.
//!
//! Drives the controller through a few minutes of simulated host-loop
//! time: provisioning, join, one uplink per minute with an occasional
//! downlink, and the session save after every attempt.
//!
//! Run with: cargo run --example periodic_uplink --features std

use lorawan_uplink::{
    config::{Band, ProvisioningRecord, RetainedState},
    controller::{CycleOutcome, UplinkController, SEND_INTERVAL_MS},
    radio::Radio,
    session::{SendError, SendOutcome, SessionBackend, SessionManager, SessionSnapshot},
    store::CredentialStore,
};

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
        println!("[store] provisioning dev_eui={:016X}", record.dev_eui);
        self.record = Some(record.clone());
        Ok(())
    }
}

struct SimSession {
    dev_nonce: u16,
    fcnt_up: u32,
    sends: u32,
}

impl SessionManager for SimSession {
    type Error = ();

    fn is_activated(&self) -> bool {
        true
    }

    fn set_duty_cycle(&mut self, enabled: bool, guard_interval_ms: u32) {
        println!(
            "[session] duty cycle enabled={} guard={}ms",
            enabled, guard_interval_ms
        );
    }

    fn send_receive(
        &mut self,
        uplink: &[u8],
        port: u8,
        downlink: &mut [u8],
    ) -> Result<SendOutcome, SendError<Self::Error>> {
        println!(
            "[session] uplink on port {}: {}",
            port,
            String::from_utf8_lossy(uplink)
        );
        self.fcnt_up += 1;
        self.sends += 1;

        // the network answers every third uplink
        if self.sends % 3 == 0 {
            downlink[0] = 0x01;
            downlink[1] = 0x2C;
            Ok(SendOutcome::Delivered { downlink_len: 2 })
        } else {
            Ok(SendOutcome::Delivered { downlink_len: 0 })
        }
    }

    fn time_until_uplink(&self) -> u32 {
        1_250
    }

    fn save_session(&mut self) -> Result<SessionSnapshot, Self::Error> {
        Ok(SessionSnapshot {
            dev_nonce: self.dev_nonce,
            fcnt_up: self.fcnt_up,
            fcnt_down: 0,
        })
    }
}

struct SimBackend {
    dev_nonce: u16,
}

impl SessionBackend<SimRadio> for SimBackend {
    type Session = SimSession;
    type Error = ();

    fn manage(&mut self, _radio: SimRadio, auto_join: bool) -> Result<SimSession, Self::Error> {
        if auto_join {
            self.dev_nonce += 1;
            println!("[backend] joined, dev_nonce={}", self.dev_nonce);
        }
        Ok(SimSession {
            dev_nonce: self.dev_nonce,
            fcnt_up: 0,
            sends: 0,
        })
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
    let mut backend = SimBackend { dev_nonce: 0 };

    let mut node = UplinkController::start(
        &mut store,
        &record,
        &mut backend,
        SimRadio,
        RetainedState::new(),
        0,
    )
    .expect("startup failed");

    // five minutes of host loop, 100 ms per iteration
    let mut now_ms = 0u32;
    while now_ms <= 5 * SEND_INTERVAL_MS {
        if let Some(report) = node.poll(now_ms) {
            match report.outcome {
                CycleOutcome::Delivered { downlink } if downlink.is_empty() => {
                    println!("[node] #{} delivered, no downlink", report.counter)
                }
                CycleOutcome::Delivered { downlink } => {
                    println!(
                        "[node] #{} delivered, downlink {:02X?}",
                        report.counter,
                        downlink.as_slice()
                    )
                }
                CycleOutcome::DeliveredWithStatus(code) => {
                    println!("[node] #{} delivered, status {:#06X}", report.counter, code)
                }
                CycleOutcome::Failed(kind) => {
                    println!("[node] #{} failed: {:?}", report.counter, kind)
                }
            }
            if let Some(snapshot) = report.saved {
                println!(
                    "[node] session saved (dev_nonce={} fcnt_up={})",
                    snapshot.dev_nonce, snapshot.fcnt_up
                );
            }
            println!("[node] next uplink allowed in {} ms", report.duty_wait_ms);
        }
        now_ms += 100;
    }
}
