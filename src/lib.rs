//! Uplink cycle control for LoRaWAN nodes with persisted sessions
//!
//! This crate drives the provision → join → periodic-send → persist → sleep
//! lifecycle of a LoRaWAN end device. The MAC/session engine, the radio
//! driver and the deep-sleep hardware are consumed through narrow traits;
//! the crate owns the cycle policy: when to transmit, how to classify send
//! failures, and what must be persisted so DevNonce and frame counters
//! survive reboots and deep-sleep cycles.
//!
//! # Features
//! - Fixed-interval uplink scheduling with implicit backoff (failures are
//!   never retried faster than the send interval)
//! - Counter-tagged payloads in a bounded buffer with a defined
//!   truncation policy
//! - Session persistence after every send attempt, keeping the DevNonce
//!   counter monotonic across restarts
//! - Duty-cycle configuration and reporting for fair-use compliance
//! - Deep-sleep entry that saves session state best-effort first
//! - No unsafe code, no allocator
//!
//! # Example
//! ```no_run
//! use lorawan_uplink::{
//!     config::{Band, ProvisioningRecord, RetainedState},
//!     controller::{StartError, UplinkController},
//!     radio::Radio,
//!     session::{SendError, SendOutcome, SessionBackend, SessionManager, SessionSnapshot},
//!     store::CredentialStore,
//! };
//! # struct NoRadio;
//! # impl Radio for NoRadio {
//! #     type Error = ();
//! #     fn init(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn transmit(&mut self, _: &[u8]) -> Result<(), ()> { Ok(()) }
//! #     fn receive(&mut self, _: &mut [u8]) -> Result<usize, ()> { Ok(0) }
//! #     fn standby(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn sleep(&mut self) -> Result<(), ()> { Ok(()) }
//! # }
//! # struct Store(bool);
//! # impl CredentialStore for Store {
//! #     type Error = ();
//! #     fn is_provisioned(&self) -> bool { self.0 }
//! #     fn provision(&mut self, _: &ProvisioningRecord) -> Result<(), ()> {
//! #         self.0 = true;
//! #         Ok(())
//! #     }
//! # }
//! # struct Session;
//! # impl SessionManager for Session {
//! #     type Error = ();
//! #     fn is_activated(&self) -> bool { true }
//! #     fn set_duty_cycle(&mut self, _: bool, _: u32) {}
//! #     fn send_receive(
//! #         &mut self,
//! #         _: &[u8],
//! #         _: u8,
//! #         _: &mut [u8],
//! #     ) -> Result<SendOutcome, SendError<()>> {
//! #         Ok(SendOutcome::Delivered { downlink_len: 0 })
//! #     }
//! #     fn time_until_uplink(&self) -> u32 { 0 }
//! #     fn save_session(&mut self) -> Result<SessionSnapshot, ()> {
//! #         Ok(SessionSnapshot { dev_nonce: 1, fcnt_up: 1, fcnt_down: 0 })
//! #     }
//! # }
//! # struct Backend;
//! # impl SessionBackend<NoRadio> for Backend {
//! #     type Session = Session;
//! #     type Error = ();
//! #     fn manage(&mut self, _: NoRadio, _: bool) -> Result<Session, ()> { Ok(Session) }
//! # }
//! // Credentials from the network console
//! let record = ProvisioningRecord::new(
//!     Band::EU868,
//!     0,
//!     0x0000_0000_0000_0000,      // JoinEUI
//!     0x70B3_D57E_D006_6298,      // DevEUI
//!     [0x4E; 16],                 // AppKey
//!     [0x83; 16],                 // NwkKey
//! );
//!
//! # let mut store = Store(false);
//! # let mut backend = Backend;
//! let mut node = UplinkController::start(
//!     &mut store,
//!     &record,
//!     &mut backend,
//!     NoRadio,
//!     RetainedState::new(),
//!     0,
//! )?;
//!
//! // Host polling loop, ~100 ms granularity
//! let mut now_ms = 0u32;
//! loop {
//!     if let Some(report) = node.poll(now_ms) {
//!         // inspect report.outcome, report.duty_wait_ms, ...
//!     }
//!     now_ms += 100;
//! #   break;
//! }
//! # Ok::<(), StartError<(), ()>>(())
//! ```

#![warn(missing_docs)]
#![no_std]

#[macro_use]
mod fmt;

/// Device provisioning and retained state
pub mod config;

/// Uplink cycle controller
pub mod controller;

/// Radio hardware abstraction
pub mod radio;

/// MAC session management and persistence seam
pub mod session;

/// Deep-sleep wake-timer control
pub mod sleep;

/// Durable credential storage
pub mod store;
