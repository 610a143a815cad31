//! Uplink cycle controller
//!
//! Drives the provision → join → periodic-send → persist lifecycle. The
//! controller runs inside the host's polling loop and is non-blocking
//! except for the send cycle itself, which blocks for the duration of the
//! radio transaction (bounded by the session backend's own timeout).

use heapless::Vec;

use crate::config::{ProvisioningRecord, RetainedState};
use crate::radio::Radio;
use crate::session::{SendError, SendOutcome, SessionBackend, SessionManager, SessionSnapshot};
use crate::sleep::SleepController;
use crate::store::CredentialStore;

pub mod payload;

pub use payload::{MAX_PAYLOAD_SIZE, PAYLOAD_TAG};

/// Fixed interval between uplink attempts
pub const SEND_INTERVAL_MS: u32 = 60_000;

/// Minimum guard interval between uplinks, for fair-use compliance
pub const DUTY_CYCLE_GUARD_MS: u32 = 1_250;

/// Application port uplinks are sent on
pub const UPLINK_PORT: u8 = 1;

/// Capacity of the downlink receive buffer
pub const MAX_DOWNLINK_SIZE: usize = 256;

/// Fatal startup error; the controller is never constructed
#[derive(Debug)]
pub enum StartError<CE, BE> {
    /// The credential store rejected the provisioning record
    Provisioning(CE),
    /// The session backend could not construct or restore a session
    Session(BE),
}

/// Send failure kind, with the backend error stripped for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureKind {
    /// No active session; the controller idles until the backend
    /// re-activates
    NotJoined,
    /// Fair-use interval had not elapsed; cycle dropped
    DutyCycle,
    /// Any other backend failure; logged only
    Other,
}

/// What a single send cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Uplink delivered cleanly; `downlink` holds any received bytes
    /// (empty = no downlink)
    Delivered {
        /// Downlink payload, if one was received
        downlink: Vec<u8, MAX_DOWNLINK_SIZE>,
    },
    /// Uplink delivered; the downlink carried an application error status
    DeliveredWithStatus(u16),
    /// Uplink failed; the transmit counter did not advance
    Failed(FailureKind),
}

/// Report of one send cycle, for operator visibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Counter value the payload was tagged with
    pub counter: u32,
    /// Cycle outcome
    pub outcome: CycleOutcome,
    /// Counters persisted after the cycle; `None` if the save failed
    pub saved: Option<SessionSnapshot>,
    /// Milliseconds until the duty cycle next allows an uplink.
    /// Informational only, no control effect.
    pub duty_wait_ms: u32,
}

/// Periodic uplink state machine over a managed session.
///
/// Construct with [`UplinkController::start`], then call
/// [`poll`](UplinkController::poll) on every host loop iteration.
pub struct UplinkController<S: SessionManager> {
    session: S,
    state: RetainedState,
    last_send_ms: u32,
    interval_ms: u32,
}

impl<S: SessionManager> UplinkController<S> {
    /// Run the one-time startup sequence: provision the credential store
    /// if needed, construct/restore the session (joining if necessary),
    /// and configure the duty cycle on an activated session.
    ///
    /// `retained` is the state recovered from wake-surviving memory, or
    /// [`RetainedState::new`] after a full power cycle. `now_ms` becomes
    /// the initial last-send timestamp, so the first uplink happens one
    /// full interval after startup.
    pub fn start<C, B, R>(
        store: &mut C,
        record: &ProvisioningRecord,
        backend: &mut B,
        radio: R,
        retained: RetainedState,
        now_ms: u32,
    ) -> Result<Self, StartError<C::Error, B::Error>>
    where
        C: CredentialStore,
        R: Radio,
        B: SessionBackend<R, Session = S>,
    {
        if !store.is_provisioned() {
            info!("device not provisioned, storing credentials");
            store.provision(record).map_err(StartError::Provisioning)?;
            info!("device provisioned");
        } else {
            debug!("device already provisioned");
        }

        let mut session = backend.manage(radio, true).map_err(StartError::Session)?;

        let mut state = retained;
        state.joined = session.is_activated();
        if state.joined {
            session.set_duty_cycle(true, DUTY_CYCLE_GUARD_MS);
            info!(
                "network joined, dev_eui={:x} band={}",
                record.dev_eui,
                record.band.as_str()
            );
        } else {
            warn!("network not joined, waiting for background rejoin");
        }

        Ok(Self {
            session,
            state,
            last_send_ms: now_ms,
            interval_ms: SEND_INTERVAL_MS,
        })
    }

    /// Periodic check, called on every host loop iteration.
    ///
    /// Runs at most one send cycle per call, and only when the session is
    /// joined and a full interval has elapsed since the previous attempt.
    /// The last-send timestamp is reset whether the cycle succeeded or
    /// failed, so a failure is never retried faster than the interval.
    ///
    /// While not joined the controller idles, re-checking the session's
    /// activation each call; the backend performs any rejoin on its own.
    pub fn poll(&mut self, now_ms: u32) -> Option<CycleReport> {
        if !self.state.joined {
            if !self.session.is_activated() {
                return None;
            }
            info!("session activated, resuming uplinks");
            self.session.set_duty_cycle(true, DUTY_CYCLE_GUARD_MS);
            self.state.joined = true;
        }

        // Wrapping arithmetic keeps the schedule sound across timer
        // rollover.
        if now_ms.wrapping_sub(self.last_send_ms) < self.interval_ms {
            return None;
        }

        let report = self.send_cycle();
        self.last_send_ms = now_ms;
        Some(report)
    }

    /// One blocking send cycle: build the tagged payload, run the combined
    /// send/receive, classify the result, persist the session.
    fn send_cycle(&mut self) -> CycleReport {
        let counter = self.state.tx_counter;
        let uplink = payload::build(counter);
        info!("sending uplink, counter={}", counter);

        let mut downlink = [0u8; MAX_DOWNLINK_SIZE];
        let outcome = match self
            .session
            .send_receive(&uplink, UPLINK_PORT, &mut downlink)
        {
            Ok(SendOutcome::Delivered { downlink_len }) => {
                self.state.tx_counter = counter.wrapping_add(1);
                let len = downlink_len.min(MAX_DOWNLINK_SIZE);
                let mut bytes = Vec::new();
                // len is clamped to capacity, the copy cannot fail
                bytes.extend_from_slice(&downlink[..len]).ok();
                if bytes.is_empty() {
                    info!("uplink delivered, no downlink");
                } else {
                    info!("uplink delivered, downlink of {} bytes", bytes.len());
                }
                CycleOutcome::Delivered { downlink: bytes }
            }
            Ok(SendOutcome::DeliveredWithStatus(code)) => {
                self.state.tx_counter = counter.wrapping_add(1);
                info!("uplink delivered, downlink carried status {}", code);
                CycleOutcome::DeliveredWithStatus(code)
            }
            Err(SendError::NotJoined) => {
                warn!("network not joined, idling until the session re-activates");
                self.state.joined = false;
                CycleOutcome::Failed(FailureKind::NotJoined)
            }
            Err(SendError::DutyCycle) => {
                warn!("duty-cycle window not open yet, dropping this cycle");
                CycleOutcome::Failed(FailureKind::DutyCycle)
            }
            Err(SendError::Other(_)) => {
                error!("uplink failed");
                CycleOutcome::Failed(FailureKind::Other)
            }
        };

        // Persist DevNonce/frame-counter advancement after every attempt.
        // A failed save risks DevNonce desynchronization on the next
        // restart but must not halt the device.
        let saved = match self.session.save_session() {
            Ok(snapshot) => {
                debug!(
                    "session saved, dev_nonce={} fcnt_up={}",
                    snapshot.dev_nonce, snapshot.fcnt_up
                );
                Some(snapshot)
            }
            Err(_) => {
                warn!("failed to save session state");
                None
            }
        };

        let duty_wait_ms = self.session.time_until_uplink();
        if duty_wait_ms > 0 {
            debug!("duty cycle: next uplink allowed in {} ms", duty_wait_ms);
        }

        CycleReport {
            counter,
            outcome,
            saved,
            duty_wait_ms,
        }
    }

    /// Save the session best-effort, then arm the wake timer and suspend.
    ///
    /// A failed save is logged and does not block sleep. Stash
    /// [`retained`](UplinkController::retained) in wake-surviving memory
    /// before calling this; on hardware the call does not return and the
    /// wake-up restarts through [`start`](UplinkController::start).
    pub fn sleep<W: SleepController>(
        &mut self,
        sleeper: &mut W,
        duration_ms: u32,
    ) -> Result<(), W::Error> {
        if self.session.save_session().is_err() {
            warn!("failed to save session before sleep");
        }
        info!("entering deep sleep for {} ms", duration_ms);
        sleeper.enter_deep_sleep(duration_ms)
    }

    /// Whether the controller currently considers the session joined
    pub fn joined(&self) -> bool {
        self.state.joined
    }

    /// Current transmit counter
    pub fn tx_counter(&self) -> u32 {
        self.state.tx_counter
    }

    /// Copy of the retained state, for stashing before deep sleep
    pub fn retained(&self) -> RetainedState {
        self.state
    }

    /// Borrow the managed session
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Mutably borrow the managed session
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }
}
