//! MAC session management and persistence seam
//!
//! The session backend owns everything the link layer needs to survive a
//! reboot: the DevNonce counter, uplink/downlink frame counters and the
//! derived session keys. The uplink controller talks to it exclusively
//! through the synchronous [`SessionManager`] API and never caches session
//! state of its own.

use crate::radio::Radio;

/// Counters persisted by [`SessionManager::save_session`].
///
/// `dev_nonce` must be monotonically non-decreasing across all persisted
/// saves; a network server rejects join requests that replay an old nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionSnapshot {
    /// Join-request counter
    pub dev_nonce: u16,
    /// Uplink frame counter
    pub fcnt_up: u32,
    /// Downlink frame counter
    pub fcnt_down: u32,
}

/// Link-layer success variants of a combined send/receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// Uplink accepted; `downlink_len` bytes were written into the
    /// caller's downlink buffer (0 = no downlink)
    Delivered {
        /// Number of downlink bytes received
        downlink_len: usize,
    },
    /// Uplink accepted but the downlink carried an application-level
    /// error status; no downlink payload is interpreted further
    DeliveredWithStatus(u16),
}

/// Send failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError<E> {
    /// No active session; the backend may rejoin in the background
    NotJoined,
    /// Fair-use interval has not elapsed yet
    DutyCycle,
    /// Any other backend failure
    Other(E),
}

/// A joined (or joining) MAC session
pub trait SessionManager {
    /// Error type for session operations
    type Error;

    /// Whether the session holds a completed activation
    fn is_activated(&self) -> bool;

    /// Configure duty-cycle enforcement with a minimum guard interval
    fn set_duty_cycle(&mut self, enabled: bool, guard_interval_ms: u32);

    /// Blocking combined uplink-then-downlink transaction on `port`.
    ///
    /// Received downlink bytes are written into `downlink` in place. The
    /// call is bounded by the backend's own radio timeout; it either
    /// completes or times out, there is no cancellation.
    fn send_receive(
        &mut self,
        uplink: &[u8],
        port: u8,
        downlink: &mut [u8],
    ) -> Result<SendOutcome, SendError<Self::Error>>;

    /// Milliseconds until the duty cycle next allows an uplink
    fn time_until_uplink(&self) -> u32;

    /// Durably persist DevNonce and frame counters.
    ///
    /// Returns the snapshot that was written. Callers treat a failure as
    /// a warning: the device keeps running, at the risk of DevNonce
    /// desynchronization after the next restart.
    fn save_session(&mut self) -> Result<SessionSnapshot, Self::Error>;
}

/// Factory restoring (or joining) a session from stored credentials
pub trait SessionBackend<R: Radio> {
    /// Session type produced by this backend
    type Session: SessionManager;
    /// Error type for session construction
    type Error;

    /// Construct or restore the session for the stored credentials,
    /// taking ownership of the radio. With `auto_join` set, attempts a
    /// join when no valid session exists.
    fn manage(&mut self, radio: R, auto_join: bool) -> Result<Self::Session, Self::Error>;
}
