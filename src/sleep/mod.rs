//! Deep-sleep wake-timer control
//!
//! Deep sleep is a full-process suspension: execution resumes at system
//! initialization, not at the call site. Only memory the host explicitly
//! marks as retained (see [`RetainedState`]) survives; everything else is
//! restored from the credential store and session backend on the next
//! boot.
//!
//! [`RetainedState`]: crate::config::RetainedState

/// Hardware wake-timer and suspend control
pub trait SleepController {
    /// Error type for sleep operations
    type Error;

    /// Arm the wake timer for `duration_ms` and suspend the process.
    ///
    /// On hardware this does not return; the wake-up is a full restart.
    /// Host-side implementations used in tests return `Ok` instead so the
    /// caller can observe the armed duration.
    fn enter_deep_sleep(&mut self, duration_ms: u32) -> Result<(), Self::Error>;
}
