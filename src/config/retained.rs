/// Process-wide state with lifecycle: retained across timer-wakeup deep
/// sleep, reset on full power loss.
///
/// The host places this struct in wake-surviving memory (RTC RAM or
/// equivalent) and feeds it back into [`UplinkController::start`] after a
/// wake-up restart. Nothing security-relevant lives here; session keys and
/// counters go through the durable session store instead.
///
/// [`UplinkController::start`]: crate::controller::UplinkController::start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetainedState {
    /// Diagnostic uplink counter used to tag outgoing payloads.
    ///
    /// Advances exactly once per delivered uplink (including deliveries
    /// whose downlink carried an application error status), never on a
    /// failed send. Wraps on overflow.
    pub tx_counter: u32,
    /// Last observed join status. Purely a fast-path hint after wake-up;
    /// the controller re-derives it from the session on every start.
    pub joined: bool,
}

impl RetainedState {
    /// Fresh state, as after a full power cycle
    pub const fn new() -> Self {
        Self {
            tx_counter: 0,
            joined: false,
        }
    }
}
