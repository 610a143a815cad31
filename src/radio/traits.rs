/// Interface a session engine drives on the underlying radio.
///
/// Register-level control, modulation setup and channel selection belong to
/// the driver behind this trait. The uplink controller never calls these
/// methods itself; it only passes the handle through to the session backend
/// that owns the radio for the lifetime of the session.
pub trait Radio {
    /// Error type for radio operations
    type Error;

    /// Initialize the radio
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Transmit a raw frame
    fn transmit(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

    /// Receive data into the provided buffer
    /// Returns the number of bytes received
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;

    /// Put the radio into standby mode
    fn standby(&mut self) -> Result<(), Self::Error>;

    /// Put the radio into sleep mode
    fn sleep(&mut self) -> Result<(), Self::Error>;
}
