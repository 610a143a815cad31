//! Durable credential storage
//!
//! The credential store owns the provisioning record: join identifiers and
//! root keys written once and read back by the session backend on every
//! boot. Implementations persist to NVS/EEPROM/flash; durability on
//! successful [`provision`] is part of the contract.
//!
//! [`provision`]: CredentialStore::provision

use crate::config::ProvisioningRecord;

/// Persistent store for device provisioning data
pub trait CredentialStore {
    /// Error type for store operations
    type Error;

    /// Whether a provisioning record is already present
    fn is_provisioned(&self) -> bool;

    /// Write the provisioning record.
    ///
    /// Must be durable before returning `Ok`; a rejected record is fatal
    /// to startup.
    fn provision(&mut self, record: &ProvisioningRecord) -> Result<(), Self::Error>;
}
