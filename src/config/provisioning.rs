/// EUI-64 identifier (JoinEUI, DevEUI)
pub type EUI64 = u64;
/// AES-128 root key (16 bytes)
pub type AESKey = [u8; 16];

/// LoRaWAN frequency band the device is provisioned for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// Europe 863-870 MHz
    EU868,
    /// North America 902-928 MHz
    US915,
}

impl Band {
    /// Band name as stored by credential backends
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::EU868 => "EU868",
            Band::US915 => "US915",
        }
    }
}

/// Join identifiers and root keys for OTAA activation.
///
/// Created once, persisted durably by the credential store, and immutable
/// afterwards unless the device is explicitly reprovisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProvisioningRecord {
    /// Frequency band
    pub band: Band,
    /// Sub-band index (0 where the band has no sub-bands)
    pub sub_band: u8,
    /// Join server EUI
    pub join_eui: EUI64,
    /// Device EUI
    pub dev_eui: EUI64,
    /// Application root key
    pub app_key: AESKey,
    /// Network root key
    pub nwk_key: AESKey,
}

impl ProvisioningRecord {
    /// Create a new provisioning record
    pub fn new(
        band: Band,
        sub_band: u8,
        join_eui: EUI64,
        dev_eui: EUI64,
        app_key: AESKey,
        nwk_key: AESKey,
    ) -> Self {
        Self {
            band,
            sub_band,
            join_eui,
            dev_eui,
            app_key,
            nwk_key,
        }
    }
}
