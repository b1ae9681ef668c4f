//! Factory reset sequence
//!
//! Runs when the application receives [`AppEvent::FactoryReset`](crate::AppEvent).
//! The steps run in a fixed order and each one is fatal on error:
//!
//! 1. Erase the persisted Wi-Fi configuration
//! 2. Look up the OTA data partition (absence is fatal)
//! 3. Erase the whole partition
//! 4. Erase the persisted account binding
//! 5. Restart
//!
//! A failure stops the sequence where it happened. Steps that already ran are
//! not rolled back and the device is not restarted.

use core::fmt::Debug;

use crate::error::Error;

/// A flash partition that can be erased as a whole
pub trait PartitionRegion {
    /// Size of the partition in bytes
    fn size(&self) -> u32;
}

/// Platform services used by [`factory_reset`]
pub trait ResetPlatform {
    /// Error type reported by the storage calls
    type Error: Debug;

    /// Handle to a located partition
    type Partition: PartitionRegion;

    /// Erase persisted Wi-Fi credentials
    fn erase_wifi_config(&mut self) -> Result<(), Self::Error>;

    /// Locate the OTA data partition by type and subtype
    fn find_ota_data_partition(&mut self) -> Option<Self::Partition>;

    /// Erase `len` bytes of `partition` starting at `offset`
    fn erase_partition(
        &mut self,
        partition: &Self::Partition,
        offset: u32,
        len: u32,
    ) -> Result<(), Self::Error>;

    /// Erase persisted account-binding state
    fn reset_account_binding(&mut self) -> Result<(), Self::Error>;

    /// Restart the device
    ///
    /// Does not return on hardware.
    fn restart(&mut self);
}

/// Wipe persisted state and restart.
///
/// # Errors
///
/// Returns the error of the first failing step. The restart is skipped.
pub fn factory_reset<P: ResetPlatform>(platform: &mut P) -> Result<(), Error<P::Error>> {
    log::info!("*********************************");
    log::info!("*          FACTORY RESET        *");
    log::info!("*********************************");

    log::info!("reset: clear wifi config");
    platform
        .erase_wifi_config()
        .map_err(Error::WifiConfigErase)?;

    let partition = platform
        .find_ota_data_partition()
        .ok_or(Error::PartitionNotFound)?;
    log::info!("reset: erase ota data ({} bytes)", partition.size());
    platform
        .erase_partition(&partition, 0, partition.size())
        .map_err(Error::PartitionErase)?;

    log::info!("reset: clear account binding");
    platform
        .reset_account_binding()
        .map_err(Error::AccountReset)?;

    log::info!("reset: the system is about to be restarted");
    platform.restart();
    Ok(())
}
