use core::ffi::CStr;

use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::{self, esp, EspError};

use reset_key::{PartitionRegion, ResetPlatform};

use crate::config::{ACCOUNT_NVS_NAMESPACE, WIFI_NVS_NAMESPACE};

/// Entry of the flash partition table.
pub struct FlashPartition(&'static sys::esp_partition_t);

impl FlashPartition {
    pub fn label(&self) -> &str {
        unsafe { CStr::from_ptr(self.0.label.as_ptr()) }
            .to_str()
            .unwrap_or("?")
    }
}

impl PartitionRegion for FlashPartition {
    fn size(&self) -> u32 {
        self.0.size
    }
}

/// Factory reset backed by NVS, the partition API and `esp_restart`.
pub struct EspResetPlatform {
    // Keeps the default NVS partition initialised while we erase namespaces.
    _nvs: EspDefaultNvsPartition,
}

impl EspResetPlatform {
    pub fn new(nvs: EspDefaultNvsPartition) -> Self {
        Self { _nvs: nvs }
    }
}

fn erase_namespace(namespace: &CStr) -> Result<(), EspError> {
    let mut handle: sys::nvs_handle_t = 0;
    unsafe {
        esp!(sys::nvs_open(
            namespace.as_ptr(),
            sys::nvs_open_mode_t_NVS_READWRITE,
            &mut handle,
        ))?;
        let result = esp!(sys::nvs_erase_all(handle)).and_then(|()| esp!(sys::nvs_commit(handle)));
        sys::nvs_close(handle);
        result
    }
}

impl ResetPlatform for EspResetPlatform {
    type Error = EspError;
    type Partition = FlashPartition;

    fn erase_wifi_config(&mut self) -> Result<(), EspError> {
        erase_namespace(WIFI_NVS_NAMESPACE)
    }

    fn find_ota_data_partition(&mut self) -> Option<FlashPartition> {
        let partition = unsafe {
            sys::esp_partition_find_first(
                sys::esp_partition_type_t_ESP_PARTITION_TYPE_DATA,
                sys::esp_partition_subtype_t_ESP_PARTITION_SUBTYPE_DATA_OTA,
                core::ptr::null(),
            )
            .as_ref()
        }
        .map(FlashPartition);

        if let Some(found) = &partition {
            log::info!(
                "reset: found partition '{}' at {:#x}",
                found.label(),
                found.0.address
            );
        }
        partition
    }

    fn erase_partition(
        &mut self,
        partition: &FlashPartition,
        offset: u32,
        len: u32,
    ) -> Result<(), EspError> {
        esp!(unsafe { sys::esp_partition_erase_range(partition.0, offset as usize, len as usize) })
    }

    fn reset_account_binding(&mut self) -> Result<(), EspError> {
        erase_namespace(ACCOUNT_NVS_NAMESPACE)
    }

    fn restart(&mut self) {
        unsafe { sys::esp_restart() }
    }
}
