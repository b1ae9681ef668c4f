//! Board constants for the reset key firmware.

use core::ffi::CStr;

// Key wiring: the ESP32-C3 BOOT button on GPIO9, active LOW with the
// internal pull-up. The pin itself is taken in `main.rs`.

/// Edges buffered between the key ISR and the scan task.
pub const EDGE_QUEUE_CAPACITY: usize = reset_key::DEFAULT_EDGE_QUEUE_CAPACITY;

/// Presses held longer than this are medium (µs).
pub const MEDIUM_PRESS_US: u64 = reset_key::DEFAULT_MEDIUM_PRESS_US;

/// Presses held longer than this are long and trigger a factory reset (µs).
pub const LONG_PRESS_US: u64 = reset_key::DEFAULT_LONG_PRESS_US;

/// FreeRTOS task name of the key scanner (NUL-terminated).
pub const KEY_TASK_NAME: &[u8] = b"key_scan\0";
pub const KEY_TASK_STACK_BYTES: usize = 4 * 1024;
/// Low priority: the scanner only wakes on key edges.
pub const KEY_TASK_PRIORITY: u8 = 2;

/// NVS namespace the Wi-Fi driver persists its station/AP config in.
pub const WIFI_NVS_NAMESPACE: &CStr = c"nvs.net80211";

/// NVS namespace holding the cloud account binding.
pub const ACCOUNT_NVS_NAMESPACE: &CStr = c"account";
