use std::thread::JoinHandle;

use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;
use esp_idf_svc::sys;

use crate::config::{KEY_TASK_NAME, KEY_TASK_PRIORITY, KEY_TASK_STACK_BYTES};

/// Log heap usage statistics and current task stack headroom.
pub fn log_heap(label: &str) {
    let free_heap = unsafe { sys::esp_get_free_heap_size() };
    let min_free = unsafe { sys::esp_get_minimum_free_heap_size() };
    let stack_hwm_words = unsafe { sys::uxTaskGetStackHighWaterMark(core::ptr::null_mut()) };
    let stack_hwm_bytes = (stack_hwm_words as usize) * core::mem::size_of::<sys::StackType_t>();
    log::info!(
        "[MEM] {}: free={} min_free={} stack_hwm={}B",
        label,
        free_heap,
        min_free,
        stack_hwm_bytes
    );
}

/// Spawn the key scan task as a named low-priority FreeRTOS thread.
///
/// The pthread defaults are restored afterwards so later `std::thread`
/// spawns are unaffected.
pub fn spawn_key_task<F>(task: F) -> Result<JoinHandle<()>, anyhow::Error>
where
    F: FnOnce() + Send + 'static,
{
    let mut config = ThreadSpawnConfiguration::default();
    config.name = Some(KEY_TASK_NAME);
    config.stack_size = KEY_TASK_STACK_BYTES;
    config.priority = KEY_TASK_PRIORITY;
    config.inherit = false;
    config.set()?;

    let spawned = std::thread::Builder::new()
        .stack_size(KEY_TASK_STACK_BYTES)
        .spawn(task);

    if let Err(err) = ThreadSpawnConfiguration::default().set() {
        log::warn!("Failed to restore pthread defaults: {}", err);
    }

    let handle = spawned?;
    log::info!(
        "Spawned key task: stack_size={} priority={}",
        KEY_TASK_STACK_BYTES,
        KEY_TASK_PRIORITY
    );
    Ok(handle)
}
