use core::ffi::c_void;
use core::time::Duration;
use std::sync::Arc;

use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::task::queue::Queue;
use esp_idf_svc::sys::{self, esp, EspError};

use reset_key::{Clock, Edge, EdgeSource};

/// Bounded FIFO of key edges, filled from the GPIO ISR.
pub struct EdgeQueue {
    queue: Queue<u32>,
}

impl EdgeQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Queue::new(capacity),
        }
    }

    /// Push an edge without blocking. Returns `false` if the queue was full
    /// and the edge was dropped.
    ///
    /// Safe to call from interrupt context: the queue switches to the
    /// `FromISR` primitives there.
    pub fn push(&self, pin: u32) -> bool {
        match self.queue.send_back(pin, 0) {
            Ok(higher_prio_woken) => {
                if higher_prio_woken {
                    esp_idf_svc::hal::task::do_yield();
                }
                true
            }
            Err(_) => false,
        }
    }

    pub fn recv(&self, timeout: Option<Duration>) -> Option<u32> {
        let ticks = timeout.map_or(BLOCK, duration_to_ticks);
        self.queue.recv_front(ticks).map(|(pin, _)| pin)
    }
}

fn duration_to_ticks(timeout: Duration) -> sys::TickType_t {
    let rate = sys::configTICK_RATE_HZ as u64;
    let ms = timeout.as_millis().min(u64::MAX as u128) as u64;
    let ticks = ms.saturating_mul(rate).saturating_add(999) / 1000;
    ticks.clamp(1, (BLOCK - 1) as u64) as sys::TickType_t
}

/// Scan-task side of the [`EdgeQueue`].
pub struct EdgeReceiver {
    queue: Arc<EdgeQueue>,
}

impl EdgeReceiver {
    pub fn new(queue: Arc<EdgeQueue>) -> Self {
        Self { queue }
    }
}

/// `xQueueReceive` returned without an edge: the timeout elapsed or the
/// queue failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecvFailed;

impl EdgeSource for EdgeReceiver {
    type Error = RecvFailed;

    fn recv(&mut self, timeout: Option<Duration>) -> Result<Edge, RecvFailed> {
        self.queue.recv(timeout).map(Edge::new).ok_or(RecvFailed)
    }
}

struct IsrContext {
    pin: u32,
    queue: Arc<EdgeQueue>,
}

/// GPIO ISR hook pushing every edge on the key pin into an [`EdgeQueue`].
///
/// The handler is removed when this value is dropped.
pub struct KeyInterrupt {
    pin: i32,
    // Read from the ISR through a raw pointer; must stay boxed and alive.
    _context: Box<IsrContext>,
}

impl KeyInterrupt {
    /// Install the shared GPIO ISR service (if needed) and hook `pin`.
    ///
    /// The pin must already be an input with its interrupt type set.
    pub fn register(pin: i32, queue: Arc<EdgeQueue>) -> Result<Self, EspError> {
        let context = Box::new(IsrContext {
            pin: pin as u32,
            queue,
        });
        let arg = &*context as *const IsrContext as *mut c_void;

        unsafe {
            let err = sys::gpio_install_isr_service(0);
            // Already installed by another driver
            if err != sys::ESP_ERR_INVALID_STATE as i32 {
                esp!(err)?;
            }
            esp!(sys::gpio_isr_handler_add(pin, Some(key_isr), arg))?;
            esp!(sys::gpio_intr_enable(pin))?;
        }

        log::info!("key: isr hooked on gpio{}", pin);
        Ok(Self {
            pin,
            _context: context,
        })
    }
}

impl Drop for KeyInterrupt {
    fn drop(&mut self) {
        unsafe {
            sys::gpio_isr_handler_remove(self.pin);
        }
    }
}

unsafe extern "C" fn key_isr(arg: *mut c_void) {
    let context = unsafe { &*(arg as *const IsrContext) };
    // Full queue: drop the edge, bounce is covered by the next one
    let _ = context.queue.push(context.pin);
}

/// `esp_timer` based monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

impl Clock for EspClock {
    fn now_us(&self) -> u64 {
        unsafe { sys::esp_timer_get_time() as u64 }
    }
}
