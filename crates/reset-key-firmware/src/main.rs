mod config;
mod input;
mod platform;
mod runtime_diagnostics;

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use esp_idf_svc::hal::gpio::{InterruptType, PinDriver, Pull};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::EspError;

use reset_key::{factory_reset, AppEvent, Builder, PressClassifier};

use input::{EdgeQueue, EdgeReceiver, EspClock, KeyInterrupt};
use platform::EspResetPlatform;

/// Consume key events until the key task goes away or a factory reset fails.
fn dispatch_events(
    events: Receiver<AppEvent>,
    platform: &mut EspResetPlatform,
) -> Result<(), reset_key::Error<EspError>> {
    for event in events {
        match event {
            AppEvent::ActivateDevice => log::info!("event: activate device"),
            AppEvent::UpdateRouterConfig => log::info!("event: update router config"),
            AppEvent::FactoryReset => {
                runtime_diagnostics::log_heap("factory_reset");
                factory_reset(platform)?;
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    runtime_diagnostics::log_heap("startup");

    let peripherals = Peripherals::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut key = PinDriver::input(peripherals.pins.gpio9)?;
    key.set_pull(Pull::Up)?;
    key.set_interrupt_type(InterruptType::AnyEdge)?;

    let config = Builder::new()
        .pin(key.pin() as u32)
        .queue_capacity(config::EDGE_QUEUE_CAPACITY)
        .thresholds_us(config::MEDIUM_PRESS_US, config::LONG_PRESS_US)
        .build()?;

    let edges = Arc::new(EdgeQueue::new(config.queue_capacity));
    let _key_irq = KeyInterrupt::register(key.pin(), edges.clone())?;

    let (tx, rx) = mpsc::channel();
    let key_task = runtime_diagnostics::spawn_key_task(move || {
        let mut classifier = PressClassifier::new(EdgeReceiver::new(edges), key, EspClock, config);
        let mut emit = |event: AppEvent| {
            if tx.send(event).is_err() {
                log::warn!("key: event consumer gone, dropping {:?}", event);
            }
        };
        match classifier.run(&mut emit) {
            Err(err) => log::error!("key: scan task stopped: {}", err),
            Ok(never) => match never {},
        }
    })?;

    log::info!("Hold the key: <1s activate, 1-5s router config, >5s factory reset");

    let mut platform = EspResetPlatform::new(nvs);
    match dispatch_events(rx, &mut platform) {
        Ok(()) => {
            log::warn!("key task ended; no more key events");
            let _ = key_task.join();
        }
        // Partially reset: leave the device up so the failure stays visible in the log.
        Err(err) => log::error!("factory reset aborted: {}", err),
    }

    Ok(())
}
