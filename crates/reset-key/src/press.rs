//! Press classification and the application events it maps to.

use crate::config::Thresholds;

/// Duration bucket of a completed press/release cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    /// Held up to the medium threshold
    Short,
    /// Held past the medium threshold, up to the long threshold
    Medium,
    /// Held past the long threshold
    Long,
}

impl PressKind {
    /// Application event dispatched for this kind of press
    pub fn event(self) -> AppEvent {
        match self {
            PressKind::Short => AppEvent::ActivateDevice,
            PressKind::Medium => AppEvent::UpdateRouterConfig,
            PressKind::Long => AppEvent::FactoryReset,
        }
    }
}

/// Events the key hands to the rest of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    ActivateDevice,
    UpdateRouterConfig,
    FactoryReset,
}

/// Bucket a press duration against the cut points.
pub fn classify(duration_us: u64, thresholds: &Thresholds) -> PressKind {
    if duration_us > thresholds.long_after_us {
        PressKind::Long
    } else if duration_us > thresholds.medium_after_us {
        PressKind::Medium
    } else {
        PressKind::Short
    }
}

/// Receiver of application events
///
/// Delivery is fire-and-forget. Any `FnMut(AppEvent)` closure is a sink.
pub trait EventSink {
    /// Hand one event to the application
    fn emit(&mut self, event: AppEvent);
}

impl<F> EventSink for F
where
    F: FnMut(AppEvent),
{
    fn emit(&mut self, event: AppEvent) {
        self(event)
    }
}
