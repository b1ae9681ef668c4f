//! Press classifier state machine
//!
//! Consumes edges from an [`EdgeSource`], samples the key level after each
//! one and times the press from the low reading to the next high reading.
//!
//! ```text
//!            low / record now
//!   Idle ──────────────────────▶ Pressed
//!    ▲                              │
//!    └──────────────────────────────┘
//!      high / classify(now - since), emit
//! ```
//!
//! A low reading while already pressed restarts the timing (contact bounce
//! re-entered the press). A high reading while idle is ignored, so a release
//! never completes a cycle without a press before it.

use core::convert::Infallible;
use core::time::Duration;

use embedded_hal::digital::InputPin;

use crate::config::Config;
use crate::edge::{Clock, EdgeSource};
use crate::error::Error;
use crate::press::{EventSink, PressKind, classify};

/// Session state of the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    /// No press in progress
    Idle,
    /// Key held since the given timestamp
    Pressed {
        /// Clock reading when the press was observed (µs)
        since_us: u64,
    },
}

/// Times key presses and turns completed cycles into [`PressKind`]s
///
/// ## Type Parameters
///
/// * `S` - edge queue consumer implementing [`EdgeSource`]
/// * `P` - key input implementing [`InputPin`] (active low)
/// * `C` - monotonic clock implementing [`Clock`]
pub struct PressClassifier<S, P, C> {
    source: S,
    pin: P,
    clock: C,
    config: Config,
    state: PressState,
}

impl<S, P, C> PressClassifier<S, P, C>
where
    S: EdgeSource,
    P: InputPin,
    C: Clock,
{
    /// Create a classifier in the `Idle` state
    pub fn new(source: S, pin: P, clock: C, config: Config) -> Self {
        Self {
            source,
            pin,
            clock,
            config,
            state: PressState::Idle,
        }
    }

    /// Current session state
    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the owned collaborators
    pub fn into_parts(self) -> (S, P, C) {
        (self.source, self.pin, self.clock)
    }

    /// Process one edge from the queue
    ///
    /// Returns `Some(kind)` when this edge completed a press/release cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueReceive`] if the source fails or times out. The
    /// session state is left untouched.
    pub fn step(&mut self, timeout: Option<Duration>) -> Result<Option<PressKind>, Error<S::Error>> {
        let edge = self.source.recv(timeout).map_err(Error::QueueReceive)?;
        if edge.pin != self.config.pin {
            log::debug!("key: edge on gpio{} (watching gpio{})", edge.pin, self.config.pin);
        }

        let pressed = match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                log::warn!("key: level read failed on gpio{}: {:?}", edge.pin, e);
                return Ok(None);
            }
        };
        let now = self.clock.now_us();

        match (self.state, pressed) {
            (_, true) => {
                self.state = PressState::Pressed { since_us: now };
                Ok(None)
            }
            (PressState::Pressed { since_us }, false) => {
                self.state = PressState::Idle;
                let held_us = now.saturating_sub(since_us);
                let kind = classify(held_us, &self.config.thresholds);
                log::info!("key: released after {}us -> {:?}", held_us, kind);
                Ok(Some(kind))
            }
            (PressState::Idle, false) => Ok(None),
        }
    }

    /// Block until one full press/release cycle completes
    ///
    /// `timeout` applies to each wait on the queue, not to the whole press.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueReceive`] as soon as a receive fails.
    pub fn scan(&mut self, timeout: Option<Duration>) -> Result<PressKind, Error<S::Error>> {
        loop {
            if let Some(kind) = self.step(timeout)? {
                return Ok(kind);
            }
        }
    }

    /// Scan forever, emitting one event per completed press
    ///
    /// Waits on the queue without a timeout and only returns when receiving
    /// fails. The caller owns the task and decides whether to restart it.
    ///
    /// # Errors
    ///
    /// Always ends with [`Error::QueueReceive`].
    pub fn run<K: EventSink>(&mut self, sink: &mut K) -> Result<Infallible, Error<S::Error>> {
        log::info!(
            "key: scanning gpio{} (medium > {}us, long > {}us)",
            self.config.pin,
            self.config.thresholds.medium_after_us,
            self.config.thresholds.long_after_us
        );
        loop {
            let kind = self.scan(None)?;
            sink.emit(kind.event());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::edge::Edge;
    use crate::press::AppEvent;
    use core::cell::Cell;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::collections::VecDeque;
    use std::vec::Vec;

    const PIN: u32 = 0;

    /// Edge queue fed from a script of `(time_us, low)` samples.
    ///
    /// Popping an edge moves the shared clock and pin level to the scripted
    /// values, the way a real edge arrives with the pin already settled.
    struct Script<'a> {
        edges: VecDeque<(u64, bool)>,
        now: &'a Cell<u64>,
        low: &'a Cell<bool>,
    }

    #[derive(Debug, PartialEq)]
    struct Drained;

    impl EdgeSource for Script<'_> {
        type Error = Drained;

        fn recv(&mut self, _timeout: Option<Duration>) -> Result<Edge, Drained> {
            let (t, low) = self.edges.pop_front().ok_or(Drained)?;
            self.now.set(t);
            self.low.set(low);
            Ok(Edge::new(PIN))
        }
    }

    struct Level<'a>(&'a Cell<bool>);

    impl ErrorType for Level<'_> {
        type Error = ErrorKind;
    }

    impl InputPin for Level<'_> {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Ok(!self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Ok(self.0.get())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    struct At<'a>(&'a Cell<u64>);

    impl Clock for At<'_> {
        fn now_us(&self) -> u64 {
            self.0.get()
        }
    }

    fn events(samples: &[(u64, bool)]) -> (Vec<AppEvent>, PressState) {
        let now = Cell::new(0);
        let low = Cell::new(false);
        let script = Script {
            edges: samples.iter().copied().collect(),
            now: &now,
            low: &low,
        };
        let config = Builder::new().pin(PIN).build().unwrap();
        let mut classifier = PressClassifier::new(script, Level(&low), At(&now), config);
        let mut seen = Vec::new();
        let mut sink = |event: AppEvent| seen.push(event);
        let err = classifier.run(&mut sink).unwrap_err();
        assert_eq!(err, Error::QueueReceive(Drained));
        (seen, classifier.state())
    }

    #[test]
    fn short_press_activates() {
        let (seen, state) = events(&[(0, true), (500_000, false)]);
        assert_eq!(seen, [AppEvent::ActivateDevice]);
        assert_eq!(state, PressState::Idle);
    }

    #[test]
    fn medium_press_updates_router() {
        let (seen, _) = events(&[(0, true), (2_000_000, false)]);
        assert_eq!(seen, [AppEvent::UpdateRouterConfig]);
    }

    #[test]
    fn long_press_resets() {
        let (seen, _) = events(&[(0, true), (6_000_000, false)]);
        assert_eq!(seen, [AppEvent::FactoryReset]);
    }

    #[test]
    fn press_without_release_emits_nothing() {
        let (seen, state) = events(&[(100, true)]);
        assert!(seen.is_empty());
        assert_eq!(state, PressState::Pressed { since_us: 100 });
    }

    #[test]
    fn release_without_press_is_ignored() {
        let (seen, state) = events(&[(0, false), (10, false)]);
        assert!(seen.is_empty());
        assert_eq!(state, PressState::Idle);
    }

    #[test]
    fn bounce_restarts_timing() {
        // Second low edge re-anchors the press at 4.5s, so 5.5s is short.
        let (seen, _) = events(&[(0, true), (4_500_000, true), (5_500_000, false)]);
        assert_eq!(seen, [AppEvent::ActivateDevice]);
    }

    #[test]
    fn cycles_are_independent() {
        let (seen, _) = events(&[
            (0, true),
            (7_000_000, false),
            (8_000_000, true),
            (8_100_000, false),
            (9_000_000, true),
            (12_000_000, false),
        ]);
        assert_eq!(
            seen,
            [
                AppEvent::FactoryReset,
                AppEvent::ActivateDevice,
                AppEvent::UpdateRouterConfig,
            ]
        );
    }

    #[test]
    fn scan_returns_the_completed_kind() {
        let now = Cell::new(0);
        let low = Cell::new(false);
        let script = Script {
            edges: [(10, false), (20, true), (1_500_020, false)].into_iter().collect(),
            now: &now,
            low: &low,
        };
        let config = Builder::new().build().unwrap();
        let mut classifier = PressClassifier::new(script, Level(&low), At(&now), config);
        assert_eq!(classifier.scan(None), Ok(PressKind::Medium));
        assert_eq!(classifier.scan(None), Err(Error::QueueReceive(Drained)));
    }

    #[test]
    fn step_reports_each_transition() {
        let now = Cell::new(0);
        let low = Cell::new(false);
        let script = Script {
            edges: [(5, true), (10, false)].into_iter().collect(),
            now: &now,
            low: &low,
        };
        let config = Builder::new().build().unwrap();
        let mut classifier = PressClassifier::new(script, Level(&low), At(&now), config);
        assert_eq!(classifier.step(None), Ok(None));
        assert_eq!(classifier.state(), PressState::Pressed { since_us: 5 });
        assert_eq!(classifier.step(None), Ok(Some(PressKind::Short)));
        assert_eq!(classifier.state(), PressState::Idle);
    }

    #[test]
    fn unreadable_level_skips_edge() {
        let now = Cell::new(0);
        let low = Cell::new(false);
        let script = Script {
            edges: [(0, true), (6_000_000, false)].into_iter().collect(),
            now: &now,
            low: &low,
        };
        let config = Builder::new().build().unwrap();
        let mut classifier = PressClassifier::new(script, BrokenPin, At(&now), config);
        assert_eq!(classifier.step(None), Ok(None));
        assert_eq!(classifier.step(None), Ok(None));
        assert_eq!(classifier.state(), PressState::Idle);
    }
}
