//! Scanner configuration types and builder

pub use crate::error::BuilderError;

/// Presses held longer than this (µs) are at least medium
pub const DEFAULT_MEDIUM_PRESS_US: u64 = 1_000_000;

/// Presses held longer than this (µs) are long
pub const DEFAULT_LONG_PRESS_US: u64 = 5_000_000;

/// Edges buffered between the ISR and the scan task
///
/// One pin is monitored, so two slots cover a press and its release.
pub const DEFAULT_EDGE_QUEUE_CAPACITY: usize = 2;

/// Duration cut points separating short, medium and long presses
///
/// Both bounds are exclusive: a press of exactly `medium_after_us` is still
/// short, and one of exactly `long_after_us` is still medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    /// Lower (exclusive) bound of a medium press in microseconds
    pub medium_after_us: u64,
    /// Lower (exclusive) bound of a long press in microseconds
    pub long_after_us: u64,
}

impl Thresholds {
    /// Create thresholds with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidThresholds` if
    /// `medium_after_us >= long_after_us`.
    pub fn new(medium_after_us: u64, long_after_us: u64) -> Result<Self, BuilderError> {
        if medium_after_us >= long_after_us {
            return Err(BuilderError::InvalidThresholds {
                medium_after_us,
                long_after_us,
            });
        }
        Ok(Self {
            medium_after_us,
            long_after_us,
        })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            medium_after_us: DEFAULT_MEDIUM_PRESS_US,
            long_after_us: DEFAULT_LONG_PRESS_US,
        }
    }
}

/// Scanner configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// GPIO number of the monitored key
    pub pin: u32,
    /// Capacity of the ISR edge queue
    pub queue_capacity: usize,
    /// Press classification cut points
    pub thresholds: Thresholds,
}

/// Builder for constructing scanner configuration
///
/// # Example
///
/// ```
/// use reset_key::Builder;
///
/// let config = Builder::new()
///     .pin(0)
///     .thresholds_us(1_000_000, 5_000_000)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.queue_capacity, 2);
/// ```
pub struct Builder {
    pin: u32,
    queue_capacity: usize,
    medium_after_us: u64,
    long_after_us: u64,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            pin: 0,
            queue_capacity: DEFAULT_EDGE_QUEUE_CAPACITY,
            medium_after_us: DEFAULT_MEDIUM_PRESS_US,
            long_after_us: DEFAULT_LONG_PRESS_US,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GPIO number of the key
    pub fn pin(mut self, pin: u32) -> Self {
        self.pin = pin;
        self
    }

    /// Set the edge queue capacity
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the medium and long press cut points in microseconds
    pub fn thresholds_us(mut self, medium_after_us: u64, long_after_us: u64) -> Self {
        self.medium_after_us = medium_after_us;
        self.long_after_us = long_after_us;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ZeroQueueCapacity` for an empty queue and
    /// `BuilderError::InvalidThresholds` for out-of-order cut points.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.queue_capacity == 0 {
            return Err(BuilderError::ZeroQueueCapacity);
        }
        Ok(Config {
            pin: self.pin,
            queue_capacity: self.queue_capacity,
            thresholds: Thresholds::new(self.medium_after_us, self.long_after_us)?,
        })
    }
}
