//! Station configuration and its validating builder.

use core::num::NonZeroU8;

use crate::classify::ThresholdTable;
use crate::colors::{BLACK_PALETTE, NIGHT_PALETTE, Palette};
use crate::poll::DEFAULT_REFRESH_INTERVAL_SECS;
use crate::scheduler::{DEFAULT_FRAME_DELAY_MS, DEFAULT_STEP_DELTA, SchedulerConfig};
use crate::types::UnitSystem;
use crate::weather::Location;

/// Default pause between ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 20_000;

/// Live colors the display starts from at power-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitialColors {
    /// Start dark and fade in.
    Black,

    /// Start at the night palette.
    #[default]
    Night,
}

impl InitialColors {
    fn palette(self) -> Palette {
        match self {
            InitialColors::Black => BLACK_PALETTE,
            InitialColors::Night => NIGHT_PALETTE,
        }
    }
}

/// Validated configuration for a [`Station`](crate::station::Station).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationConfig {
    /// Where to fetch outdoor conditions for.
    pub location: Location,

    /// Unit system for readings, thresholds and unit markers.
    pub units: UnitSystem,

    /// Seconds between outdoor fetches.
    pub refresh_interval_secs: u64,

    /// Milliseconds between ticks.
    pub tick_interval_ms: u32,

    /// Colors and transition pacing.
    pub scheduler: SchedulerConfig,

    /// Classification cut-offs.
    pub thresholds: ThresholdTable,
}

impl StationConfig {
    /// Creates a new configuration builder for `location`.
    pub fn builder(location: Location) -> StationConfigBuilder {
        StationConfigBuilder::new(location)
    }
}

/// Builder for constructing a validated [`StationConfig`].
#[derive(Debug, Clone, Copy)]
pub struct StationConfigBuilder {
    location: Location,
    units: UnitSystem,
    refresh_interval_secs: u64,
    tick_interval_ms: u32,
    step_delta: u8,
    frame_delay_ms: u32,
    initial_colors: InitialColors,
    day: Palette,
    night: Palette,
    thresholds: ThresholdTable,
}

impl StationConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new(location: Location) -> Self {
        let scheduler = SchedulerConfig::default();
        Self {
            location,
            units: UnitSystem::default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            step_delta: DEFAULT_STEP_DELTA.get(),
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            initial_colors: InitialColors::default(),
            day: scheduler.day,
            night: scheduler.night,
            thresholds: ThresholdTable::DEFAULT,
        }
    }

    /// Sets the unit system. Default is imperial.
    pub fn units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    /// Sets the seconds between outdoor fetches. Default is one hour.
    pub fn refresh_interval_secs(mut self, secs: u64) -> Self {
        self.refresh_interval_secs = secs;
        self
    }

    /// Sets the milliseconds between ticks. Default is 20 seconds.
    pub fn tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Sets the largest per-channel change per transition frame.
    pub fn step_delta(mut self, delta: u8) -> Self {
        self.step_delta = delta;
        self
    }

    /// Sets the pause between transition frames.
    pub fn frame_delay_ms(mut self, ms: u32) -> Self {
        self.frame_delay_ms = ms;
        self
    }

    /// Sets the power-on colors. Default is [`InitialColors::Night`].
    pub fn initial_colors(mut self, initial: InitialColors) -> Self {
        self.initial_colors = initial;
        self
    }

    /// Replaces the day and night palettes.
    pub fn palettes(mut self, day: Palette, night: Palette) -> Self {
        self.day = day;
        self.night = night;
        self
    }

    /// Replaces the classification cut-offs.
    pub fn thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `InvalidLocation` - Latitude or longitude out of range
    /// * `ZeroRefreshInterval` - Outdoor refresh interval is zero
    /// * `ZeroTickInterval` - Tick interval is zero
    /// * `ZeroStepDelta` - Transition step would never converge
    /// * `InvertedThresholds` - A threshold pair has `low > high`
    pub fn build(self) -> Result<StationConfig, ConfigError> {
        if !self.location.is_valid() {
            return Err(ConfigError::InvalidLocation);
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        let step_delta = NonZeroU8::new(self.step_delta).ok_or(ConfigError::ZeroStepDelta)?;
        if !self.thresholds.is_valid() {
            return Err(ConfigError::InvertedThresholds);
        }

        Ok(StationConfig {
            location: self.location,
            units: self.units,
            refresh_interval_secs: self.refresh_interval_secs,
            tick_interval_ms: self.tick_interval_ms,
            scheduler: SchedulerConfig {
                day: self.day,
                night: self.night,
                initial: self.initial_colors.palette(),
                step_delta,
                frame_delay_ms: self.frame_delay_ms,
            },
            thresholds: self.thresholds,
        })
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    InvalidLocation,

    /// Outdoor refresh interval is zero.
    ZeroRefreshInterval,

    /// Tick interval is zero.
    ZeroTickInterval,

    /// Transition step delta is zero.
    ZeroStepDelta,

    /// A threshold pair has its low cut-off above its high cut-off.
    InvertedThresholds,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidLocation => {
                write!(f, "latitude must be within [-90, 90] and longitude within [-180, 180]")
            }
            ConfigError::ZeroRefreshInterval => {
                write!(f, "outdoor refresh interval must be non-zero")
            }
            ConfigError::ZeroTickInterval => {
                write!(f, "tick interval must be non-zero")
            }
            ConfigError::ZeroStepDelta => {
                write!(f, "transition step delta must be non-zero")
            }
            ConfigError::InvertedThresholds => {
                write!(f, "every threshold pair must have low <= high")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
