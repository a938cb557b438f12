#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Palette`**: Hot/neutral/cold colors for one lighting condition (`DAY_PALETTE`, `NIGHT_PALETTE`)
//! - **`ThresholdTable`**: Cut-offs that classify a temperature into a `Bucket`
//! - **`interpolate::step`**: Moves a color a bounded amount toward a target without overshooting
//! - **`ColorScheduler`**: Walks the live colors toward the day or night palette and colors the slots
//! - **`SyncSchedule`**: Decides when outdoor conditions are due for a refresh
//! - **`Station`**: The poll-and-render loop tying everything together
//! - **`DisplayRenderer`**, **`SensorReader`**, **`WeatherClient`**, **`ClockSource`**,
//!   **`TelemetrySink`**: Traits to implement for your hardware and services
//!
//! Colors are `Srgb<u8>`, so every channel is within 0-255 by construction.
//! Renderers that want `#rrggbb` strings can use `colors::to_hex`.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod classify;
pub mod colors;
pub mod config;
pub mod interpolate;
pub mod poll;
pub mod scheduler;
pub mod sensor;
pub mod station;
pub mod telemetry;
pub mod time;
pub mod types;
pub mod weather;

pub use classify::{ThresholdTable, Thresholds, classify};
pub use colors::{BLACK, BLACK_PALETTE, DAY_PALETTE, NIGHT_PALETTE, Palette, Rgb};
pub use config::{ConfigError, InitialColors, StationConfig, StationConfigBuilder};
pub use poll::{SyncSchedule, should_refetch};
pub use scheduler::{ColorScheduler, DisplayRenderer, RenderInputs, RenderTiming, SchedulerConfig};
pub use sensor::{SensorError, SensorReader};
pub use station::{Station, TickReport};
pub use telemetry::{NoTelemetry, TelemetryError, TelemetrySink};
pub use time::{ClockSource, UnixTime};
pub use types::{
    Bucket, DayNight, Fault, ReadingError, Role, SlotIndex, TemperatureReading, UnitSystem,
};
pub use weather::{
    FetchOutcome, Location, NetworkError, WeatherCache, WeatherClient, WeatherReport,
};
