//! Outdoor weather interface and the last-known-good cache.
//!
//! The core only needs three fields from a weather response: the current
//! temperature and today's sunrise and sunset. Transport, authentication
//! and JSON decoding live in the [`WeatherClient`] implementation.

use crate::time::UnixTime;
use crate::types::{DayNight, Fault, ReadingError, Role, TemperatureReading, UnitSystem};

/// Geographic position for weather lookups, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Location {
    pub latitude: f32,
    pub longitude: f32,
}

impl Location {
    /// Creates a location.
    pub const fn new(latitude: f32, longitude: f32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// The fields of a weather response the display uses.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReport {
    /// Current outdoor temperature, in the unit system that was requested.
    pub temperature: f32,

    /// Today's sunrise.
    pub sunrise: UnixTime,

    /// Today's sunset.
    pub sunset: UnixTime,
}

impl WeatherReport {
    /// Outdoor temperature as a validated reading.
    pub fn reading(&self, units: UnitSystem) -> Result<TemperatureReading, ReadingError> {
        TemperatureReading::new(self.temperature, units)
    }

    /// Lighting condition at `now` according to this report's sun markers.
    pub fn day_night(&self, now: UnixTime) -> DayNight {
        DayNight::at(now, self.sunrise, self.sunset)
    }
}

/// Trait for abstracting the weather service.
pub trait WeatherClient {
    /// Fetches current conditions at `location`, with temperatures in `units`.
    fn fetch(&mut self, location: &Location, units: UnitSystem)
    -> Result<WeatherReport, NetworkError>;
}

impl<W: WeatherClient + ?Sized> WeatherClient for &mut W {
    fn fetch(
        &mut self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<WeatherReport, NetworkError> {
        (**self).fetch(location, units)
    }
}

/// Weather fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// No connection to the access point or host.
    Connection,

    /// Request did not complete in time.
    Timeout,

    /// Server answered with a non-success HTTP status.
    Status(u16),

    /// Response lacked `temp`, `sunrise` or `sunset`.
    MissingField,
}

impl core::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NetworkError::Connection => write!(f, "no network connection"),
            NetworkError::Timeout => write!(f, "weather request timed out"),
            NetworkError::Status(code) => write!(f, "weather service returned HTTP {}", code),
            NetworkError::MissingField => write!(f, "weather response is missing a field"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NetworkError {}

/// Result of feeding a fetch into the [`WeatherCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchOutcome {
    /// New report stored.
    Fresh,

    /// Fetch failed; the previous report is still in use.
    Stale(Fault),

    /// Fetch failed and there is no previous report.
    Missing(Fault),
}

impl FetchOutcome {
    /// The fault behind a failed fetch, if any.
    pub fn fault(&self) -> Option<Fault> {
        match self {
            FetchOutcome::Fresh => None,
            FetchOutcome::Stale(fault) | FetchOutcome::Missing(fault) => Some(*fault),
        }
    }
}

/// Holds the last weather report that was fetched successfully.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherCache {
    last: Option<WeatherReport>,
}

impl WeatherCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Stores a successful fetch; keeps the previous report on failure.
    ///
    /// A report whose temperature is not a finite number counts as a failed fetch.
    pub fn update(&mut self, result: Result<WeatherReport, NetworkError>) -> FetchOutcome {
        let fault = match result {
            Ok(report) if report.temperature.is_finite() => {
                self.last = Some(report);
                return FetchOutcome::Fresh;
            }
            Ok(_) => Fault::MalformedReading(Role::Outdoor),
            Err(err) => Fault::Network(err),
        };

        if self.last.is_some() {
            FetchOutcome::Stale(fault)
        } else {
            FetchOutcome::Missing(fault)
        }
    }

    /// Last good report, if one was ever fetched.
    pub fn last(&self) -> Option<&WeatherReport> {
        self.last.as_ref()
    }

    /// Outdoor reading from the last good report.
    pub fn reading(&self, units: UnitSystem) -> Option<TemperatureReading> {
        self.last.and_then(|report| report.reading(units).ok())
    }

    /// Lighting condition at `now`. Without any report the display stays at full brightness.
    pub fn day_night(&self, now: UnixTime) -> DayNight {
        self.last
            .map(|report| report.day_night(now))
            .unwrap_or(DayNight::Day)
    }
}
