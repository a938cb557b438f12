//! Optional best-effort metric upload.

/// Metric name for the indoor temperature.
pub const INDOOR_TEMPERATURE: &str = "indoor-temperature";

/// Metric name for the outdoor temperature.
pub const OUTDOOR_TEMPERATURE: &str = "outdoor-temperature";

/// Trait for abstracting a metrics feed.
///
/// Pushes are best-effort: the station logs a failure and carries on.
pub trait TelemetrySink {
    /// Publishes `value` under `metric`.
    fn push(&mut self, metric: &str, value: f32) -> Result<(), TelemetryError>;
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn push(&mut self, metric: &str, value: f32) -> Result<(), TelemetryError> {
        (**self).push(metric, value)
    }
}

/// Sink that discards every metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTelemetry;

impl TelemetrySink for NoTelemetry {
    fn push(&mut self, _metric: &str, _value: f32) -> Result<(), TelemetryError> {
        Ok(())
    }
}

/// Telemetry upload failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Upload could not be delivered.
    Unavailable,

    /// Feed rejected the value (throttled, unknown feed, ...).
    Rejected,
}

impl core::fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TelemetryError::Unavailable => write!(f, "telemetry feed unavailable"),
            TelemetryError::Rejected => write!(f, "telemetry feed rejected the value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TelemetryError {}
