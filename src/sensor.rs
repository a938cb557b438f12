//! Indoor temperature sensor interface.

/// Trait for abstracting the indoor temperature sensor.
///
/// Implement this over your sensor driver (BME680, SHT3x, DS18B20, ...).
/// Calibration, oversampling and power modes belong to the implementation.
pub trait SensorReader {
    /// Takes a measurement and returns it in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

impl<S: SensorReader + ?Sized> SensorReader for &mut S {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        (**self).read_celsius()
    }
}

/// Sensor failures. All of them are transient: the indoor update for the
/// current tick is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed.
    Bus,

    /// No fresh measurement was available.
    NotReady,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::Bus => write!(f, "sensor bus transaction failed"),
            SensorError::NotReady => write!(f, "sensor measurement not ready"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}
