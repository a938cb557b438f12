//! Core types shared by the classifier, scheduler and station.

use core::fmt::Write;

use crate::sensor::SensorError;
use crate::time::UnixTime;
use crate::weather::NetworkError;

/// Text written to a value slot, e.g. `"72"` or `"-3"`.
pub type ValueText = heapless::String<12>;

/// Measurement system used for readings, thresholds and unit markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitSystem {
    /// Degrees Celsius.
    Metric,

    /// Degrees Fahrenheit.
    #[default]
    Imperial,
}

impl UnitSystem {
    /// Name used by weather APIs for this unit system (`"metric"` / `"imperial"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Unit marker shown next to a temperature.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "C",
            UnitSystem::Imperial => "F",
        }
    }
}

/// An index into the renderer's text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotIndex(pub usize);

impl From<usize> for SlotIndex {
    fn from(index: usize) -> Self {
        SlotIndex(index)
    }
}

impl From<SlotIndex> for usize {
    fn from(slot: SlotIndex) -> Self {
        slot.0
    }
}

/// Which temperature a reading or slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Local sensor reading.
    Indoor,

    /// Weather API reading.
    Outdoor,
}

impl Role {
    /// Both roles, indoor first.
    pub const ALL: [Role; 2] = [Role::Indoor, Role::Outdoor];

    /// Slots colored with this role's bucket color: label, unit marker and value.
    pub fn slots(&self) -> [SlotIndex; 3] {
        match self {
            Role::Indoor => [SlotIndex(0), SlotIndex(2), SlotIndex(4)],
            Role::Outdoor => [SlotIndex(1), SlotIndex(3), SlotIndex(5)],
        }
    }

    /// Slot holding the static label ("IN" / "OUT").
    pub fn label_slot(&self) -> SlotIndex {
        self.slots()[0]
    }

    /// Slot holding the unit marker.
    pub fn unit_slot(&self) -> SlotIndex {
        self.slots()[1]
    }

    /// Slot holding the temperature value.
    pub fn value_slot(&self) -> SlotIndex {
        self.slots()[2]
    }

    /// Static label text.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Indoor => "IN",
            Role::Outdoor => "OUT",
        }
    }
}

/// Qualitative temperature classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bucket {
    /// Above the role's high threshold.
    Hot,

    /// Between the thresholds, inclusive.
    Neutral,

    /// Below the role's low threshold.
    Cold,
}

impl Bucket {
    /// All buckets.
    pub const ALL: [Bucket; 3] = [Bucket::Hot, Bucket::Neutral, Bucket::Cold];
}

/// Lighting condition derived from the sun markers of the last weather report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayNight {
    /// Between sunrise and sunset: full-brightness palette.
    #[default]
    Day,

    /// Outside daylight: dimmed palette.
    Night,
}

impl DayNight {
    /// `Day` when `sunrise <= now <= sunset`, otherwise `Night`.
    pub fn at(now: UnixTime, sunrise: UnixTime, sunset: UnixTime) -> Self {
        if sunrise <= now && now <= sunset {
            DayNight::Day
        } else {
            DayNight::Night
        }
    }

    /// Returns true if the display should be dimmed.
    pub fn is_dim(&self) -> bool {
        *self == DayNight::Night
    }
}

/// A finite temperature in a known unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    value: f32,
    units: UnitSystem,
}

impl TemperatureReading {
    /// Creates a reading, rejecting NaN and infinities.
    pub fn new(value: f32, units: UnitSystem) -> Result<Self, ReadingError> {
        if !value.is_finite() {
            return Err(ReadingError::Malformed);
        }
        Ok(Self { value, units })
    }

    /// Creates a reading from a Celsius sensor value, converting to `units`.
    pub fn from_celsius(celsius: f32, units: UnitSystem) -> Result<Self, ReadingError> {
        let value = match units {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius * 1.8 + 32.0,
        };
        Self::new(value, units)
    }

    /// Parses a textual reading such as `"71.6"`. Anything non-numeric
    /// (`"N/A"`, `""`, `"nan"`) is malformed.
    pub fn parse(text: &str, units: UnitSystem) -> Result<Self, ReadingError> {
        let value = text
            .trim()
            .parse::<f32>()
            .map_err(|_| ReadingError::Malformed)?;
        Self::new(value, units)
    }

    /// Raw value in `units()`.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Unit system of the value.
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Whole degrees shown for `role`.
    ///
    /// Outdoor values are truncated toward zero. Indoor values are rounded
    /// to the nearest degree, ties to even.
    pub fn whole_degrees(&self, role: Role) -> i32 {
        match role {
            Role::Outdoor => libm::truncf(self.value) as i32,
            Role::Indoor => libm::rintf(self.value) as i32,
        }
    }

    /// Whole-degree text for `role`'s value slot.
    pub fn display_text(&self, role: Role) -> ValueText {
        let mut text = ValueText::new();
        // An i32 never exceeds the buffer.
        let _ = write!(text, "{}", self.whole_degrees(role));
        text
    }
}

/// Reading validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadingError {
    /// Value is not a finite number.
    Malformed,
}

impl core::fmt::Display for ReadingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadingError::Malformed => write!(f, "temperature reading is not a finite number"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadingError {}

/// A non-fatal fault absorbed during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Indoor sensor failed; indoor update skipped this tick.
    Sensor(SensorError),

    /// Weather fetch failed; last known outdoor reading kept.
    Network(NetworkError),

    /// A reading was not numeric; classification skipped for that role.
    MalformedReading(Role),
}

impl core::fmt::Display for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Fault::Sensor(err) => write!(f, "sensor fault: {}", err),
            Fault::Network(err) => write!(f, "network fault: {}", err),
            Fault::MalformedReading(role) => write!(f, "malformed {:?} reading", role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_night_boundaries_are_inclusive() {
        assert_eq!(DayNight::at(100, 100, 200), DayNight::Day);
        assert_eq!(DayNight::at(200, 100, 200), DayNight::Day);
        assert_eq!(DayNight::at(99, 100, 200), DayNight::Night);
        assert_eq!(DayNight::at(201, 100, 200), DayNight::Night);
    }

    #[test]
    fn only_night_is_dim() {
        assert!(DayNight::Night.is_dim());
        assert!(!DayNight::Day.is_dim());
    }

    #[test]
    fn celsius_is_converted_for_imperial() {
        let reading = TemperatureReading::from_celsius(22.0, UnitSystem::Imperial).unwrap();
        assert!(reading.value() > 71.59 && reading.value() < 71.61);
        assert_eq!(reading.whole_degrees(Role::Indoor), 72);

        let reading = TemperatureReading::from_celsius(22.0, UnitSystem::Metric).unwrap();
        assert_eq!(reading.whole_degrees(Role::Indoor), 22);
    }

    #[test]
    fn non_numeric_text_is_malformed() {
        assert_eq!(
            TemperatureReading::parse("N/A", UnitSystem::Imperial),
            Err(ReadingError::Malformed)
        );
        assert_eq!(
            TemperatureReading::parse("nan", UnitSystem::Metric),
            Err(ReadingError::Malformed)
        );
        assert_eq!(
            TemperatureReading::new(f32::INFINITY, UnitSystem::Metric),
            Err(ReadingError::Malformed)
        );
    }

    #[test]
    fn indoor_text_rounds_ties_to_even() {
        let reading = TemperatureReading::parse(" -2.5 ", UnitSystem::Metric).unwrap();
        assert_eq!(reading.display_text(Role::Indoor).as_str(), "-2");

        let reading = TemperatureReading::parse("71.5", UnitSystem::Imperial).unwrap();
        assert_eq!(reading.display_text(Role::Indoor).as_str(), "72");

        let reading = TemperatureReading::parse("71.6", UnitSystem::Imperial).unwrap();
        assert_eq!(reading.display_text(Role::Indoor).as_str(), "72");
    }

    #[test]
    fn outdoor_text_truncates_toward_zero() {
        let reading = TemperatureReading::new(89.6, UnitSystem::Imperial).unwrap();
        assert_eq!(reading.display_text(Role::Outdoor).as_str(), "89");

        let reading = TemperatureReading::new(-2.9, UnitSystem::Metric).unwrap();
        assert_eq!(reading.display_text(Role::Outdoor).as_str(), "-2");
    }

    #[test]
    fn role_slots_match_layout() {
        assert_eq!(Role::Indoor.slots(), [SlotIndex(0), SlotIndex(2), SlotIndex(4)]);
        assert_eq!(Role::Outdoor.slots(), [SlotIndex(1), SlotIndex(3), SlotIndex(5)]);
        assert_eq!(Role::Outdoor.value_slot(), SlotIndex(5));
    }
}
