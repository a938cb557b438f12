//! Temperature classification into hot, neutral and cold buckets.

use crate::types::{Bucket, Role, TemperatureReading, UnitSystem};

/// High and low cut-offs for one role in one unit system.
///
/// Values strictly above `high` are hot, strictly below `low` are cold,
/// and everything in between (both ends included) is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    pub high: i16,
    pub low: i16,
}

impl Thresholds {
    /// Creates a threshold pair.
    pub const fn new(high: i16, low: i16) -> Self {
        Self { high, low }
    }

    /// Classifies `temp` against these cut-offs.
    ///
    /// Returns `None` for NaN and infinities.
    #[inline]
    pub fn classify(&self, temp: f32) -> Option<Bucket> {
        temp.is_finite().then(|| self.bucket(temp))
    }

    fn bucket(&self, temp: f32) -> Bucket {
        if temp > self.high as f32 {
            Bucket::Hot
        } else if temp < self.low as f32 {
            Bucket::Cold
        } else {
            Bucket::Neutral
        }
    }

    /// Returns true if `low <= high`.
    pub fn is_ordered(&self) -> bool {
        self.low <= self.high
    }
}

/// Thresholds for every role and unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdTable {
    pub outdoor_imperial: Thresholds,
    pub outdoor_metric: Thresholds,
    pub indoor_imperial: Thresholds,
    pub indoor_metric: Thresholds,
}

impl ThresholdTable {
    /// Standard cut-offs.
    pub const DEFAULT: ThresholdTable = ThresholdTable {
        outdoor_imperial: Thresholds::new(89, 35),
        outdoor_metric: Thresholds::new(31, 2),
        indoor_imperial: Thresholds::new(83, 50),
        indoor_metric: Thresholds::new(26, -2),
    };

    /// Same as [`ThresholdTable::DEFAULT`] but indoor imperial turns hot above 80.
    pub const ALTERNATE: ThresholdTable = ThresholdTable {
        indoor_imperial: Thresholds::new(80, 50),
        ..ThresholdTable::DEFAULT
    };

    /// Thresholds for `role` in `units`.
    pub fn get(&self, role: Role, units: UnitSystem) -> Thresholds {
        match (role, units) {
            (Role::Outdoor, UnitSystem::Imperial) => self.outdoor_imperial,
            (Role::Outdoor, UnitSystem::Metric) => self.outdoor_metric,
            (Role::Indoor, UnitSystem::Imperial) => self.indoor_imperial,
            (Role::Indoor, UnitSystem::Metric) => self.indoor_metric,
        }
    }

    /// Classifies `temp` for `role` in `units`. Non-finite input has no bucket.
    pub fn classify(&self, temp: f32, units: UnitSystem, role: Role) -> Option<Bucket> {
        self.get(role, units).classify(temp)
    }

    /// Classifies the raw value of a reading, which is always finite.
    pub fn classify_reading(&self, reading: &TemperatureReading, role: Role) -> Bucket {
        self.get(role, reading.units()).bucket(reading.value())
    }

    /// Returns true if every threshold pair is ordered.
    pub fn is_valid(&self) -> bool {
        [
            self.outdoor_imperial,
            self.outdoor_metric,
            self.indoor_imperial,
            self.indoor_metric,
        ]
        .iter()
        .all(Thresholds::is_ordered)
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        ThresholdTable::DEFAULT
    }
}

/// Classifies `temp` with [`ThresholdTable::DEFAULT`].
pub fn classify(temp: f32, units: UnitSystem, role: Role) -> Option<Bucket> {
    ThresholdTable::DEFAULT.classify(temp, units, role)
}
