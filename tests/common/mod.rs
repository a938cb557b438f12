//! Shared test infrastructure for thermo-matrix integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use thermo_matrix::{
    ClockSource, DisplayRenderer, Location, NetworkError, Rgb, SensorError, SensorReader,
    SlotIndex, TelemetryError, TelemetrySink, UnitSystem, UnixTime, WeatherClient, WeatherReport,
};

pub const SLOTS: usize = 6;

// ============================================================================
// Mock Renderer
// ============================================================================

/// Mock renderer that keeps the current text and color of every slot and
/// records every color push
pub struct MockRenderer {
    texts: [heapless::String<12>; SLOTS],
    colors: [Option<Rgb>; SLOTS],
    color_pushes: [u32; SLOTS],
    color_history: heapless::Vec<(SlotIndex, Rgb), 1024>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            texts: core::array::from_fn(|_| heapless::String::new()),
            colors: [None; SLOTS],
            color_pushes: [0; SLOTS],
            color_history: heapless::Vec::new(),
        }
    }

    pub fn text(&self, slot: usize) -> &str {
        &self.texts[slot]
    }

    pub fn color(&self, slot: usize) -> Option<Rgb> {
        self.colors[slot]
    }

    pub fn color_pushes(&self, slot: usize) -> u32 {
        self.color_pushes[slot]
    }

    pub fn color_history(&self) -> &[(SlotIndex, Rgb)] {
        &self.color_history
    }

    pub fn clear_history(&mut self) {
        self.color_pushes = [0; SLOTS];
        self.color_history.clear();
    }
}

impl DisplayRenderer for MockRenderer {
    fn set_text(&mut self, slot: SlotIndex, text: &str) {
        let mut stored = heapless::String::new();
        let _ = stored.push_str(text);
        self.texts[slot.0] = stored;
    }

    fn set_text_color(&mut self, slot: SlotIndex, color: Rgb) {
        self.colors[slot.0] = Some(color);
        self.color_pushes[slot.0] += 1;
        let _ = self.color_history.push((slot, color));
    }
}

// ============================================================================
// Mock Clock
// ============================================================================

/// Mock clock with controllable time advancement
pub struct MockClock {
    now: Cell<UnixTime>,
}

impl MockClock {
    pub fn new(start: UnixTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Advance time by the given number of seconds
    pub fn advance(&self, secs: u64) {
        self.now.set(self.now.get() + secs);
    }

    pub fn set(&self, now: UnixTime) {
        self.now.set(now);
    }
}

impl ClockSource for MockClock {
    fn now(&self) -> UnixTime {
        self.now.get()
    }
}

// ============================================================================
// Mock Sensor
// ============================================================================

/// Mock sensor returning whatever result was last scripted
pub struct MockSensor {
    next: Cell<Result<f32, SensorError>>,
    reads: Cell<u32>,
}

impl MockSensor {
    pub fn new(celsius: f32) -> Self {
        Self {
            next: Cell::new(Ok(celsius)),
            reads: Cell::new(0),
        }
    }

    pub fn set(&self, result: Result<f32, SensorError>) {
        self.next.set(result);
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl SensorReader for &MockSensor {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.reads.set(self.reads.get() + 1);
        self.next.get()
    }
}

// ============================================================================
// Mock Weather Client
// ============================================================================

/// Mock weather client returning whatever result was last scripted
pub struct MockWeather {
    next: Cell<Result<WeatherReport, NetworkError>>,
    calls: Cell<u32>,
    last_units: Cell<Option<UnitSystem>>,
}

impl MockWeather {
    pub fn new(report: WeatherReport) -> Self {
        Self {
            next: Cell::new(Ok(report)),
            calls: Cell::new(0),
            last_units: Cell::new(None),
        }
    }

    pub fn failing(err: NetworkError) -> Self {
        Self {
            next: Cell::new(Err(err)),
            calls: Cell::new(0),
            last_units: Cell::new(None),
        }
    }

    pub fn set(&self, result: Result<WeatherReport, NetworkError>) {
        self.next.set(result);
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub fn last_units(&self) -> Option<UnitSystem> {
        self.last_units.get()
    }
}

impl WeatherClient for &MockWeather {
    fn fetch(
        &mut self,
        _location: &Location,
        units: UnitSystem,
    ) -> Result<WeatherReport, NetworkError> {
        self.calls.set(self.calls.get() + 1);
        self.last_units.set(Some(units));
        self.next.get()
    }
}

// ============================================================================
// Mock Telemetry
// ============================================================================

/// Mock telemetry sink that records pushes and can be told to fail
pub struct MockTelemetry {
    pushes: RefCell<heapless::Vec<(heapless::String<32>, f32), 64>>,
    fail: Cell<bool>,
}

impl MockTelemetry {
    pub fn new() -> Self {
        Self {
            pushes: RefCell::new(heapless::Vec::new()),
            fail: Cell::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn count(&self, metric: &str) -> usize {
        self.pushes
            .borrow()
            .iter()
            .filter(|(name, _)| name.as_str() == metric)
            .count()
    }

    pub fn last(&self, metric: &str) -> Option<f32> {
        self.pushes
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name.as_str() == metric)
            .map(|(_, value)| *value)
    }
}

impl TelemetrySink for &MockTelemetry {
    fn push(&mut self, metric: &str, value: f32) -> Result<(), TelemetryError> {
        if self.fail.get() {
            return Err(TelemetryError::Unavailable);
        }
        let mut name = heapless::String::new();
        let _ = name.push_str(metric);
        let _ = self.pushes.borrow_mut().push((name, value));
        Ok(())
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that records calls instead of sleeping
pub struct MockDelay {
    pub calls: u32,
    pub total_ms: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            calls: 0,
            total_ms: 0,
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms as u64;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Sunrise at 06:00 and sunset at 20:00 on day zero
pub const SUNRISE: UnixTime = 6 * 3600;
pub const SUNSET: UnixTime = 20 * 3600;

/// Noon and midnight on day zero
pub const NOON: UnixTime = 12 * 3600;
pub const LATE_NIGHT: UnixTime = 23 * 3600;

pub fn report(temperature: f32) -> WeatherReport {
    WeatherReport {
        temperature,
        sunrise: SUNRISE,
        sunset: SUNSET,
    }
}

pub fn seattle() -> Location {
    Location::new(47.61, -122.33)
}
