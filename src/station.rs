//! The poll-and-render loop.
//!
//! [`Station`] wires the collaborators together. Every tick it refreshes
//! outdoor conditions when the sync deadline has passed, reads the indoor
//! sensor, writes the temperature text and hands both readings to the
//! [`ColorScheduler`]. Faults never stop the loop; they are absorbed and
//! listed in the [`TickReport`].

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::config::StationConfig;
use crate::poll::SyncSchedule;
use crate::scheduler::{ColorScheduler, DisplayRenderer, RenderInputs};
use crate::sensor::SensorReader;
use crate::telemetry::{self, TelemetrySink};
use crate::time::{ClockSource, UnixTime};
use crate::types::{Fault, Role, TemperatureReading, UnitSystem};
use crate::weather::{FetchOutcome, Location, WeatherCache, WeatherClient};

/// Indoor value text shown before the first reading.
pub const INDOOR_GREETING: &str = "Ho";

/// Outdoor value text shown before the first reading.
pub const OUTDOOR_GREETING: &str = "la";

/// Outdoor value text while no weather report has ever been fetched.
pub const NO_DATA_TEXT: &str = "--";

/// What happened during one [`Station::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Clock reading the tick ran at.
    pub now: UnixTime,

    /// Outcome of the outdoor fetch, if one was due.
    pub fetch: Option<FetchOutcome>,

    /// Readings and lighting condition that were rendered.
    pub inputs: RenderInputs,

    /// Frames rendered by the scheduler.
    pub frames: u32,

    /// Faults absorbed during the tick.
    pub faults: Vec<Fault, 3>,
}

/// Indoor/outdoor thermometer driving a text display.
///
/// # Type Parameters
/// * `R` - Display renderer
/// * `S` - Indoor sensor
/// * `W` - Weather client
/// * `C` - Clock source
/// * `T` - Telemetry sink
pub struct Station<R, S, W, C, T>
where
    R: DisplayRenderer,
    S: SensorReader,
    W: WeatherClient,
    C: ClockSource,
    T: TelemetrySink,
{
    scheduler: ColorScheduler<R>,
    sensor: S,
    weather: W,
    clock: C,
    telemetry: T,
    location: Location,
    units: UnitSystem,
    tick_interval_ms: u32,
    schedule: SyncSchedule,
    cache: WeatherCache,
}

impl<R, S, W, C, T> Station<R, S, W, C, T>
where
    R: DisplayRenderer,
    S: SensorReader,
    W: WeatherClient,
    C: ClockSource,
    T: TelemetrySink,
{
    /// Creates a station and draws the static layout: role labels, unit
    /// markers and the boot greeting in the value slots.
    pub fn new(
        config: StationConfig,
        renderer: R,
        sensor: S,
        weather: W,
        clock: C,
        telemetry: T,
    ) -> Self {
        let mut scheduler = ColorScheduler::new(renderer, config.scheduler, config.thresholds);
        draw_layout(scheduler.renderer_mut(), config.units);

        Self {
            scheduler,
            sensor,
            weather,
            clock,
            telemetry,
            location: config.location,
            units: config.units,
            tick_interval_ms: config.tick_interval_ms,
            schedule: SyncSchedule::new(config.refresh_interval_secs),
            cache: WeatherCache::new(),
        }
    }

    /// Runs one poll-and-render iteration.
    ///
    /// Blocks for the duration of any color transition (frame delays go
    /// through `delay`) but not for the tick interval itself.
    pub fn tick<D: DelayNs>(&mut self, delay: &mut D) -> TickReport {
        let now = self.clock.now();
        let mut faults = Vec::new();

        let fetch = if self.schedule.poll(now) {
            let outcome = self.refresh_outdoor();
            if let Some(fault) = outcome.fault() {
                let _ = faults.push(fault);
            }
            Some(outcome)
        } else {
            None
        };

        let outdoor = self.cache.reading(self.units);
        let indoor = match self.read_indoor() {
            Ok(reading) => Some(reading),
            Err(fault) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("skipping indoor update: {}", fault);
                let _ = faults.push(fault);
                None
            }
        };

        let renderer = self.scheduler.renderer_mut();
        match &outdoor {
            Some(reading) => {
                renderer.set_text(Role::Outdoor.value_slot(), &reading.display_text(Role::Outdoor))
            }
            None => renderer.set_text(Role::Outdoor.value_slot(), NO_DATA_TEXT),
        }
        if let Some(reading) = &indoor {
            renderer.set_text(Role::Indoor.value_slot(), &reading.display_text(Role::Indoor));
        }

        let inputs = RenderInputs {
            outdoor,
            indoor,
            day_night: self.cache.day_night(now),
        };
        let frames = self.scheduler.render_tick(&inputs, delay);

        TickReport {
            now,
            fetch,
            inputs,
            frames,
            faults,
        }
    }

    /// Ticks forever, sleeping the tick interval between iterations.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        loop {
            self.tick(delay);
            delay.delay_ms(self.tick_interval_ms);
        }
    }

    /// Fetches outdoor conditions into the cache.
    fn refresh_outdoor(&mut self) -> FetchOutcome {
        #[cfg(feature = "defmt")]
        defmt::info!("fetching outdoor conditions ({})", self.units.as_str());

        let outcome = self.cache.update(self.weather.fetch(&self.location, self.units));
        match outcome {
            FetchOutcome::Fresh => {
                if let Some(reading) = self.cache.reading(self.units) {
                    self.push_metric(telemetry::OUTDOOR_TEMPERATURE, reading.value());
                }
            }
            FetchOutcome::Stale(_fault) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("outdoor fetch failed, keeping last report: {}", _fault);
            }
            FetchOutcome::Missing(_fault) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("outdoor fetch failed, no report yet: {}", _fault);
            }
        }
        outcome
    }

    /// Reads the indoor sensor in the configured units.
    fn read_indoor(&mut self) -> Result<TemperatureReading, Fault> {
        let celsius = self.sensor.read_celsius().map_err(Fault::Sensor)?;
        let reading = TemperatureReading::from_celsius(celsius, self.units)
            .map_err(|_| Fault::MalformedReading(Role::Indoor))?;
        self.push_metric(telemetry::INDOOR_TEMPERATURE, reading.value());
        Ok(reading)
    }

    /// Best-effort telemetry push.
    fn push_metric(&mut self, metric: &str, value: f32) {
        if let Err(_err) = self.telemetry.push(metric, value) {
            #[cfg(feature = "defmt")]
            defmt::warn!("telemetry push for {} failed: {}", metric, _err);
        }
    }

    /// Returns the color scheduler.
    pub fn scheduler(&self) -> &ColorScheduler<R> {
        &self.scheduler
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        self.scheduler.renderer()
    }

    /// Returns the last-known-good weather cache.
    pub fn weather_cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Returns the outdoor sync schedule.
    pub fn sync_schedule(&self) -> &SyncSchedule {
        &self.schedule
    }

    /// Forces an outdoor fetch on the next tick.
    pub fn request_refresh(&mut self) {
        self.schedule.expire();
    }
}

/// Writes the text that never changes, plus the boot greeting.
fn draw_layout<R: DisplayRenderer>(renderer: &mut R, units: UnitSystem) {
    for role in Role::ALL {
        renderer.set_text(role.label_slot(), role.label());
        renderer.set_text(role.unit_slot(), units.symbol());
    }
    renderer.set_text(Role::Indoor.value_slot(), INDOOR_GREETING);
    renderer.set_text(Role::Outdoor.value_slot(), OUTDOOR_GREETING);
}
