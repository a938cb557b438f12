//! Display color scheduling with smooth day/night transitions.
//!
//! Provides [`ColorScheduler`], which owns the live bucket colors, walks them
//! toward the day or night palette a bounded step per frame and pushes the
//! classified color of each reading to that reading's slots. Also defines
//! the [`DisplayRenderer`] trait for hardware abstraction.

use core::num::NonZeroU8;

use embedded_hal::delay::DelayNs;

use crate::classify::ThresholdTable;
use crate::colors::{DAY_PALETTE, NIGHT_PALETTE, Palette, Rgb};
use crate::interpolate;
use crate::types::{DayNight, Role, SlotIndex, TemperatureReading};

/// Default per-frame channel increment.
pub const DEFAULT_STEP_DELTA: NonZeroU8 = match NonZeroU8::new(5) {
    Some(delta) => delta,
    None => unreachable!(),
};

/// Default pause between transition frames.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 20;

/// Trait for abstracting the text display.
///
/// Implement this for your matrix driver to let the scheduler write text
/// and colors into its slots. Glyph layout and positioning belong to the
/// implementation. Handle hardware errors internally - these methods
/// cannot fail.
pub trait DisplayRenderer {
    /// Replaces the text shown in `slot`.
    fn set_text(&mut self, slot: SlotIndex, text: &str);

    /// Sets the text color of `slot`.
    ///
    /// Use [`colors::to_hex`](crate::colors::to_hex) if the driver expects
    /// `#rrggbb` strings.
    fn set_text_color(&mut self, slot: SlotIndex, color: Rgb);
}

impl<R: DisplayRenderer + ?Sized> DisplayRenderer for &mut R {
    fn set_text(&mut self, slot: SlotIndex, text: &str) {
        (**self).set_text(slot, text)
    }

    fn set_text_color(&mut self, slot: SlotIndex, color: Rgb) {
        (**self).set_text_color(slot, color)
    }
}

/// Timing information returned by [`ColorScheduler::service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderTiming {
    /// Colors moved one step and have not reached the target palette.
    /// Service again after the frame delay.
    Transitioning,

    /// Colors match the target palette and the final push has been made.
    /// Nothing more to do until the next tick.
    Settled,
}

/// Colors and pacing for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Target palette between sunrise and sunset.
    pub day: Palette,

    /// Target palette outside daylight.
    pub night: Palette,

    /// Live colors at power-on.
    pub initial: Palette,

    /// Largest per-channel change per frame.
    pub step_delta: NonZeroU8,

    /// Pause between transition frames.
    pub frame_delay_ms: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day: DAY_PALETTE,
            night: NIGHT_PALETTE,
            initial: NIGHT_PALETTE,
            step_delta: DEFAULT_STEP_DELTA,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

/// What one render tick should show.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderInputs {
    /// Outdoor reading, `None` when there is nothing valid to classify.
    pub outdoor: Option<TemperatureReading>,

    /// Indoor reading, `None` when the sensor failed or returned garbage.
    pub indoor: Option<TemperatureReading>,

    /// Selects the target palette.
    pub day_night: DayNight,
}

impl RenderInputs {
    /// Reading for `role`.
    pub fn reading(&self, role: Role) -> Option<&TemperatureReading> {
        match role {
            Role::Indoor => self.indoor.as_ref(),
            Role::Outdoor => self.outdoor.as_ref(),
        }
    }
}

/// Drives the display's bucket colors and slot coloring.
///
/// The scheduler owns the renderer and the live palette. Each call to
/// [`service`](Self::service) is one frame: if the live palette differs from
/// the target palette in any channel it moves one step closer, then the
/// classified colors are pushed to the slots. [`render_tick`](Self::render_tick)
/// repeats frames until the palette settles.
///
/// # Type Parameters
/// * `R` - Renderer implementation type
pub struct ColorScheduler<R: DisplayRenderer> {
    renderer: R,
    config: SchedulerConfig,
    thresholds: ThresholdTable,
    current: Palette,
    day_night: Option<DayNight>,
}

impl<R: DisplayRenderer> ColorScheduler<R> {
    /// Creates a scheduler with the live colors set to `config.initial`.
    pub fn new(renderer: R, config: SchedulerConfig, thresholds: ThresholdTable) -> Self {
        Self {
            renderer,
            current: config.initial,
            config,
            thresholds,
            day_night: None,
        }
    }

    /// Runs one frame.
    ///
    /// # Returns
    /// - `RenderTiming::Transitioning` - Colors stepped and pushed; call again after the frame delay
    /// - `RenderTiming::Settled` - Colors already at the target; final push made
    pub fn service(&mut self, inputs: &RenderInputs) -> RenderTiming {
        if self.day_night != Some(inputs.day_night) {
            #[cfg(feature = "defmt")]
            defmt::info!("switching to {} palette", inputs.day_night);
            self.day_night = Some(inputs.day_night);
        }

        let target = *self.target_palette(inputs.day_night);
        if self.current != target {
            self.current = interpolate::step_palette(&self.current, &target, self.config.step_delta);
            self.push_colors(inputs);
            RenderTiming::Transitioning
        } else {
            self.push_colors(inputs);
            RenderTiming::Settled
        }
    }

    /// Runs frames until the live palette equals the target palette,
    /// sleeping `frame_delay_ms` after every transition frame.
    ///
    /// Always ends with one push at the settled colors, so the slots reflect
    /// the latest readings even when no transition was needed.
    ///
    /// Returns the number of frames rendered.
    pub fn render_tick<D: DelayNs>(&mut self, inputs: &RenderInputs, delay: &mut D) -> u32 {
        let mut frames = 0;
        loop {
            frames += 1;
            match self.service(inputs) {
                RenderTiming::Transitioning => delay.delay_ms(self.config.frame_delay_ms),
                RenderTiming::Settled => break,
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("render tick settled after {} frames", frames);

        frames
    }

    /// Pushes the live color of each classified reading to its role's slots.
    fn push_colors(&mut self, inputs: &RenderInputs) {
        for role in Role::ALL {
            let Some(reading) = inputs.reading(role) else {
                continue;
            };
            let bucket = self.thresholds.classify_reading(reading, role);
            let color = self.current.color(bucket);
            for slot in role.slots() {
                self.renderer.set_text_color(slot, color);
            }
        }
    }

    /// Palette the live colors converge to for `day_night`.
    pub fn target_palette(&self, day_night: DayNight) -> &Palette {
        if day_night.is_dim() {
            &self.config.night
        } else {
            &self.config.day
        }
    }

    /// Returns true if the live colors already match the target for `day_night`.
    pub fn is_settled(&self, day_night: DayNight) -> bool {
        self.current == *self.target_palette(day_night)
    }

    /// Live bucket colors.
    pub fn current_colors(&self) -> &Palette {
        &self.current
    }

    /// Lighting condition of the most recent frame, if any frame ran.
    pub fn day_night(&self) -> Option<DayNight> {
        self.day_night
    }

    /// Scheduler configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Threshold table used for classification.
    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Returns a reference to the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns a mutable reference to the renderer, for writing text.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
