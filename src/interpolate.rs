//! Bounded per-channel stepping from one color toward another.
//!
//! Each call moves every channel at most `delta` toward its target and
//! snaps onto the target instead of overshooting, so repeated calls reach
//! the target exactly and then stay there.

use core::num::NonZeroU8;

use crate::colors::{Palette, Rgb};
use crate::types::Bucket;

/// Moves a single channel `delta` toward `to`, clamping at `to`.
#[inline]
pub fn step_channel(from: u8, to: u8, delta: NonZeroU8) -> u8 {
    let delta = delta.get();
    if from < to {
        if to - from <= delta { to } else { from + delta }
    } else if from > to {
        if from - to <= delta { to } else { from - delta }
    } else {
        from
    }
}

/// Moves every channel of `from` one step toward `to`.
#[inline]
pub fn step(from: Rgb, to: Rgb, delta: NonZeroU8) -> Rgb {
    Rgb::new(
        step_channel(from.red, to.red, delta),
        step_channel(from.green, to.green, delta),
        step_channel(from.blue, to.blue, delta),
    )
}

/// Steps every bucket of `from` toward the same bucket of `to`.
pub fn step_palette(from: &Palette, to: &Palette, delta: NonZeroU8) -> Palette {
    let mut next = *from;
    for bucket in Bucket::ALL {
        *next.color_mut(bucket) = step(from.color(bucket), to.color(bucket), delta);
    }
    next
}

/// Number of [`step`] calls needed to turn `from` into `to`.
///
/// This is `ceil(d / delta)` where `d` is the largest channel distance.
pub fn steps_to_converge(from: Rgb, to: Rgb, delta: NonZeroU8) -> u32 {
    let distance = from
        .red
        .abs_diff(to.red)
        .max(from.green.abs_diff(to.green))
        .max(from.blue.abs_diff(to.blue)) as u32;
    distance.div_ceil(delta.get() as u32)
}

/// Number of [`step_palette`] calls needed to turn `from` into `to`.
pub fn palette_steps_to_converge(from: &Palette, to: &Palette, delta: NonZeroU8) -> u32 {
    Bucket::ALL
        .iter()
        .map(|&bucket| steps_to_converge(from.color(bucket), to.color(bucket), delta))
        .max()
        .unwrap_or(0)
}
