//! Wall-clock abstraction.

/// Seconds since the Unix epoch, UTC.
pub type UnixTime = u64;

/// Trait for abstracting the wall clock.
///
/// Implement this over an RTC, an NTP-synchronized counter or a time
/// service. Sunrise and sunset comparisons use the same epoch, so the
/// source must report UTC seconds.
pub trait ClockSource {
    /// Returns the current Unix time in seconds.
    fn now(&self) -> UnixTime;
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now(&self) -> UnixTime {
        (**self).now()
    }
}
