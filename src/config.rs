//! Runtime configuration: timing budgets, busy polling and refresh defaults

use crate::color::Color;
use embedded_hal::spi::{Mode, MODE_0};

/// SPI mode expected by the controller: clock idle low, sample on the leading edge, MSB first
pub const SPI_MODE: Mode = MODE_0;

/// Recommended SPI clock for the controller
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Timing budgets of the panel, all durations in milliseconds unless noted otherwise.
///
/// The busy line is polled every `busy_poll_interval_us` for at most
/// `max(1, budget * busy_poll_factor)` iterations, so with the defaults a budget is
/// allowed to run twice as long as the datasheet value before it counts as a timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Low pulse on the reset line
    pub reset_ms: u32,
    /// Power on (PON) until the busy line releases
    pub power_on_ms: u32,
    /// Power off (POF) until the busy line releases
    pub power_off_ms: u32,
    /// Refresh using the built-in waveform
    pub full_refresh_ms: u32,
    /// Refresh using the register LUTs
    pub partial_refresh_ms: u32,
    /// Pause between two reads of the busy line (µs)
    pub busy_poll_interval_us: u32,
    /// Number of polls per millisecond of budget
    pub busy_poll_factor: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            reset_ms: 2,
            power_on_ms: 135,
            power_off_ms: 90,
            full_refresh_ms: 3700,
            partial_refresh_ms: 1100,
            busy_poll_interval_us: 1000,
            busy_poll_factor: 2,
        }
    }
}

impl Timing {
    /// Number of busy line polls allowed for a budget of `budget_ms`
    pub fn poll_iterations(&self, budget_ms: u32) -> u32 {
        budget_ms.saturating_mul(self.busy_poll_factor).max(1)
    }

    /// Refresh budget for the selected refresh mode
    pub fn refresh_ms(&self, partial: bool) -> u32 {
        if partial {
            self.partial_refresh_ms
        } else {
            self.full_refresh_ms
        }
    }
}

/// Driver configuration, see [`crate::driver::Uc8157::new`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Timing budgets and busy polling
    pub timing: Timing,
    /// Border color used by full refreshes
    pub border: Color,
    /// Start in partial refresh mode
    pub partial_refresh: bool,
}

impl Config {
    /// Replace the timing budgets
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Select the border color
    pub fn with_border(mut self, border: Color) -> Self {
        self.border = border;
        self
    }

    /// Select the initial refresh mode
    pub fn with_partial_refresh(mut self, partial: bool) -> Self {
        self.partial_refresh = partial;
        self
    }
}
