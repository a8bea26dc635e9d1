//! Display interface using SPI
use crate::config::Timing;
use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// The connection interface of the UC8157 controller
///
/// Owns the bus and the control lines. Chip select is driven by the [`SpiDevice`]
/// implementation, one transaction per [`DisplayInterface::cmd`] or
/// [`DisplayInterface::data`] call.
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// Low while the controller is busy, high when idle
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider for resets and busy polling
    delay: DELAY,
    timing: Timing,
    /// Controller is (or is about to be) in deep sleep and needs a reset before the next access
    sleeping: bool,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// Create the interface, the controller state is unknown so it counts as sleeping
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY, timing: Timing) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            timing,
            sleeping: true,
        }
    }

    /// Next bus access will reset the controller first
    pub(crate) fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub(crate) fn mark_sleeping(&mut self) {
        self.sleeping = true;
    }

    pub(crate) fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Give back the bus, the pins and the delay provider
    pub(crate) fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Put the reset line into its idle (high) level
    pub(crate) fn init(&mut self) -> Result<(), DisplayError> {
        log::debug!("Setting reset line idle");
        self.rst.set_high().map_err(|_| DisplayError::RSError)
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        log::debug!("Command 0x{:02X}", command);
        self.write(command, false)
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.write_all(data, true)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    fn write(&mut self, value: u8, data: bool) -> Result<(), DisplayError> {
        self.write_all(&[value], data)
    }

    /// Every bus access goes through here.
    ///
    /// A controller in deep sleep ignores the bus until it sees a reset pulse: while
    /// sleeping, reset first.
    fn write_all(&mut self, bytes: &[u8], data: bool) -> Result<(), DisplayError> {
        if self.sleeping {
            self.reset()?;
        }

        // low for commands, high for data
        if data {
            self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        } else {
            self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        }

        match self.spi.write(bytes) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("SPI write error ({} bytes): {:?}", bytes.len(), e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Pulse the reset line and wait for the controller to come up.
    ///
    /// Always leaves the sleeping state, even if the busy line never releases.
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        let reset_ms = self.timing.reset_ms;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(reset_ms);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        log::debug!("Reset pulse done");

        self.wait_until_idle(reset_ms);
        self.sleeping = false;
        Ok(())
    }

    /// Poll the busy line until it reads high (idle) or the budget is used up.
    ///
    /// Returns `false` on timeout. A failed pin read counts as busy for that poll.
    pub(crate) fn wait_until_idle(&mut self, budget_ms: u32) -> bool {
        let iterations = self.timing.poll_iterations(budget_ms);
        let mut remaining = iterations;
        loop {
            self.delay.delay_us(self.timing.busy_poll_interval_us);
            remaining -= 1;
            if self.busy.is_high().unwrap_or(false) {
                log::debug!(
                    "Idle after {} of {} polls",
                    iterations - remaining,
                    iterations
                );
                return true;
            }
            if remaining == 0 {
                log::warn!("Busy line still low after {} polls", iterations);
                return false;
            }
        }
    }
}
