//! UC8157 Display Driver Implementation
//!
//! The driver owns the frame buffer and the controller state and sequences every update.
//!
//! ## Update cycle
//!
//! The controller refreshes differentially: RAM bank 1 holds the image currently on the
//! panel ("old" frame, DTM1), bank 2 the image to show ("new" frame, DTM2).
//!
//! 1. [`Uc8157::new_screen`] makes sure bank 1 holds a valid old frame and clears the buffer
//! 1. draw into the buffer, preferably with [`embedded_graphics`]
//! 1. [`Uc8157::update_screen`] sends the new frame, configures the controller and refreshes
//!
//! ## Power and sleep
//!
//! A blocking update powers the controller on, refreshes and powers it off again while
//! polling the busy line. A non-blocking update hands the whole sequence to the
//! controller's auto sequence (power on, refresh, power off, deep sleep) and returns
//! right away.
//!
//! Deep sleep is tracked in software only. The next bus access after [`Uc8157::sleep`] or a
//! non-blocking update resets the controller, which also aborts a refresh still running
//! on the device. Call [`Uc8157::wait_until_idle`] first if the refresh has to finish.
//!
//! ## Busy timeouts
//!
//! A busy wait that runs out of budget is not an error. After a refresh timeout the
//! controller is treated as asleep, so the next access starts with a reset.

pub use display_interface::DisplayError;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::color::Color;
use crate::config::Config;
use crate::graphics::{DisplayRotation, FrameBuffer, PixelPlane};
use crate::interface::DisplayInterface;
use crate::panels::{Panel, PanelModel};
use crate::{cmd::Cmd, flag::Flag};

/// Region restricted refresh (PTL/PIN/POUT) around the new frame transfer.
///
/// Disabled: not verified against the controller's timing on real panels.
const PARTIAL_WINDOW: bool = false;

/// UC8157 E-Paper Display Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication, owns chip select
/// - `BSY` - BUSY input pin (LOW while the controller is busy)
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `DELAY` - Delay provider for timing
pub struct Uc8157<SPI, BSY, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, BSY, DC, RST, DELAY>,
    frame: FrameBuffer,
    panel: &'static Panel,
    border: Color,
    powered_on: bool,
    display_initialized: bool,
    partial_refresh: bool,
}

impl<SPI, BSY, DC, RST, DELAY> Uc8157<SPI, BSY, DC, RST, DELAY> {
    /// Create the driver, nothing is sent to the controller yet
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spi: SPI,
        busy: BSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        model: PanelModel,
        config: Config,
    ) -> Self {
        let panel = model.panel();
        log::debug!(
            "Creating UC8157 driver for {:?} ({}x{})",
            model,
            panel.width,
            panel.height
        );
        Uc8157 {
            interface: DisplayInterface::new(spi, busy, dc, rst, delay, config.timing),
            frame: FrameBuffer::new(panel.width, panel.height),
            panel,
            border: config.border,
            powered_on: false,
            display_initialized: false,
            partial_refresh: config.partial_refresh,
        }
    }

    /// Select the refresh method used by the next [`Uc8157::update_screen`].
    ///
    /// Good Display recommends a full refresh at least every 5 partial refreshes to keep
    /// ghosting in check. The driver leaves that to the caller.
    pub fn set_partial_refresh(&mut self, partial: bool) {
        self.partial_refresh = partial;
    }

    /// Refresh method used by the next update
    pub fn is_partial_refresh(&self) -> bool {
        self.partial_refresh
    }

    /// Border color used by full refreshes
    pub fn set_border(&mut self, border: Color) {
        self.border = border;
    }

    /// Display is sleeping (or about to sleep), the next access resets it
    pub fn is_sleeping(&self) -> bool {
        self.interface.is_sleeping()
    }

    /// Controller is powered on (between PON and POF)
    pub fn is_powered_on(&self) -> bool {
        self.powered_on
    }

    /// Controller RAM holds a valid old frame
    pub fn is_display_initialized(&self) -> bool {
        self.display_initialized
    }

    /// Sets the rotation used for drawing
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.frame.set_rotation(rotation);
    }

    /// Get the current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.frame.rotation()
    }

    /// The screen buffer
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Returns the raw buffer in native panel orientation
    pub fn buffer(&self) -> &[u8] {
        self.frame.buffer()
    }

    /// Preset the screen buffer with a color, nothing is sent
    pub fn fill(&mut self, color: Color) {
        self.frame.fill(color);
    }

    /// Drop the buffer and give back the bus, the pins and the delay provider
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        self.interface.release()
    }

    fn set_sleep_state(&mut self) {
        self.interface.mark_sleeping();
        self.powered_on = false;
        self.display_initialized = false;
    }
}

impl<SPI, BSY, DC, RST, DELAY> Uc8157<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Put the control lines into their idle levels and clear the buffer (white)
    pub fn init(&mut self) -> Result<(), DisplayError> {
        log::info!("Initializing UC8157 driver");
        self.interface.init()?;
        self.frame.fill(Color::White);
        Ok(())
    }

    /// Fill buffer and display with `color`, blocking for a full refresh (~4 s)
    pub fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        log::info!("Clearing display to {:?}", color);
        self.frame.fill(color);
        self.write_old_screen(None)?;
        self.update_screen(false)
    }

    /// Prepare a new (white) screen buffer
    ///
    /// Sends the current buffer as old frame first if the controller RAM lost it, e.g.
    /// after deep sleep.
    pub fn new_screen(&mut self) -> Result<(), DisplayError> {
        if !self.display_initialized {
            self.write_old_screen(None)?;
        }
        self.frame.fill(Color::White);
        Ok(())
    }

    /// Send the screen buffer to the display and refresh
    ///
    /// - `sleep_after_update == false`: blocking, full ~4000 ms, partial ~1500 ms
    /// - `sleep_after_update == true`: non-blocking (~8 ms), the controller runs power on,
    ///   refresh, power off and deep sleep by itself; check progress with
    ///   [`Uc8157::wait_until_idle`]
    pub fn update_screen(&mut self, sleep_after_update: bool) -> Result<(), DisplayError> {
        log::info!(
            "Updating screen ({} refresh, {})",
            if self.partial_refresh { "partial" } else { "full" },
            if sleep_after_update {
                "non-blocking"
            } else {
                "blocking"
            }
        );
        self.write_screen(None)?;
        self.refresh(sleep_after_update)
    }

    /// Poll the busy line until the display is idle, at most `2 * wait_ms` polls
    ///
    /// Returns `false` on timeout. Useful after a non-blocking update or [`Uc8157::sleep`].
    pub fn wait_until_idle(&mut self, wait_ms: u32) -> bool {
        self.interface.wait_until_idle(wait_ms)
    }

    /// Put display into deep sleep, non-blocking
    pub fn sleep(&mut self) -> Result<(), DisplayError> {
        log::info!("Putting display into deep sleep");
        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK])?;
        // still active until the command is processed
        self.set_sleep_state();
        Ok(())
    }

    /// Send a frame to controller RAM bank 1 (old frame)
    ///
    /// Uses the screen buffer when `buffer` is `None`. Resend after deep sleep to restore
    /// the image the panel currently shows.
    pub fn write_old_screen(&mut self, buffer: Option<&[u8]>) -> Result<(), DisplayError> {
        log::debug!("Writing old screen");
        self.check_len(buffer)?;
        self.interface.cmd(Cmd::DATA_START_TRANSMISSION_1)?;
        self.interface
            .data(buffer.unwrap_or_else(|| self.frame.buffer()))?;
        self.display_initialized = true;
        Ok(())
    }

    /// Send a frame to controller RAM bank 2 (new frame) without refreshing
    ///
    /// Uses the screen buffer when `buffer` is `None`.
    pub fn write_screen(&mut self, buffer: Option<&[u8]>) -> Result<(), DisplayError> {
        log::debug!("Writing screen");
        self.check_len(buffer)?;
        if !self.display_initialized {
            self.write_old_screen(None)?;
        }

        self.init_display()?;

        if PARTIAL_WINDOW && self.partial_refresh {
            self.partial_window_in()?;
        }

        self.interface.cmd(Cmd::DATA_START_TRANSMISSION_2)?;
        self.interface
            .data(buffer.unwrap_or_else(|| self.frame.buffer()))?;

        if PARTIAL_WINDOW && self.partial_refresh {
            self.interface.cmd(Cmd::PARTIAL_OUT)?;
        }
        Ok(())
    }

    fn check_len(&self, buffer: Option<&[u8]>) -> Result<(), DisplayError> {
        match buffer {
            Some(b) if b.len() != self.panel.buffer_len() => {
                log::error!(
                    "Screen buffer has {} bytes, expected {}",
                    b.len(),
                    self.panel.buffer_len()
                );
                Err(DisplayError::OutOfBoundsError)
            }
            _ => Ok(()),
        }
    }

    fn refresh(&mut self, sleep_after_refresh: bool) -> Result<(), DisplayError> {
        if sleep_after_refresh {
            log::debug!("Refresh non-blocking");
            self.interface
                .cmd_with_data(Cmd::AUTO_SEQUENCE, &[Flag::AUTO_PON_DRF_POF_DSLP])?;
            // still active until the auto sequence completes
            self.set_sleep_state();
            return Ok(());
        }

        if !self.powered_on {
            self.power_on()?;
        }
        log::debug!("Refresh");
        self.interface.cmd(Cmd::DISPLAY_REFRESH)?;
        let budget = self.interface.timing().refresh_ms(self.partial_refresh);
        if !self.interface.wait_until_idle(budget) {
            log::warn!("Refresh did not finish within {} ms", budget);
            self.set_sleep_state();
        }
        self.power_off()
    }

    /// Configuration block sent before every new frame
    fn init_display(&mut self) -> Result<(), DisplayError> {
        if self.partial_refresh {
            log::debug!("Init display (partial)");
            self.interface
                .cmd_with_data(Cmd::UNDOCUMENTED_D2, &[Flag::UNDOCUMENTED_D2_VALUE])?;
            self.interface
                .cmd_with_data(Cmd::PANEL_SETTING, &[self.panel.psr_partial])?;
            self.interface
                .cmd_with_data(Cmd::VCOM_DATA_INTERVAL, &[Flag::CDI_REGISTER_LUT])?;
            self.interface
                .cmd_with_data(Cmd::PLL_CONTROL, &[Flag::PLL_15HZ])?;
            self.interface
                .cmd_with_data(Cmd::LUT_WHITE, self.panel.lut_white)?;
            self.interface
                .cmd_with_data(Cmd::LUT_BLACK, self.panel.lut_black)?;
        } else {
            log::debug!("Init display (full)");
            let cdi = match self.border {
                Color::White => Flag::CDI_BORDER_WHITE,
                Color::Black => Flag::CDI_BORDER_BLACK,
            };
            self.interface
                .cmd_with_data(Cmd::PANEL_SETTING, &[self.panel.psr_full])?;
            self.interface
                .cmd_with_data(Cmd::VCOM_DATA_INTERVAL, &[cdi])?;
            self.interface
                .cmd_with_data(Cmd::PLL_CONTROL, &[Flag::PLL_50HZ])?;
        }
        Ok(())
    }

    /// Restrict the next transfer and refresh to the whole panel area
    fn partial_window_in(&mut self) -> Result<(), DisplayError> {
        let x_end = ((self.panel.width - 1) | 0x07) as u8;
        let y_end = (self.panel.height - 1) as u8;
        self.interface.cmd(Cmd::PARTIAL_IN)?;
        self.interface
            .cmd_with_data(Cmd::PARTIAL_WINDOW, &[0, x_end, 0, y_end, 0])
    }

    fn power_on(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd(Cmd::POWER_ON)?;
        log::debug!("Power on");
        let budget = self.interface.timing().power_on_ms;
        self.interface.wait_until_idle(budget);
        self.powered_on = true;
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd(Cmd::POWER_OFF)?;
        log::debug!("Power off");
        let budget = self.interface.timing().power_off_ms;
        self.interface.wait_until_idle(budget);
        self.powered_on = false;
        Ok(())
    }
}

impl<SPI, BSY, DC, RST, DELAY> PixelPlane for Uc8157<SPI, BSY, DC, RST, DELAY> {
    fn width(&self) -> u16 {
        self.frame.width()
    }

    fn height(&self) -> u16 {
        self.frame.height()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.frame.set_pixel(x, y, color);
    }
}

impl<SPI, BSY, DC, RST, DELAY> OriginDimensions for Uc8157<SPI, BSY, DC, RST, DELAY> {
    fn size(&self) -> Size {
        self.frame.size()
    }
}

impl<SPI, BSY, DC, RST, DELAY> DrawTarget for Uc8157<SPI, BSY, DC, RST, DELAY> {
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.frame.fill(color.into());
        Ok(())
    }
}
