//! UC8157 ePaper Display Driver
//!
//! Used in the Good Display GDEW0102T4 1.02" 80x128 black/white module.
//!
//! This driver is losely modeled after the
//! [epd-waveshare](https://github.com/caemor/epd-waveshare) drivers but built around the
//! differential refresh of the UC8157: the controller keeps the previous ("old") frame in
//! RAM and only drives the pixels that change.
//!
//! ### Usage
//! The driver owns one black/white buffer in native panel orientation. To display
//! something you:
//!
//! 1. create the driver with [`driver::Uc8157::new`] and call [`driver::Uc8157::init`]
//! 1. draw onto it, preferably with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. send the frame and refresh using [`driver::Uc8157::update_screen`]
//!
//! ```rust, ignore
//! use uc8157::prelude::*;
//! use embedded_graphics::{prelude::*, primitives::*};
//!
//! let mut epd = Uc8157::new(spi, busy, dc, rst, delay, PanelModel::Gdew0102t4, Config::default());
//! epd.init()?;
//! epd.clear(Color::White)?;
//!
//! epd.set_rotation(DisplayRotation::Rotate90);
//! epd.new_screen()?;
//! Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Black))
//!     .draw(&mut epd)?;
//!
//! // returns after ~8 ms, the display goes to deep sleep on its own
//! epd.update_screen(true)?;
//! ```
//!
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

extern crate alloc;

pub mod color;
pub mod config;
pub mod driver;
pub mod graphics;
pub mod panels;

mod cmd;
mod flag;
mod interface;

/// Useful exports
pub mod prelude {
    pub use crate::color::{Black, Color, White};
    pub use crate::config::{Config, Timing, SPI_FREQUENCY_HZ, SPI_MODE};
    pub use crate::driver::{DisplayError, Uc8157};
    pub use crate::graphics::{DisplayRotation, FrameBuffer, PixelPlane};
    pub use crate::panels::PanelModel;
}
