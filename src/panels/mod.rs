//! Panel models driven by the UC8157
//!
//! Everything that differs between modules using the same controller: resolution,
//! panel setting register values and the waveform tables for partial refresh.

/// 1.02in 80x128 Black/White
pub mod gdew0102t4;

/// Static description of one panel model
#[derive(Debug)]
pub struct Panel {
    /// Native width in pixels (source lines)
    pub width: u16,
    /// Native height in pixels (gate lines)
    pub height: u16,
    /// Panel Setting value for refreshes with the built-in waveform
    pub psr_full: u8,
    /// Panel Setting value for refreshes with the register LUTs
    pub psr_partial: u8,
    /// Waveform for transitions to white
    pub lut_white: &'static [u8],
    /// Waveform for transitions to black
    pub lut_black: &'static [u8],
}

impl Panel {
    /// Size of one frame in bytes
    pub const fn buffer_len(&self) -> usize {
        buffer_len(self.width as usize, self.height as usize)
    }
}

/// Supported panel models
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelModel {
    /// Good Display GDEW0102T4, 1.02in 80x128
    #[default]
    Gdew0102t4,
}

impl PanelModel {
    /// Geometry and waveform tables of the model
    pub fn panel(self) -> &'static Panel {
        match self {
            PanelModel::Gdew0102t4 => &gdew0102t4::PANEL,
        }
    }
}

/// Computes the needed buffer length. Takes care of rounding up in case width
/// is not divisible by 8.
#[must_use]
pub const fn buffer_len(width: usize, height: usize) -> usize {
    width.div_ceil(8) * height
}
