use super::Panel;
use crate::flag::Flag;

/// Display width for 1.02in display
pub const WIDTH: u16 = 80;
/// Display height for 1.02in display
pub const HEIGHT: u16 = 128;

#[rustfmt::skip]
/// GDEW0102T4 partial refresh LUT for white transitions, Cmd: 0x23 Size: 42
pub const LUT_WHITE: [u8; 42] = [
    0x60, 0x01, 0x01, 0x00, 0x00, 0x01,
    0x80, 0x0F, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
/// GDEW0102T4 partial refresh LUT for black transitions, Cmd: 0x24 Size: 42
pub const LUT_BLACK: [u8; 42] = [
    0x90, 0x01, 0x01, 0x00, 0x00, 0x01,
    0x40, 0x0F, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// GDEW0102T4 module description
pub static PANEL: Panel = Panel {
    width: WIDTH,
    height: HEIGHT,
    // 0x5F: the undocumented variant of the 0x4F default refreshes faster
    psr_full: Flag::PSR_RES_80X128 | Flag::PSR_BASE_HW_LUT,
    psr_partial: Flag::PSR_RES_80X128 | Flag::PSR_REG_LUT | Flag::PSR_BASE_REG_LUT,
    lut_white: &LUT_WHITE,
    lut_black: &LUT_BLACK,
};
