/// Register payloads for the UC8157 commands used by this driver.
///
/// Values are the ones the GDEW0102T4 module needs; resolution dependent values live in
/// [`crate::panels::Panel`] instead.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Deep Sleep (0x07) check code
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

    // Auto Sequence (0x17): PON, DRF, POF, DSLP
    pub const AUTO_PON_DRF_POF_DSLP: u8 = 0xA7;

    // VCOM and Data Interval (0x50), hardware LUT mode
    // VBD border: 10 = LUTW, 01 = LUTB; DDX 01; CDI 111 (2 hsync)
    pub const CDI_BORDER_WHITE: u8 = 0x97;
    pub const CDI_BORDER_BLACK: u8 = 0x57;
    // VBD 11 (floating border), DDX 11 (only changed pixels), CDI 010 (5 hsync)
    pub const CDI_REGISTER_LUT: u8 = 0xF2;

    // PLL Control (0x30)
    pub const PLL_50HZ: u8 = 0x13;
    pub const PLL_15HZ: u8 = 0x05;

    // Undocumented (0xD2) value
    pub const UNDOCUMENTED_D2_VALUE: u8 = 0x3F;

    // Panel Setting (0x00) bits
    pub const PSR_RES_80X128: u8 = 0x40;
    pub const PSR_REG_LUT: u8 = 0x20;
    pub const PSR_BASE_HW_LUT: u8 = 0x1F;
    pub const PSR_BASE_REG_LUT: u8 = 0x0F;
}
