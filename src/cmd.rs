pub struct Cmd;
#[allow(dead_code)]
impl Cmd {
    // Configuration
    pub const PANEL_SETTING: u8 = 0x00;
    pub const POWER_SETTING: u8 = 0x01;
    pub const CHARGE_PUMP_SETTING: u8 = 0x06;
    pub const LUT_OPTION: u8 = 0x2A;
    pub const PLL_CONTROL: u8 = 0x30;
    pub const VCOM_DATA_INTERVAL: u8 = 0x50;
    pub const TCON_SETTING: u8 = 0x60;
    pub const VCOM_DC_SETTING: u8 = 0x82;
    pub const POWER_SAVING: u8 = 0xE3;
    /// Not in the datasheet, required before loading register LUTs
    pub const UNDOCUMENTED_D2: u8 = 0xD2;

    // Power
    pub const POWER_OFF: u8 = 0x02;
    pub const POWER_ON: u8 = 0x04;
    pub const DEEP_SLEEP: u8 = 0x07;

    // Update
    pub const DATA_START_TRANSMISSION_1: u8 = 0x10;
    pub const DISPLAY_REFRESH: u8 = 0x12;
    pub const DATA_START_TRANSMISSION_2: u8 = 0x13;
    pub const AUTO_SEQUENCE: u8 = 0x17;
    pub const LUT_WHITE: u8 = 0x23;
    pub const LUT_BLACK: u8 = 0x24;

    // Partial window
    pub const PARTIAL_WINDOW: u8 = 0x90;
    pub const PARTIAL_IN: u8 = 0x91;
    pub const PARTIAL_OUT: u8 = 0x92;
}

/*
Good Display GDEW0102T4 example code uses:
0xD2 - (undocumented) before partial LUT upload
0x00 - Panel Setting
0x50 - VCOM and Data Interval Setting
0x30 - PLL Control
0x23 / 0x24 - LUT for white / black transitions
0x10 / 0x13 - Old / new frame data
0x04, 0x12, 0x02 - Power on, refresh, power off
0x17 - Auto sequence
0x07 - Deep sleep
*/
