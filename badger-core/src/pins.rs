//! Pin identity table
//!
//! GPIO | Function        | Notes
//! -----+-----------------+----------------------------------
//!   8  | RTC alarm       | PCF85063A interrupt, wakes the badge
//!  10  | ENABLE_3V3      | Power rail hold, low = power off
//!  11  | Button E / DOWN | Active high, pull-down
//!  12  | Button A        | Active high, pull-down
//!  13  | Button B        | Active high, pull-down
//!  14  | Button C        | Active high, pull-down
//!  15  | Button D / UP   | Active high, pull-down
//!  17  | EPD CS          | UC8151 chip select
//!  18  | EPD CLK         | SPI clock
//!  19  | EPD MOSI        | SPI data out
//!  20  | EPD DC          | Data/command select
//!  21  | EPD RESET       | Reset (active low)
//!  22  | LED             | Status LED, PWM
//!  24  | VBUS_DETECT     | USB power present
//!  26  | EPD BUSY        | Busy signal from display
//!  29  | BATTERY         | Battery voltage (ADC3)

// ----- Wake / power -----
pub const RTC: u8 = 8;
pub const ENABLE_3V3: u8 = 10;

// ----- Buttons -----
pub const A: u8 = 12;
pub const B: u8 = 13;
pub const C: u8 = 14;
pub const D: u8 = 15;
pub const E: u8 = 11;
pub const UP: u8 = D;
pub const DOWN: u8 = E;

// ----- E-Paper Display -----
pub const CS: u8 = 17;
pub const CLK: u8 = 18;
pub const MOSI: u8 = 19;
pub const DC: u8 = 20;
pub const RESET: u8 = 21;
pub const BUSY: u8 = 26;

// ----- Misc -----
pub const VBUS_DETECT: u8 = 24;
pub const LED: u8 = 22;
pub const BATTERY: u8 = 29;

/// CYW43 GPIO driving the on-module LED (not an RP2040 pin)
pub const WL_GPIO_LED: u8 = 0;

/// Named pins, aliases included
///
/// Several names may resolve to the same GPIO.
pub const PIN_NAMES: [(&str, u8); 18] = [
    ("RTC", RTC),
    ("A", A),
    ("B", B),
    ("C", C),
    ("D", D),
    ("E", E),
    ("UP", UP),
    ("DOWN", DOWN),
    ("CS", CS),
    ("CLK", CLK),
    ("MOSI", MOSI),
    ("DC", DC),
    ("RESET", RESET),
    ("BUSY", BUSY),
    ("VBUS_DETECT", VBUS_DETECT),
    ("LED", LED),
    ("BATTERY", BATTERY),
    ("ENABLE_3V3", ENABLE_3V3),
];

/// Look up a GPIO number by pin name (case-insensitive)
pub fn gpio_by_name(name: &str) -> Option<u8> {
    PIN_NAMES
        .iter()
        .find(|(pin_name, _)| pin_name.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, gpio)| gpio)
}
