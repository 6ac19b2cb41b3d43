use std::fmt;

/// Device code bytes for the pass-through command.
pub mod code {
    /// Azimuth / right ascension motor controller.
    pub const AZM_RA: u8 = 0x10;
    /// Altitude / declination motor controller.
    pub const ALT_DEC: u8 = 0x11;
    /// GPS unit.
    pub const GPS: u8 = 0xB0;
    /// Real-time clock.
    pub const RTC: u8 = 0xB2;
}

/// A sub-assembly addressable through the pass-through (`P`) command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    AzmRa,
    AltDec,
    Gps,
    Rtc,
}

impl Device {
    pub const ALL: [Device; 4] = [Device::AzmRa, Device::AltDec, Device::Gps, Device::Rtc];

    pub fn code(self) -> u8 {
        match self {
            Self::AzmRa => code::AZM_RA,
            Self::AltDec => code::ALT_DEC,
            Self::Gps => code::GPS,
            Self::Rtc => code::RTC,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AzmRa => write!(f, "AZM/RA"),
            Self::AltDec => write!(f, "ALT/DEC"),
            Self::Gps => write!(f, "GPS"),
            Self::Rtc => write!(f, "RTC"),
        }
    }
}
