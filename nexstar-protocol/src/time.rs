use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};

use crate::error::{NexStarError, Result};

/// The mount stores the year as an offset from this one.
pub const EPOCH_YEAR: u16 = 2000;
/// Last year representable on the wire (a single byte, 0–99).
pub const MAX_YEAR: u16 = 2099;

const SECONDS_PER_HOUR: i32 = 3600;

/// Decode the UTC offset byte, an 8-bit two's-complement value.
///
/// 0–127 are non-negative hours, 128–255 map to `value - 256` (-128..=-1).
pub fn decode_utc_offset(byte: u8) -> i8 {
    let value = i16::from(byte);
    let signed = if value < 128 { value } else { value - 256 };
    // -128..=127 by construction.
    signed as i8
}

/// Encode a signed hour offset as the two's-complement wire byte.
///
/// Negative offsets become `offset + 256`; non-negative ones pass through.
pub fn encode_utc_offset(offset: i8) -> u8 {
    let value = i16::from(offset);
    let unsigned = if value < 0 { value + 256 } else { value };
    // 0..=255 by construction.
    unsigned as u8
}

/// The mount's clock: local date and time, offset from UTC in whole
/// hours, and whether daylight saving is in effect.
///
/// Wire format (8 payload bytes):
/// `<hour> <min> <sec> <month> <day> <year-2000> <utc_offset> <dst>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Hours east of UTC.
    pub utc_offset: i8,
    pub dst: bool,
}

impl MountTime {
    pub fn from_wire(bytes: [u8; 8]) -> Self {
        Self {
            hour: bytes[0],
            minute: bytes[1],
            second: bytes[2],
            month: bytes[3],
            day: bytes[4],
            year: EPOCH_YEAR + u16::from(bytes[5]),
            utc_offset: decode_utc_offset(bytes[6]),
            dst: bytes[7] != 0,
        }
    }

    /// Encode to the 8-byte payload of the set-time command.
    pub fn to_wire(&self) -> Result<[u8; 8]> {
        self.validate()?;
        Ok([
            self.hour,
            self.minute,
            self.second,
            self.month,
            self.day,
            (self.year - EPOCH_YEAR) as u8,
            encode_utc_offset(self.utc_offset),
            u8::from(self.dst),
        ])
    }

    fn validate(&self) -> Result<()> {
        check_field(
            "year",
            i32::from(self.year),
            i32::from(EPOCH_YEAR),
            i32::from(MAX_YEAR),
        )?;
        check_field("month", i32::from(self.month), 1, 12)?;
        check_field("day", i32::from(self.day), 1, 31)?;
        check_field("hour", i32::from(self.hour), 0, 23)?;
        check_field("minute", i32::from(self.minute), 0, 59)?;
        check_field("second", i32::from(self.second), 0, 59)
    }

    /// Build a mount time from a chrono timestamp.
    ///
    /// The offset must be a whole number of hours; the mount has no
    /// finer resolution.
    pub fn from_datetime(datetime: &DateTime<FixedOffset>, dst: bool) -> Result<Self> {
        let offset_seconds = datetime.offset().local_minus_utc();
        if offset_seconds % SECONDS_PER_HOUR != 0 {
            return Err(NexStarError::InvalidTime {
                field: "utc_offset",
                value: offset_seconds,
            });
        }
        let utc_offset = (offset_seconds / SECONDS_PER_HOUR) as i8;

        let year = u16::try_from(datetime.year())
            .ok()
            .filter(|y| (EPOCH_YEAR..=MAX_YEAR).contains(y))
            .ok_or(NexStarError::InvalidTime {
                field: "year",
                value: datetime.year(),
            })?;

        Ok(Self {
            year,
            month: datetime.month() as u8,
            day: datetime.day() as u8,
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
            second: datetime.second() as u8,
            utc_offset,
            dst,
        })
    }

    /// Convert to a chrono timestamp. The DST flag is informational and
    /// does not shift the result.
    pub fn to_datetime(&self) -> Result<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(i32::from(self.utc_offset) * SECONDS_PER_HOUR)
            .ok_or(NexStarError::InvalidDateTime)?;
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
        })
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .ok_or(NexStarError::InvalidDateTime)
    }
}

fn check_field(field: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(NexStarError::InvalidTime { field, value });
    }
    Ok(())
}

/// `YYYY-MM-DDThh:mm:ss±HH:00`
impl fmt::Display for MountTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.utc_offset < 0 { '-' } else { '+' };
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:00",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            self.utc_offset.unsigned_abs()
        )
    }
}
