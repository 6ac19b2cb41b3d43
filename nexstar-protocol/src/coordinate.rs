use std::fmt;

use crate::error::{NexStarError, Result};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Hemisphere flag byte for north/east.
const FLAG_POSITIVE: u8 = 0;
/// Hemisphere flag byte for south/west.
const FLAG_NEGATIVE: u8 = 1;

/// An angle split into whole degrees, minutes and seconds plus a sign.
///
/// Wire format: `<deg> <min> <sec> <flag>` where flag 1 means negative
/// (south or west) and anything else means positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub negative: bool,
}

impl Dms {
    /// Split decimal degrees into DMS by truncation at each step.
    ///
    /// Truncation (not rounding) is what the hand controller expects, so
    /// the result is biased toward zero by up to one arc-second.
    /// Callers must range-check first; magnitudes above 255 saturate.
    pub fn from_degrees(value: f64) -> Self {
        let abs = value.abs();
        let degrees = abs.trunc();
        let minutes = (60.0 * (abs - degrees)).trunc();
        let seconds = (3600.0 * (abs - degrees) - 60.0 * minutes).trunc();
        Self {
            degrees: degrees as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
            negative: value < 0.0,
        }
    }

    /// Convert back to signed decimal degrees.
    pub fn to_degrees(self) -> f64 {
        let magnitude = f64::from(self.degrees)
            + f64::from(self.minutes) / 60.0
            + f64::from(self.seconds) / 3600.0;
        if self.negative { -magnitude } else { magnitude }
    }

    pub fn from_wire(bytes: [u8; 4]) -> Self {
        Self {
            degrees: bytes[0],
            minutes: bytes[1],
            seconds: bytes[2],
            negative: bytes[3] == FLAG_NEGATIVE,
        }
    }

    pub fn to_wire(self) -> [u8; 4] {
        let flag = if self.negative {
            FLAG_NEGATIVE
        } else {
            FLAG_POSITIVE
        };
        [self.degrees, self.minutes, self.seconds, flag]
    }
}

/// A geographic location in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    /// Latitude, negative = South.
    pub latitude: f64,
    /// Longitude, negative = West.
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    fn validate(&self) -> Result<()> {
        check_range(self.latitude, MAX_LATITUDE)?;
        check_range(self.longitude, MAX_LONGITUDE)
    }

    /// Decode the 8-byte location payload (latitude DMS+flag, then longitude).
    pub fn from_wire(bytes: [u8; 8]) -> Self {
        let lat = Dms::from_wire([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let lng = Dms::from_wire([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Self {
            latitude: lat.to_degrees(),
            longitude: lng.to_degrees(),
        }
    }

    /// Encode to the 8-byte location payload.
    pub fn to_wire(&self) -> Result<[u8; 8]> {
        self.validate()?;
        let lat = Dms::from_degrees(self.latitude).to_wire();
        let lng = Dms::from_degrees(self.longitude).to_wire();
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&lat);
        bytes[4..].copy_from_slice(&lng);
        Ok(bytes)
    }
}

fn check_range(value: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value.abs() > max {
        return Err(NexStarError::InvalidCoordinate(value));
    }
    Ok(())
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
