use std::fmt;

use crate::error::{NexStarError, Result};

/// Mount model reported by the `m` command.
///
/// Codes 2 and 8 are unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    GpsSeries,
    ISeries,
    ISeriesSe,
    Cge,
    AdvancedGt,
    Slt,
    Cpc,
    Gt,
    Se46,
    Se68,
}

impl Model {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::GpsSeries),
            3 => Ok(Self::ISeries),
            4 => Ok(Self::ISeriesSe),
            5 => Ok(Self::Cge),
            6 => Ok(Self::AdvancedGt),
            7 => Ok(Self::Slt),
            9 => Ok(Self::Cpc),
            10 => Ok(Self::Gt),
            11 => Ok(Self::Se46),
            12 => Ok(Self::Se68),
            _ => Err(NexStarError::UnknownModel(code)),
        }
    }

    /// Human-readable model name.
    pub fn name(self) -> &'static str {
        match self {
            Self::GpsSeries => "GPS Series",
            Self::ISeries => "i-Series",
            Self::ISeriesSe => "i-Series SE",
            Self::Cge => "CGE",
            Self::AdvancedGt => "Advanced GT",
            Self::Slt => "SLT",
            Self::Cpc => "CPC",
            Self::Gt => "GT",
            Self::Se46 => "4/6 SE",
            Self::Se68 => "6/8 SE",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
