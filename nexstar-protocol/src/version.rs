use std::fmt;

/// A firmware version as reported by `V` or a pass-through version query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    pub fn from_wire(bytes: [u8; 2]) -> Self {
        Self {
            major: bytes[0],
            minor: bytes[1],
        }
    }
}

/// `major.minor`, each as a plain decimal number.
impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FirmwareVersion::from_wire([4, 21]).to_string(), "4.21");
        assert_eq!(FirmwareVersion::from_wire([1, 0]).to_string(), "1.0");
    }

    #[test]
    fn test_ordering() {
        assert!(FirmwareVersion::from_wire([4, 21]) > FirmwareVersion::from_wire([4, 3]));
    }
}
