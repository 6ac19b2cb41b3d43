use crate::coordinate::GeoCoordinate;
use crate::device::Device;
use crate::error::Result;
use crate::time::MountTime;

/// NexStar opcode bytes (ASCII letters).
pub mod opcode {
    /// Get location.
    pub const GET_LOCATION: u8 = b'w';
    /// Set location.
    pub const SET_LOCATION: u8 = b'W';
    /// Get time.
    pub const GET_TIME: u8 = b'h';
    /// Set time.
    pub const SET_TIME: u8 = b'H';
    /// Get hand controller firmware version.
    pub const GET_VERSION: u8 = b'V';
    /// Pass-through to an addressed sub-device.
    pub const PASS_THROUGH: u8 = b'P';
    /// Get mount model.
    pub const GET_MODEL: u8 = b'm';
    /// Is alignment complete?
    pub const IS_ALIGNED: u8 = b'J';
    /// Is a GOTO in progress?
    pub const IS_GOTO_IN_PROGRESS: u8 = b'L';
    /// Cancel a GOTO.
    pub const CANCEL_GOTO: u8 = b'M';
    /// Echo a byte back.
    pub const ECHO: u8 = b'K';
}

/// Pass-through framing for a device version query.
pub mod pass_through {
    /// Number of message bytes that follow the device code.
    pub const MESSAGE_LEN: u8 = 0x01;
    /// Device sub-command: get firmware version.
    pub const GET_VERSION: u8 = 0xFE;
    /// Number of reply bytes the device should return.
    pub const VERSION_REPLY_LEN: u8 = 0x02;
}

/// A NexStar command to send to the hand controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read the site location.
    GetLocation,
    /// Write the site location.
    SetLocation(GeoCoordinate),
    /// Read the mount clock.
    GetTime,
    /// Write the mount clock.
    SetTime(MountTime),
    /// Read the hand controller firmware version.
    GetVersion,
    /// Read the firmware version of a sub-device (pass-through).
    GetDeviceVersion(Device),
    /// Read the mount model code.
    GetModel,
    /// Read the alignment state.
    IsAligned,
    /// Read whether a GOTO slew is running.
    IsGotoInProgress,
    /// Abort a running GOTO.
    CancelGoto,
    /// Ask the controller to echo one byte.
    Echo(u8),
}

impl Command {
    /// Encode this command into the exact bytes to transmit.
    ///
    /// Fails without producing bytes if a set command carries an
    /// out-of-range location or time.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = vec![self.opcode()];
        match self {
            Command::SetLocation(location) => bytes.extend_from_slice(&location.to_wire()?),
            Command::SetTime(time) => bytes.extend_from_slice(&time.to_wire()?),
            Command::GetDeviceVersion(device) => bytes.extend_from_slice(&[
                pass_through::MESSAGE_LEN,
                device.code(),
                pass_through::GET_VERSION,
                0x00,
                0x00,
                0x00,
                pass_through::VERSION_REPLY_LEN,
            ]),
            Command::Echo(byte) => bytes.push(*byte),
            Command::GetLocation
            | Command::GetTime
            | Command::GetVersion
            | Command::GetModel
            | Command::IsAligned
            | Command::IsGotoInProgress
            | Command::CancelGoto => {}
        }
        Ok(bytes)
    }

    /// Return the opcode byte for this command.
    pub fn opcode(&self) -> u8 {
        match self {
            Command::GetLocation => opcode::GET_LOCATION,
            Command::SetLocation(_) => opcode::SET_LOCATION,
            Command::GetTime => opcode::GET_TIME,
            Command::SetTime(_) => opcode::SET_TIME,
            Command::GetVersion => opcode::GET_VERSION,
            Command::GetDeviceVersion(_) => opcode::PASS_THROUGH,
            Command::GetModel => opcode::GET_MODEL,
            Command::IsAligned => opcode::IS_ALIGNED,
            Command::IsGotoInProgress => opcode::IS_GOTO_IN_PROGRESS,
            Command::CancelGoto => opcode::CANCEL_GOTO,
            Command::Echo(_) => opcode::ECHO,
        }
    }

    /// Total reply length in bytes, terminator included.
    pub fn reply_len(&self) -> usize {
        match self {
            Command::GetLocation | Command::GetTime => 9,
            Command::GetVersion | Command::GetDeviceVersion(_) => 3,
            Command::GetModel
            | Command::IsAligned
            | Command::IsGotoInProgress
            | Command::Echo(_) => 2,
            Command::SetLocation(_) | Command::SetTime(_) | Command::CancelGoto => 1,
        }
    }

    /// Short name for log and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetLocation => "GetLocation",
            Command::SetLocation(_) => "SetLocation",
            Command::GetTime => "GetTime",
            Command::SetTime(_) => "SetTime",
            Command::GetVersion => "GetVersion",
            Command::GetDeviceVersion(_) => "GetDeviceVersion",
            Command::GetModel => "GetModel",
            Command::IsAligned => "IsAligned",
            Command::IsGotoInProgress => "IsGotoInProgress",
            Command::CancelGoto => "CancelGoto",
            Command::Echo(_) => "Echo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_queries() {
        assert_eq!(Command::GetLocation.to_bytes().unwrap(), b"w");
        assert_eq!(Command::GetTime.to_bytes().unwrap(), b"h");
        assert_eq!(Command::GetVersion.to_bytes().unwrap(), b"V");
        assert_eq!(Command::GetModel.to_bytes().unwrap(), b"m");
        assert_eq!(Command::IsAligned.to_bytes().unwrap(), b"J");
        assert_eq!(Command::IsGotoInProgress.to_bytes().unwrap(), b"L");
        assert_eq!(Command::CancelGoto.to_bytes().unwrap(), b"M");
    }

    #[test]
    fn test_echo() {
        assert_eq!(Command::Echo(65).to_bytes().unwrap(), vec![b'K', 65]);
    }

    #[test]
    fn test_device_version() {
        let bytes = Command::GetDeviceVersion(Device::AzmRa).to_bytes().unwrap();
        assert_eq!(bytes, vec![b'P', 0x01, 0x10, 0xFE, 0x00, 0x00, 0x00, 0x02]);
        let bytes = Command::GetDeviceVersion(Device::Rtc).to_bytes().unwrap();
        assert_eq!(bytes[2], 0xB2);
    }

    #[test]
    fn test_set_location() {
        let loc = GeoCoordinate::new(10.5, -74.0).unwrap();
        let bytes = Command::SetLocation(loc).to_bytes().unwrap();
        assert_eq!(bytes, vec![b'W', 10, 30, 0, 0, 74, 0, 0, 1]);
    }

    #[test]
    fn test_set_location_rejects_out_of_range() {
        let loc = GeoCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(Command::SetLocation(loc).to_bytes().is_err());
    }

    #[test]
    fn test_set_time() {
        let time = MountTime {
            year: 2024,
            month: 6,
            day: 15,
            hour: 12,
            minute: 0,
            second: 0,
            utc_offset: -4,
            dst: false,
        };
        let bytes = Command::SetTime(time).to_bytes().unwrap();
        assert_eq!(bytes, vec![b'H', 12, 0, 0, 6, 15, 24, 252, 0]);
    }

    #[test]
    fn test_opcode_matches_first_byte() {
        let commands = [
            Command::GetLocation,
            Command::GetVersion,
            Command::GetDeviceVersion(Device::Gps),
            Command::CancelGoto,
            Command::Echo(1),
        ];
        for command in commands {
            assert_eq!(command.to_bytes().unwrap()[0], command.opcode());
        }
    }

    #[test]
    fn test_reply_lengths() {
        assert_eq!(Command::GetLocation.reply_len(), 9);
        assert_eq!(Command::GetTime.reply_len(), 9);
        assert_eq!(Command::GetVersion.reply_len(), 3);
        assert_eq!(Command::GetDeviceVersion(Device::AltDec).reply_len(), 3);
        assert_eq!(Command::GetModel.reply_len(), 2);
        assert_eq!(Command::IsAligned.reply_len(), 2);
        assert_eq!(Command::IsGotoInProgress.reply_len(), 2);
        assert_eq!(Command::Echo(0).reply_len(), 2);
        assert_eq!(Command::CancelGoto.reply_len(), 1);
    }
}
