use log::debug;

use crate::command::Command;
use crate::coordinate::GeoCoordinate;
use crate::error::Result;
use crate::model::Model;
use crate::protocol::{payload_array, validate_reply};
use crate::time::MountTime;
use crate::version::FirmwareVersion;

/// `L` reports a running GOTO as ASCII '1'.
const GOTO_IN_PROGRESS: u8 = b'1';
/// `J` reports a completed alignment as binary 1.
const ALIGNED: u8 = 1;

/// A typed reply from the hand controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Bare terminator acknowledging a set/cancel command.
    Ack,
    /// Site location (response to GetLocation).
    Location(GeoCoordinate),
    /// Mount clock (response to GetTime).
    Time(MountTime),
    /// Firmware version (response to GetVersion or GetDeviceVersion).
    Version(FirmwareVersion),
    /// Mount model (response to GetModel).
    Model(Model),
    /// Alignment state (response to IsAligned).
    Aligned(bool),
    /// GOTO state (response to IsGotoInProgress).
    GotoInProgress(bool),
    /// Echoed byte (response to Echo).
    Echo(u8),
}

/// Validate a raw reply for `command` and decode it.
///
/// The reply must be exactly `command.reply_len()` bytes including the
/// terminator.
pub fn parse_response(reply: &[u8], command: &Command) -> Result<Response> {
    let payload = validate_reply(reply, command.reply_len())?;

    let response = match command {
        Command::SetLocation(_) | Command::SetTime(_) | Command::CancelGoto => Response::Ack,
        Command::GetLocation => {
            Response::Location(GeoCoordinate::from_wire(payload_array(payload)?))
        }
        Command::GetTime => Response::Time(MountTime::from_wire(payload_array(payload)?)),
        Command::GetVersion | Command::GetDeviceVersion(_) => {
            Response::Version(FirmwareVersion::from_wire(payload_array(payload)?))
        }
        Command::GetModel => {
            let [code] = payload_array::<1>(payload)?;
            Response::Model(Model::from_code(code)?)
        }
        Command::IsAligned => {
            let [state] = payload_array::<1>(payload)?;
            Response::Aligned(state == ALIGNED)
        }
        Command::IsGotoInProgress => {
            let [state] = payload_array::<1>(payload)?;
            Response::GotoInProgress(state == GOTO_IN_PROGRESS)
        }
        Command::Echo(_) => {
            let [byte] = payload_array::<1>(payload)?;
            Response::Echo(byte)
        }
    };

    debug!("{} -> {:?}", command.name(), response);
    Ok(response)
}
