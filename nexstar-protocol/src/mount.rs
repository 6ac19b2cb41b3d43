use std::sync::Mutex;
use std::time::Duration;

use log::{trace, warn};

use crate::command::Command;
use crate::coordinate::GeoCoordinate;
use crate::device::Device;
use crate::error::{NexStarError, Result};
use crate::model::Model;
use crate::protocol::TERMINATOR;
use crate::response::{self, Response};
use crate::time::MountTime;
use crate::transport::Transport;

/// Configuration for the serial connection to the hand controller.
#[derive(Debug, Clone)]
pub struct MountConfig {
    /// Serial baud rate.
    pub baud_rate: u32,
    /// How long a single read may block before the transport gives up.
    pub timeout: Duration,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            timeout: Duration::from_millis(3500),
        }
    }
}

/// A connection to a Celestron mount via the NexStar protocol.
///
/// The link is half-duplex, so the transport sits behind a mutex that is
/// held for each whole write+read exchange. Calls from several threads
/// are serialized rather than interleaved on the wire.
pub struct Mount<T: Transport> {
    transport: Mutex<T>,
}

#[cfg(feature = "serial")]
impl Mount<crate::transport::serial::SerialTransport> {
    /// Open `port_name` with the given settings and wrap it in a `Mount`.
    pub fn connect(port_name: &str, config: &MountConfig) -> Result<Self> {
        let transport = crate::transport::serial::open_port(port_name, config)?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> Mount<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
        }
    }

    /// Give back the transport.
    pub fn into_inner(self) -> Result<T> {
        self.transport
            .into_inner()
            .map_err(|_| NexStarError::LockPoisoned)
    }

    /// Send a command and wait for its reply.
    ///
    /// Exactly one write and one read-until-terminator are performed.
    /// Nothing is retried.
    pub fn send_command(&self, command: &Command) -> Result<Response> {
        // Encode before taking the lock so invalid arguments never touch the wire.
        let bytes = command.to_bytes()?;
        let reply = self.exchange(&bytes)?;
        response::parse_response(&reply, command).inspect_err(|e| {
            warn!("{} failed: {}", command.name(), e);
        })
    }

    fn exchange(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut transport = self
            .transport
            .lock()
            .map_err(|_| NexStarError::LockPoisoned)?;

        trace!("TX: {:02X?}", bytes);
        transport.write_all(bytes)?;
        transport.flush()?;

        let reply = transport.read_until(TERMINATOR)?;
        trace!("RX: {:02X?}", reply);
        Ok(reply)
    }

    // --- Convenience methods ---

    /// Read the site location.
    pub fn get_location(&self) -> Result<GeoCoordinate> {
        match self.send_command(&Command::GetLocation)? {
            Response::Location(location) => Ok(location),
            other => unexpected("GetLocation", other),
        }
    }

    /// Set the site location. Each coordinate is truncated to whole
    /// arc-seconds.
    pub fn set_location(&self, latitude: f64, longitude: f64) -> Result<()> {
        let location = GeoCoordinate::new(latitude, longitude)?;
        self.expect_ack(&Command::SetLocation(location))
    }

    /// Read the mount clock.
    pub fn get_time(&self) -> Result<MountTime> {
        match self.send_command(&Command::GetTime)? {
            Response::Time(time) => Ok(time),
            other => unexpected("GetTime", other),
        }
    }

    /// Set the mount clock.
    pub fn set_time(&self, time: &MountTime) -> Result<()> {
        self.expect_ack(&Command::SetTime(*time))
    }

    /// Read the hand controller firmware version as `major.minor`.
    pub fn get_version(&self) -> Result<String> {
        match self.send_command(&Command::GetVersion)? {
            Response::Version(version) => Ok(version.to_string()),
            other => unexpected("GetVersion", other),
        }
    }

    /// Read a sub-device firmware version as `major.minor`.
    pub fn get_device_version(&self, device: Device) -> Result<String> {
        match self.send_command(&Command::GetDeviceVersion(device))? {
            Response::Version(version) => Ok(version.to_string()),
            other => unexpected("GetDeviceVersion", other),
        }
    }

    /// Read the mount model.
    pub fn get_model(&self) -> Result<Model> {
        match self.send_command(&Command::GetModel)? {
            Response::Model(model) => Ok(model),
            other => unexpected("GetModel", other),
        }
    }

    pub fn is_aligned(&self) -> Result<bool> {
        match self.send_command(&Command::IsAligned)? {
            Response::Aligned(aligned) => Ok(aligned),
            other => unexpected("IsAligned", other),
        }
    }

    pub fn is_goto_in_progress(&self) -> Result<bool> {
        match self.send_command(&Command::IsGotoInProgress)? {
            Response::GotoInProgress(running) => Ok(running),
            other => unexpected("IsGotoInProgress", other),
        }
    }

    /// Abort any running GOTO.
    pub fn cancel_goto(&self) -> Result<()> {
        self.expect_ack(&Command::CancelGoto)
    }

    /// Ask the controller to echo `byte` back.
    pub fn echo(&self, byte: u8) -> Result<u8> {
        match self.send_command(&Command::Echo(byte))? {
            Response::Echo(echoed) => Ok(echoed),
            other => unexpected("Echo", other),
        }
    }

    /// Check that the controller is answering.
    pub fn ping(&self) -> Result<bool> {
        Ok(self.echo(1)? == 1)
    }

    fn expect_ack(&self, command: &Command) -> Result<()> {
        match self.send_command(command)? {
            Response::Ack => Ok(()),
            other => unexpected(command.name(), other),
        }
    }
}

fn unexpected<T>(name: &'static str, response: Response) -> Result<T> {
    warn!("unexpected response to {}: {:?}", name, response);
    Err(NexStarError::UnexpectedResponse(name))
}
