use std::io;

use log::{debug, info, warn};

use crate::error::{NexStarError, Result};
use crate::mount::MountConfig;

use super::Transport;

/// NexStar hand controllers talk 8N1 with no flow control.
const DATA_BITS: serialport::DataBits = serialport::DataBits::Eight;
const STOP_BITS: serialport::StopBits = serialport::StopBits::One;
const PARITY: serialport::Parity = serialport::Parity::None;
const FLOW_CONTROL: serialport::FlowControl = serialport::FlowControl::None;

/// A NexStar transport backed by a native serial port.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    pub fn new(port: Box<dyn serialport::SerialPort>) -> Self {
        Self { port }
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::Write::write_all(&mut self.port, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut self.port)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(&mut self.port, buf)
    }
}

/// Open a serial port with NexStar settings (8N1) using the baud rate
/// and read timeout from `config`.
///
/// Any stale input is discarded so the first reply lines up with the
/// first command.
pub fn open_port(port_name: &str, config: &MountConfig) -> Result<SerialTransport> {
    let port = serialport::new(port_name, config.baud_rate)
        .data_bits(DATA_BITS)
        .stop_bits(STOP_BITS)
        .parity(PARITY)
        .flow_control(FLOW_CONTROL)
        .timeout(config.timeout)
        .open()
        .map_err(NexStarError::Serial)?;

    port.clear(serialport::ClearBuffer::Input)?;

    info!("opened {} at {} baud", port_name, config.baud_rate);
    Ok(SerialTransport::new(port))
}

/// List the names of the serial ports on this machine.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;

    if ports.is_empty() {
        warn!("no serial ports found");
    }
    for port in &ports {
        debug!("found port: {} ({:?})", port.port_name, port.port_type);
    }

    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
