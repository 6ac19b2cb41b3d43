use std::process;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use log::debug;

use nexstar_protocol::transport::serial::{SerialTransport, list_ports};
use nexstar_protocol::{
    Device, GeoCoordinate, Mount, MountConfig, MountTime, NexStarError, Result,
};

/// Talk to a Celestron NexStar hand controller over a serial port.
#[derive(Parser)]
#[command(name = "nexstar", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3). Required for every
    /// command except `ports`.
    #[arg(long)]
    port: Option<String>,

    /// Serial baud rate.
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Read timeout in milliseconds.
    #[arg(long, default_value_t = 3500)]
    timeout_ms: u64,

    /// Defaults to `info`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List serial ports on this machine.
    Ports,
    /// Ping the mount and print model, versions, state, time and location.
    Info,
    /// Read or write the site location.
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },
    /// Read or write the mount clock.
    Time {
        #[command(subcommand)]
        action: TimeAction,
    },
    /// Print the firmware version of a sub-device.
    DeviceVersion { device: DeviceArg },
    /// Abort any running GOTO.
    CancelGoto,
    /// Check the hand controller is answering.
    Ping,
    /// Ask the hand controller to echo a byte.
    Echo { byte: u8 },
}

#[derive(Subcommand)]
enum LocationAction {
    Get,
    /// Set latitude and longitude in decimal degrees (negative = S/W).
    Set {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
    },
}

#[derive(Subcommand)]
enum TimeAction {
    Get,
    /// Set the mount clock from this computer's clock.
    Sync {
        /// UTC offset in hours; defaults to the local offset.
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i8>,
        /// Daylight saving is in effect.
        #[arg(long)]
        dst: bool,
    },
    /// Set the mount clock to an RFC 3339 timestamp with a whole-hour offset.
    Set {
        #[arg(value_parser = parse_rfc3339)]
        datetime: DateTime<FixedOffset>,
        /// Daylight saving is in effect.
        #[arg(long)]
        dst: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DeviceArg {
    Azm,
    Alt,
    Gps,
    Rtc,
}

/// Variants are declared in `Device::ALL` order.
impl From<DeviceArg> for Device {
    fn from(arg: DeviceArg) -> Self {
        Device::ALL[arg as usize]
    }
}

fn parse_rfc3339(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("invalid RFC 3339 timestamp: {e}"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Info);
    if let Command::Ports = command {
        return print_ports();
    }

    let Some(port) = cli.port else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "--port is required")
            .exit();
    };
    let config = MountConfig {
        baud_rate: cli.baud,
        timeout: Duration::from_millis(cli.timeout_ms),
    };
    debug!("connecting to {port} at {} baud", config.baud_rate);
    let mount = Mount::connect(&port, &config)?;
    execute(&mount, command)
}

fn execute(mount: &Mount<SerialTransport>, command: Command) -> Result<()> {
    match command {
        Command::Ports => print_ports()?,
        Command::Info => print_info(mount)?,
        Command::Location { action } => match action {
            LocationAction::Get => println!("Location: {}", mount.get_location()?),
            LocationAction::Set {
                latitude,
                longitude,
            } => {
                mount.set_location(latitude, longitude)?;
                println!("Location: {}", GeoCoordinate::new(latitude, longitude)?);
            }
        },
        Command::Time { action } => match action {
            TimeAction::Get => println!("Time: {}", mount.get_time()?),
            TimeAction::Sync { offset, dst } => {
                let now = match offset {
                    Some(hours) => {
                        let zone = FixedOffset::east_opt(i32::from(hours) * 3600).ok_or(
                            NexStarError::InvalidTime {
                                field: "utc_offset",
                                value: i32::from(hours),
                            },
                        )?;
                        Local::now().with_timezone(&zone)
                    }
                    None => Local::now().fixed_offset(),
                };
                let time = MountTime::from_datetime(&now, dst)?;
                mount.set_time(&time)?;
                println!("Time: {time}");
            }
            TimeAction::Set { datetime, dst } => {
                let time = MountTime::from_datetime(&datetime, dst)?;
                mount.set_time(&time)?;
                println!("Time: {time}");
            }
        },
        Command::DeviceVersion { device } => {
            let device = Device::from(device);
            println!("{}: {}", device, mount.get_device_version(device)?);
        }
        Command::CancelGoto => {
            mount.cancel_goto()?;
            println!("GOTO cancelled");
        }
        Command::Ping => println!("Ping: {}", mount.ping()?),
        Command::Echo { byte } => println!("Echo: {}", mount.echo(byte)?),
    }

    Ok(())
}

fn print_ports() -> Result<()> {
    for name in list_ports()? {
        println!("{name}");
    }
    Ok(())
}

fn print_info(mount: &Mount<SerialTransport>) -> Result<()> {
    println!("Ping: {}", mount.ping()?);
    println!("Model: {}", mount.get_model()?);
    println!("Version: {}", mount.get_version()?);
    for device in [Device::AzmRa, Device::AltDec] {
        println!("{}: {}", device, mount.get_device_version(device)?);
    }
    println!("Is Aligned: {}", mount.is_aligned()?);
    println!("GOTO in progress: {}", mount.is_goto_in_progress()?);
    println!("Time: {}", mount.get_time()?);
    println!("Location: {}", mount.get_location()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_arg_mapping() {
        assert_eq!(Device::from(DeviceArg::Azm), Device::AzmRa);
        assert_eq!(Device::from(DeviceArg::Alt), Device::AltDec);
        assert_eq!(Device::from(DeviceArg::Gps), Device::Gps);
        assert_eq!(Device::from(DeviceArg::Rtc), Device::Rtc);
    }

    #[test]
    fn test_location_set_args() {
        let cli = Cli::try_parse_from(["nexstar", "location", "set", "-33.5", "151.25"]).unwrap();
        match cli.command {
            Some(Command::Location {
                action:
                    LocationAction::Set {
                        latitude,
                        longitude,
                    },
            }) => assert_eq!((latitude, longitude), (-33.5, 151.25)),
            _ => panic!("expected location set"),
        }
    }
}
