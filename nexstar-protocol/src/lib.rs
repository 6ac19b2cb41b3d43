pub mod command;
pub mod coordinate;
pub mod device;
pub mod error;
pub mod model;
pub mod mount;
pub mod protocol;
pub mod response;
pub mod time;
pub mod transport;
pub mod version;

pub use coordinate::GeoCoordinate;
pub use device::Device;
pub use error::{NexStarError, Result};
pub use model::Model;
pub use mount::{Mount, MountConfig};
pub use time::MountTime;
pub use version::FirmwareVersion;
