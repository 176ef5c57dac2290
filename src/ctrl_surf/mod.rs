pub mod color;
pub use color::Color;

pub mod device;
pub use device::keylab::{self, Layout, LedId, Variant};

pub mod dispatch;
pub use dispatch::Dispatcher;

pub mod display;
pub use display::Display;

pub mod error;
pub use error::Error;

pub mod event;
pub use event::{Event, Key};

pub mod light;
pub use light::LedSync;

pub mod protocol;

use crate::midi;

/// Sends commands to the device.
pub trait DeviceSink {
    fn send_to_device(&mut self, msg: midi::Msg) -> Result<(), midi::Error>;
}

impl DeviceSink for midi::PortsOut {
    fn send_to_device(&mut self, msg: midi::Msg) -> Result<(), midi::Error> {
        self.send(&msg)
    }
}

/// Collects the commands, e.g. for tests or dry runs.
impl DeviceSink for Vec<midi::Msg> {
    fn send_to_device(&mut self, msg: midi::Msg) -> Result<(), midi::Error> {
        self.push(msg);
        Ok(())
    }
}
