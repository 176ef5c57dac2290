mod error;
pub use error::Error;

mod io;

pub mod msg;
pub use msg::Msg;

pub mod port;
pub use port::{Direction, PortsIn, PortsOut};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Tag(u8);

impl Tag {
    pub const fn from(byte: u8) -> Self {
        Self(byte & 0xf0)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag.0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Channel(u8);

impl Channel {
    pub const fn from(byte: u8) -> Self {
        Self(byte & 0x0f)
    }
}

impl From<Channel> for u8 {
    fn from(chan: Channel) -> u8 {
        chan.0
    }
}

pub mod note {
    use super::Tag;

    pub const OFF: Tag = Tag::from(0x80);
    pub const ON: Tag = Tag::from(0x90);
}

pub mod control {
    use super::Tag;

    pub const CHANGE: Tag = Tag::from(0xb0);
}

pub mod sysex {
    pub const TAG: u8 = 0xf0;
    pub const END_TAG: u8 = 0xf7;
}

/// Masks `value` to a valid MIDI data byte.
#[inline]
pub const fn data7(value: u32) -> u8 {
    (value & 0x7f) as u8
}
