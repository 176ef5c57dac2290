use crate::{bytes, midi};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not a device sysex: {}", .0)]
    NotSysEx(#[from] midi::Error),

    #[error("Unexpected device message: {}", .0)]
    UnexpectedDeviceMsg(bytes::Displayable<'static>),

    #[error("Manufacturer header mismatch expected {expected}, found {found}")]
    ManufacturerMismatch {
        expected: bytes::Displayable<'static>,
        found: bytes::Displayable<'static>,
    },
}
