//! Arturia KeyLab sysex commands.
//!
//! Every command is wrapped as `F0 00 20 6B 7F 42 <payload> F7`.

use crate::{
    bytes::Displayable,
    ctrl_surf::{device::keylab::LedId, Error},
    midi,
};

/// Manufacturer id, device id and model id.
pub const HEADER: [u8; 5] = [0x00, 0x20, 0x6b, 0x7f, 0x42];

pub mod led {
    /// Followed by led id, 7-bit value.
    pub const MONOCHROME: [u8; 3] = [0x02, 0x00, 0x10];

    /// Followed by led id, 7-bit red, green, blue.
    pub const RGB: [u8; 3] = [0x02, 0x00, 0x16];
}

pub mod display {
    pub const CMD: [u8; 3] = [0x04, 0x00, 0x60];

    pub const LINE1: u8 = 0x01;
    pub const LINE2: u8 = 0x02;
    pub const LINE_END: u8 = 0x00;
    pub const END: u8 = 0x7f;

    pub const WIDTH: usize = 16;
}

pub fn sysex(payload: &[u8]) -> midi::Msg {
    let mut data = Vec::with_capacity(HEADER.len() + payload.len());
    data.extend_from_slice(&HEADER);
    data.extend_from_slice(payload);

    midi::Msg::new_sysex(&data)
}

/// Returns the payload of an Arturia sysex.
pub fn payload(msg: &midi::Msg) -> Result<&[u8], Error> {
    let data = msg.try_get_sysex_data()?;

    match data.get(..HEADER.len()) {
        Some(header) if header == HEADER => Ok(&data[HEADER.len()..]),
        Some(header) => Err(Error::ManufacturerMismatch {
            expected: Displayable::from(HEADER.as_slice()).to_owned(),
            found: Displayable::from(header).to_owned(),
        }),
        None => Err(Error::UnexpectedDeviceMsg(msg.display().to_owned())),
    }
}

pub fn led_monochrome(id: LedId, value: u8) -> midi::Msg {
    let mut payload = [0u8; 5];
    payload[..3].copy_from_slice(&led::MONOCHROME);
    payload[3] = midi::data7(id.into());
    payload[4] = midi::data7(value.into());

    sysex(&payload)
}

pub fn led_rgb(id: LedId, [r, g, b]: [u8; 3]) -> midi::Msg {
    let mut payload = [0u8; 7];
    payload[..3].copy_from_slice(&led::RGB);
    payload[3] = midi::data7(id.into());
    payload[4] = midi::data7(r.into());
    payload[5] = midi::data7(g.into());
    payload[6] = midi::data7(b.into());

    sysex(&payload)
}

/// Builds the display payload, without the sysex envelope.
///
/// Lines longer than the display are truncated.
pub fn display_payload(line1: &[u8], line2: &[u8]) -> Vec<u8> {
    use display::*;

    let line1 = &line1[..line1.len().min(WIDTH)];
    let line2 = &line2[..line2.len().min(WIDTH)];

    let mut payload = Vec::with_capacity(CMD.len() + line1.len() + line2.len() + 5);
    payload.extend_from_slice(&CMD);
    payload.push(LINE1);
    payload.extend_from_slice(line1);
    payload.push(LINE_END);
    payload.push(LINE2);
    payload.extend_from_slice(line2);
    payload.push(LINE_END);
    payload.push(END);

    payload
}
