use std::{collections::HashMap, time::Duration};

use super::{
    color::{self, Color},
    device::keylab::{led, Layout, LedId, PadMatrix},
    protocol::arturia,
    DeviceSink,
};
use crate::clock::Clock;

/// Minimum interval between two sends to the same LED.
///
/// This is about the sysex throughput the device can handle.
pub const DEBOUNCE: Duration = Duration::from_millis(33);

/// Pause after each LED command so the device can process it.
pub const SEND_PAUSE: Duration = Duration::from_micros(100);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// The value is a 7-bit intensity.
    Monochrome,
    /// The value is a 24-bit `0xRRGGBB` color.
    Rgb,
}

pub fn as_on_off(is_on: bool) -> Color {
    if is_on {
        led::ON
    } else {
        led::OFF
    }
}

pub fn zero_matrix() -> PadMatrix<Color> {
    Default::default()
}

/// Keeps the device LEDs in sync with the values set by the application.
///
/// Updates for an LED arriving less than [`DEBOUNCE`] after the previous
/// send for the same LED are dropped, not queued.
#[derive(Debug)]
pub struct LedSync<C> {
    clock: C,
    layout: Layout,
    last_send: HashMap<LedId, Duration>,
}

impl<C: Clock> LedSync<C> {
    pub fn new(clock: C, layout: Layout) -> Self {
        Self {
            clock,
            layout,
            last_send: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Sends the `(led id, value)` pairs of `mapping` which are due.
    ///
    /// Returns the number of commands sent.
    pub fn set_lights(
        &mut self,
        sink: &mut impl DeviceSink,
        mapping: impl IntoIterator<Item = (LedId, Color)>,
        mode: Mode,
    ) -> usize {
        let now = self.clock.now();
        let mut sent = 0;

        for (id, value) in mapping {
            if id == led::MISSING {
                continue;
            }

            if id > led::MAX_ID {
                log::debug!("LED {id}: invalid id");
                continue;
            }

            if let Some(&last) = self.last_send.get(&id) {
                if now.saturating_sub(last) < DEBOUNCE {
                    log::trace!("LED {id}: dropping {value:#x}");
                    continue;
                }
            }

            self.last_send.insert(id, now);

            let msg = match mode {
                Mode::Monochrome => arturia::led_monochrome(id, value as u8),
                Mode::Rgb => arturia::led_rgb(id, color::to_7bit_channels(value)),
            };

            match sink.send_to_device(msg) {
                Ok(()) => sent += 1,
                Err(err) => log::error!("LED {id}: {err}"),
            }

            std::thread::sleep(SEND_PAUSE);
        }

        sent
    }

    /// Sets the bank select LEDs from the values in order.
    ///
    /// Does nothing on variants without bank LEDs.
    pub fn set_bank_lights(
        &mut self,
        sink: &mut impl DeviceSink,
        values: impl IntoIterator<Item = Color>,
        mode: Mode,
    ) -> usize {
        let ids = self.layout.bank_led_ids();
        if ids.is_empty() {
            return 0;
        }

        self.set_lights(sink, ids.iter().copied().zip(values), mode)
    }

    pub fn set_pad_lights(
        &mut self,
        sink: &mut impl DeviceSink,
        matrix: &PadMatrix<Color>,
        mode: Mode,
    ) -> usize {
        let ids = self.layout.pad_led_ids();
        let mapping = ids
            .iter()
            .flatten()
            .copied()
            .zip(matrix.iter().flatten().copied());

        self.set_lights(sink, mapping, mode)
    }
}
