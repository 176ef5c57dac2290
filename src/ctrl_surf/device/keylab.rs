//! Arturia KeyLab hardware layout.

pub type LedId = u8;

/// Button ids of the LEDs.
pub mod led {
    use super::LedId;

    /// Logical slot without a physical LED.
    pub const MISSING: LedId = 0;

    /// Ids are sent as MIDI data bytes.
    pub const MAX_ID: LedId = 0x7f;

    pub const ON: u32 = 127;
    pub const OFF: u32 = 0;

    pub const OCTAVE_MINUS: LedId = 16;
    pub const OCTAVE_PLUS: LedId = 17;
    pub const CHORD: LedId = 18;
    pub const TRANSPOSE: LedId = 19;
    pub const MIDI_CHANNEL: LedId = 20;
    pub const PAD_MODE_CHORD_TRANSPOSE: LedId = 21;
    pub const PAD_MODE_CHORD_MEMORY: LedId = 22;
    pub const PAD_MODE_PAD: LedId = 23;
    pub const NAVIGATION_CATEGORY: LedId = 24;
    pub const NAVIGATION_PRESET: LedId = 25;
    pub const NAVIGATION_LEFT: LedId = 26;
    pub const NAVIGATION_RIGHT: LedId = 27;
    pub const NAVIGATION_ANALOG_LAB: LedId = 28;
    pub const NAVIGATION_DAW: LedId = 29;
    pub const NAVIGATION_USER: LedId = 30;
    pub const BANK_NEXT: LedId = 31;
    pub const BANK_PREVIOUS: LedId = 32;
    pub const BANK_TOGGLE: LedId = 33;

    /// Channel select buttons, the last one being the master / multi button.
    pub const BANK_SELECT: [LedId; 9] = [34, 35, 36, 37, 38, 39, 40, 41, 42];

    pub const TRACK_SOLO: LedId = 96;
    pub const TRACK_MUTE: LedId = 97;
    pub const TRACK_RECORD: LedId = 98;
    pub const TRACK_READ: LedId = 99;
    pub const TRACK_WRITE: LedId = 100;

    pub const GLOBAL_SAVE: LedId = 101;
    pub const GLOBAL_IN: LedId = 102;
    pub const GLOBAL_OUT: LedId = 103;
    pub const GLOBAL_METRO: LedId = 104;
    pub const GLOBAL_UNDO: LedId = 105;

    pub const TRANSPORT_REWIND: LedId = 106;
    pub const TRANSPORT_FORWARD: LedId = 107;
    pub const TRANSPORT_STOP: LedId = 108;
    pub const TRANSPORT_PLAY: LedId = 109;
    pub const TRANSPORT_RECORD: LedId = 110;
    pub const TRANSPORT_LOOP: LedId = 111;

    pub const PAD_MATRIX: super::PadMatrix<LedId> = [
        [112, 113, 114, 115],
        [116, 117, 118, 119],
        [120, 121, 122, 123],
        [124, 125, 126, 127],
    ];
}

pub const PAD_ROWS: usize = 4;
pub const PAD_COLS: usize = 4;

pub type PadMatrix<T> = [[T; PAD_COLS]; PAD_ROWS];

/// Note of the first drum pad.
pub const PAD_NOTE_MIN: u8 = 36;
pub const PAD_NOTE_MAX: u8 = PAD_NOTE_MIN + (PAD_ROWS * PAD_COLS) as u8 - 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    Essential,
    MkII49,
    MkII61,
    MkII88,
}

impl Variant {
    /// Guesses the variant from the name the device reports, e.g. its MIDI port.
    pub fn from_device_name(name: &str) -> Self {
        let name = name.to_lowercase();

        if !name.contains("mkii") {
            Variant::Essential
        } else if name.contains("mkii 88") {
            Variant::MkII88
        } else if name.contains("mkii 49") {
            Variant::MkII49
        } else {
            Variant::MkII61
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Essential => "KeyLab Essential",
            Variant::MkII49 => "KeyLab mkII 49",
            Variant::MkII61 => "KeyLab mkII 61",
            Variant::MkII88 => "KeyLab mkII 88",
        }
    }

    /// Pad rows are wired bottom to top on these keyboards.
    pub fn has_inverted_pads(self) -> bool {
        matches!(self, Variant::MkII49 | Variant::MkII88)
    }

    pub fn bank_led_ids(self) -> &'static [LedId] {
        match self {
            Variant::Essential => &[],
            _ => &led::BANK_SELECT,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Layout {
    variant: Variant,
    inverted_pads: bool,
}

impl Layout {
    /// `invert_pads` forces the inverted pad layout whatever the variant.
    pub fn new(variant: Variant, invert_pads: bool) -> Self {
        Self {
            variant,
            inverted_pads: invert_pads || variant.has_inverted_pads(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn bank_led_ids(&self) -> &'static [LedId] {
        self.variant.bank_led_ids()
    }

    pub fn pad_led_ids(&self) -> &'static PadMatrix<LedId> {
        &led::PAD_MATRIX
    }

    /// Returns the LED of the pad sending `note`, or [`led::MISSING`].
    pub fn pad_led_id(&self, note: u8) -> LedId {
        let (row, col) = match self.pad_position(note) {
            Some(pos) => pos,
            None => return led::MISSING,
        };

        led::PAD_MATRIX[row][col]
    }

    /// Returns the `(row, col)` of the pad sending `note` in the LED matrix.
    pub fn pad_position(&self, note: u8) -> Option<(usize, usize)> {
        if !(PAD_NOTE_MIN..=PAD_NOTE_MAX).contains(&note) {
            return None;
        }

        let idx = (note - PAD_NOTE_MIN) as usize;
        let col = idx % PAD_COLS;
        let row = if self.inverted_pads {
            PAD_ROWS - 1 - idx / PAD_COLS
        } else {
            idx / PAD_COLS
        };

        Some((row, col))
    }
}
