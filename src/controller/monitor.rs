//! Handlers reflecting the keyboard activity on its own lights and display.

use super::Surface;
use crate::{
    clock::Clock,
    ctrl_surf::{
        color::{self, Color},
        keylab::{led, PadMatrix, PAD_COLS, PAD_NOTE_MAX, PAD_NOTE_MIN, PAD_ROWS},
        light::{self, Mode},
        DeviceSink, Dispatcher, Event, Key, LedId,
    },
};

pub const BUTTON_CHANNEL: u8 = 0;
pub const PAD_CHANNEL: u8 = 9;

/// Buttons in DAW mode: note, LED, name.
pub const BUTTONS: [(u8, LedId, &str); 16] = [
    (0x00, led::TRACK_RECORD, "Arm"),
    (0x08, led::TRACK_SOLO, "Solo"),
    (0x10, led::TRACK_MUTE, "Mute"),
    (0x4a, led::TRACK_READ, "Read"),
    (0x4b, led::TRACK_WRITE, "Write"),
    (0x50, led::GLOBAL_SAVE, "Save"),
    (0x51, led::GLOBAL_UNDO, "Undo"),
    (0x56, led::TRANSPORT_LOOP, "Loop"),
    (0x57, led::GLOBAL_IN, "Punch in"),
    (0x58, led::GLOBAL_OUT, "Punch out"),
    (0x59, led::GLOBAL_METRO, "Metronome"),
    (0x5b, led::TRANSPORT_REWIND, "Rewind"),
    (0x5c, led::TRANSPORT_FORWARD, "Fast forward"),
    (0x5d, led::TRANSPORT_STOP, "Stop"),
    (0x5e, led::TRANSPORT_PLAY, "Play"),
    (0x5f, led::TRANSPORT_RECORD, "Record"),
];

/// Notes of the bank select buttons, in bank LED order.
pub const BANK_SELECT: [u8; 9] = [0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x33];

/// Knobs and faders.
pub const CONTROLS: std::ops::RangeInclusive<u8> = 0x10..=0x2f;

/// Base color of each pad row.
pub const PAD_PALETTE: [Color; PAD_ROWS] = [0xff0000, 0xffa000, 0x00ff40, 0x0060ff];

pub const TITLE: &str = "KeyLab Controller";

pub fn dispatcher<C, S>() -> Dispatcher<Key, Surface<C, S>>
where
    C: Clock + Clone + 'static,
    S: DeviceSink + 'static,
{
    let mut dispatcher: Dispatcher<Key, Surface<C, S>> = Dispatcher::new(Key::of);

    for (note, id, name) in BUTTONS {
        dispatcher.register(Key::note(BUTTON_CHANNEL, note), move |surface, event| {
            let is_pressed = event.is_pressed();
            surface.set_light(id, is_pressed);
            if is_pressed {
                surface.hint(name, "");
            }
        });
    }

    for (idx, note) in BANK_SELECT.into_iter().enumerate() {
        dispatcher.register_filtered(
            Key::note(BUTTON_CHANNEL, note),
            move |surface, _| {
                let values = (0..BANK_SELECT.len()).map(|other| light::as_on_off(other == idx));
                surface.set_bank_lights(values, Mode::Monochrome);
                surface.hint("Bank", &format!("{}", idx + 1));
            },
            Event::is_pressed,
        );
    }

    dispatcher.register_for_many(
        (PAD_NOTE_MIN..=PAD_NOTE_MAX).map(|note| Key::note(PAD_CHANNEL, note)),
        pad,
    );

    dispatcher.register_for_many_filtered(
        CONTROLS.map(|number| Key::control(BUTTON_CHANNEL, number)),
        |surface, event| {
            let number = event.control_number().unwrap_or_default();
            let value = event.data2().unwrap_or_default();
            surface.hint(&format!("Control {number}"), &format!("{value}"));
        },
        // Truncated messages carry no value.
        |event| event.data2().is_some(),
    );

    dispatcher
}

fn pad<C: Clock + Clone, S: DeviceSink>(surface: &mut Surface<C, S>, event: &Event) {
    let (note, (row, col)) = match event
        .note_number()
        .and_then(|note| Some((note, surface.layout().pad_position(note)?)))
    {
        Some(pad) => pad,
        None => return,
    };

    let is_pressed = event.is_pressed();
    let color = if is_pressed {
        color::full_color(PAD_PALETTE[row])
    } else {
        idle_pad_color(surface.config().colorize_pad_lights, row)
    };

    let id = surface.layout().pad_led_ids()[row][col];
    surface.set_lights([(id, color)], Mode::Rgb);

    if is_pressed {
        let number = note - PAD_NOTE_MIN + 1;
        let velocity = event.data2().unwrap_or_default();
        surface.hint(&format!("Pad {number}"), &format!("Velocity {velocity}"));
    }
}

fn idle_pad_color(colorize: bool, row: usize) -> Color {
    if colorize {
        color::faded_color(PAD_PALETTE[row])
    } else {
        0
    }
}

/// Turns all the lights off, pads excepted, and shows the title.
pub fn reset<C: Clock + Clone, S: DeviceSink>(surface: &mut Surface<C, S>) {
    let buttons = BUTTONS.iter().map(|&(_, id, _)| (id, light::as_on_off(false)));
    surface.set_lights(buttons, Mode::Monochrome);
    surface.set_bank_lights([led::OFF; 9], Mode::Monochrome);

    let colorize = surface.config().colorize_pad_lights;
    let mut pads: PadMatrix<Color> = light::zero_matrix();
    for (row, values) in pads.iter_mut().enumerate() {
        *values = [idle_pad_color(colorize, row); PAD_COLS];
    }
    surface.set_pad_lights(&pads, Mode::Rgb);

    let variant = surface.layout().variant().name();
    surface.display.set_lines(TITLE, variant);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        config::Config,
        ctrl_surf::{display::Line, keylab::Variant, protocol::arturia, Layout},
        midi,
    };

    type TestSurface = Surface<ManualClock, Vec<midi::Msg>>;

    fn surface(variant: Variant) -> (TestSurface, ManualClock) {
        let clock = ManualClock::default();
        let surface = Surface::new(
            clock.clone(),
            Layout::new(variant, false),
            Vec::new(),
            Config::default(),
        );

        (surface, clock)
    }

    fn last_payload(surface: &TestSurface) -> Vec<u8> {
        arturia::payload(surface.out.last().unwrap()).unwrap().to_vec()
    }

    #[test]
    fn button_press_and_release() {
        let (mut surface, clock) = surface(Variant::MkII61);
        let dispatcher = dispatcher::<ManualClock, Vec<midi::Msg>>();

        let mut event = Event::new([0x90, 0x5e, 0x7f]);
        assert!(dispatcher.dispatch(&mut surface, &mut event));
        assert!(event.handled);
        assert_eq!(last_payload(&surface), [0x02, 0x00, 0x10, led::TRANSPORT_PLAY, 127]);
        assert_eq!(surface.display.render_line(Line::First), b"Play");

        clock.advance_ms(50);
        assert!(dispatcher.dispatch(&mut surface, &mut Event::new([0x80, 0x5e, 0x00])));
        assert_eq!(last_payload(&surface), [0x02, 0x00, 0x10, led::TRANSPORT_PLAY, 0]);
        assert_eq!(surface.out.len(), 2);
    }

    #[test]
    fn pad_lights_follow_layout() {
        let (mut surface, _) = surface(Variant::MkII88);
        let dispatcher = dispatcher::<ManualClock, Vec<midi::Msg>>();

        assert!(dispatcher.dispatch(&mut surface, &mut Event::new([0x99, 36, 100])));

        // Bottom left pad on inverted layouts, last palette row.
        let [r, g, b] = color::to_7bit_channels(color::full_color(PAD_PALETTE[3]));
        assert_eq!(last_payload(&surface), [0x02, 0x00, 0x16, 124, r, g, b]);
        assert_eq!(surface.display.render_line(Line::First), b"Pad 1");
        assert_eq!(surface.display.render_line(Line::Second), b"Velocity 100");
    }

    #[test]
    fn bank_select() {
        let (mut surface, _) = surface(Variant::MkII61);
        let dispatcher = dispatcher::<ManualClock, Vec<midi::Msg>>();

        assert!(dispatcher.dispatch(&mut surface, &mut Event::new([0x90, 0x1a, 0x7f])));
        assert_eq!(surface.out.len(), 9);

        let lit: Vec<u8> = surface
            .out
            .iter()
            .map(|msg| arturia::payload(msg).unwrap().to_vec())
            .filter(|payload| payload[4] == 127)
            .map(|payload| payload[3])
            .collect();
        assert_eq!(lit, [led::BANK_SELECT[2]]);

        // Releases are filtered out.
        let mut release = Event::new([0x80, 0x1a, 0x00]);
        assert!(dispatcher.dispatch(&mut surface, &mut release));
        assert!(release.handled);
        assert_eq!(surface.out.len(), 9);
    }

    #[test]
    fn control_hint() {
        let (mut surface, _) = surface(Variant::Essential);
        let dispatcher = dispatcher::<ManualClock, Vec<midi::Msg>>();

        assert!(dispatcher.dispatch(&mut surface, &mut Event::new([0xb0, 0x11, 0x40])));
        assert_eq!(surface.display.render_line(Line::First), b"Control 17");
        assert_eq!(surface.display.render_line(Line::Second), b"64");

        // Truncated
        assert!(dispatcher.dispatch(&mut surface, &mut Event::new([0xb0, 0x12])));
        assert_eq!(surface.display.render_line(Line::First), b"Control 17");

        assert!(surface.out.is_empty());
    }

    #[test]
    fn unknown_events() {
        let (mut surface, _) = surface(Variant::MkII61);
        let dispatcher = dispatcher::<ManualClock, Vec<midi::Msg>>();

        // Keyboard notes
        assert!(!dispatcher.dispatch(&mut surface, &mut Event::new([0x90, 60, 100])));
        assert!(!dispatcher.dispatch(&mut surface, &mut Event::new([0xe0, 0x00, 0x40])));
        assert!(surface.out.is_empty());
    }

    #[test]
    fn reset_turns_everything_off() {
        let (mut surface, _) = surface(Variant::MkII61);
        reset(&mut surface);

        assert_eq!(surface.out.len(), BUTTONS.len() + 9 + PAD_ROWS * PAD_COLS);
        assert!(surface.refresh_display());
        assert_eq!(
            last_payload(&surface),
            arturia::display_payload(b"KeyLab Controlle", b"KeyLab mkII 61")
        );
    }
}
