use crate::midi::{self, Tag};

/// A MIDI message received from the device.
#[derive(Debug)]
pub struct Event {
    msg: midi::Msg,
    /// Set as soon as a dispatcher finds an entry for this event,
    /// whether the entry's handler ran or not.
    pub handled: bool,
}

impl Event {
    pub fn new(msg: impl Into<midi::Msg>) -> Self {
        Self {
            msg: msg.into(),
            handled: false,
        }
    }

    pub fn msg(&self) -> &midi::Msg {
        &self.msg
    }

    pub fn status(&self) -> Option<u8> {
        self.msg.first().copied()
    }

    pub fn tag(&self) -> Option<Tag> {
        self.status().map(Tag::from)
    }

    pub fn channel(&self) -> Option<u8> {
        self.status().map(|status| midi::Channel::from(status).into())
    }

    pub fn data1(&self) -> Option<u8> {
        self.msg.get(1).copied()
    }

    pub fn data2(&self) -> Option<u8> {
        self.msg.get(2).copied()
    }

    /// Note number of a note on or off. Usable as a dispatch key extractor.
    pub fn note_number(&self) -> Option<u8> {
        match self.tag_and_data1()? {
            (midi::note::ON | midi::note::OFF, number) => Some(number),
            _ => None,
        }
    }

    /// Controller number of a control change. Usable as a dispatch key extractor.
    pub fn control_number(&self) -> Option<u8> {
        match self.tag_and_data1()? {
            (midi::control::CHANGE, number) => Some(number),
            _ => None,
        }
    }

    /// Status tag and first data byte, channel ignored.
    pub fn tag_and_data1(&self) -> Option<(Tag, u8)> {
        Some((self.tag()?, self.data1()?))
    }

    /// Note on with a non-zero velocity.
    pub fn is_pressed(&self) -> bool {
        self.tag() == Some(midi::note::ON) && self.data2().map_or(false, |vel| vel > 0)
    }
}

/// Dispatch key for [`Event`]s coming from the keyboard.
///
/// Note on and note off share the same key so that one handler
/// sees both press and release.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Key {
    Note { channel: u8, note: u8 },
    Control { channel: u8, number: u8 },
    Other,
}

impl Key {
    pub const fn note(channel: u8, note: u8) -> Self {
        Key::Note { channel, note }
    }

    pub const fn control(channel: u8, number: u8) -> Self {
        Key::Control { channel, number }
    }

    pub fn of(event: &Event) -> Self {
        let channel = match event.channel() {
            Some(channel) => channel,
            None => return Key::Other,
        };

        if let Some(note) = event.note_number() {
            Key::Note { channel, note }
        } else if let Some(number) = event.control_number() {
            Key::Control { channel, number }
        } else {
            Key::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let event = Event::new([0x99, 0x24, 0x40]);
        assert_eq!(event.tag(), Some(midi::note::ON));
        assert_eq!(event.channel(), Some(9));
        assert_eq!(event.data1(), Some(0x24));
        assert_eq!(event.data2(), Some(0x40));
        assert!(event.is_pressed());
        assert!(!event.handled);

        assert!(!Event::new([0x99, 0x24, 0x00]).is_pressed());
        assert!(!Event::new([0x89, 0x24, 0x40]).is_pressed());
        assert_eq!(Event::new(midi::Msg::default()).status(), None);
    }

    #[test]
    fn stock_extractors() {
        let note_off = Event::new([0x83, 0x30, 0x00]);
        assert_eq!(note_off.note_number(), Some(0x30));
        assert_eq!(note_off.control_number(), None);
        assert_eq!(note_off.tag_and_data1(), Some((midi::note::OFF, 0x30)));

        let cc = Event::new([0xbf, 0x07, 0x10]);
        assert_eq!(cc.note_number(), None);
        assert_eq!(cc.control_number(), Some(0x07));
        assert_eq!(cc.tag_and_data1(), Some((midi::control::CHANGE, 0x07)));

        let truncated = Event::new([0x90]);
        assert_eq!(truncated.note_number(), None);
        assert_eq!(truncated.tag_and_data1(), None);
    }

    #[test]
    fn note_on_and_off_share_key() {
        let on = Key::of(&Event::new([0x90, 0x5e, 0x7f]));
        let off = Key::of(&Event::new([0x80, 0x5e, 0x00]));

        assert_eq!(on, Key::note(0, 0x5e));
        assert_eq!(on, off);
    }

    #[test]
    fn other_keys() {
        assert_eq!(
            Key::of(&Event::new([0xb1, 0x07, 0x10])),
            Key::control(1, 0x07)
        );
        assert_eq!(Key::of(&Event::new([0xe0, 0x00, 0x40])), Key::Other);
        assert_eq!(Key::of(&Event::new([0x90])), Key::Other);
        assert_eq!(Key::of(&Event::new(midi::Msg::new_sysex(&[0x01]))), Key::Other);
    }
}
