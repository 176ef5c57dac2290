use std::time::Duration;

use super::{protocol::arturia, DeviceSink};
use crate::clock::Clock;

pub const WIDTH: usize = arturia::display::WIDTH;

/// Minimum interval before the text scrolls by one character.
pub const SCROLL_INTERVAL: Duration = Duration::from_millis(500);

/// Number of blank positions scrolled after the last character before starting over.
pub const LINE_END_PADDING: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Line {
    First,
    Second,
}

/// Offset of the 16 characters window on `line` after `offset`.
pub fn compute_next_offset(offset: usize, line: &str) -> usize {
    let len = line.chars().count();

    if offset + WIDTH >= len + LINE_END_PADDING || len <= WIDTH {
        0
    } else {
        offset + 1
    }
}

/// The two lines LCD.
///
/// Lines wider than the display scroll. Ephemeral lines take precedence
/// over the primary lines until they expire.
#[derive(Debug)]
pub struct Display<C> {
    clock: C,
    line1: String,
    line2: String,
    ephemeral_line1: String,
    ephemeral_line2: String,
    expiration: Duration,
    offset1: usize,
    offset2: usize,
    last_update: Duration,
    last_payload: Vec<u8>,
}

impl<C: Clock> Display<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            line1: " ".into(),
            line2: " ".into(),
            ephemeral_line1: " ".into(),
            ephemeral_line2: " ".into(),
            expiration: Duration::ZERO,
            offset1: 0,
            offset2: 0,
            last_update: Duration::ZERO,
            last_payload: Vec::new(),
        }
    }

    pub fn set_lines(&mut self, line1: impl Into<String>, line2: impl Into<String>) {
        self.line1 = line1.into();
        self.line2 = line2.into();
    }

    pub fn set_line1(&mut self, line: impl Into<String>) {
        self.line1 = line.into();
    }

    pub fn set_line2(&mut self, line: impl Into<String>) {
        self.line2 = line.into();
    }

    /// Shows `line1` and `line2` instead of the primary lines for `duration`.
    pub fn set_ephemeral(
        &mut self,
        line1: impl Into<String>,
        line2: impl Into<String>,
        duration: Duration,
    ) {
        self.ephemeral_line1 = line1.into();
        self.ephemeral_line2 = line2.into();
        self.expiration = self.clock.now().saturating_add(duration);
    }

    pub fn clear_ephemeral(&mut self) {
        self.expiration = Duration::ZERO;
    }

    pub fn is_ephemeral_active(&self) -> bool {
        self.clock.now() < self.expiration
    }

    pub fn offset(&self, which: Line) -> usize {
        match which {
            Line::First => self.offset1,
            Line::Second => self.offset2,
        }
    }

    /// Renders the visible part of `which`: at most [`WIDTH`] ASCII bytes.
    pub fn render_line(&self, which: Line) -> Vec<u8> {
        let is_ephemeral = self.is_ephemeral_active();
        let (line, offset) = match which {
            Line::First if is_ephemeral => (&self.ephemeral_line1, self.offset1),
            Line::First => (&self.line1, self.offset1),
            Line::Second if is_ephemeral => (&self.ephemeral_line2, self.offset2),
            Line::Second => (&self.line2, self.offset2),
        };

        line.chars()
            .skip(offset)
            .take(WIDTH)
            .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
            .collect()
    }

    /// Scrolls the primary lines if the scroll interval elapsed.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        if now.saturating_sub(self.last_update) < SCROLL_INTERVAL {
            return;
        }

        self.offset1 = compute_next_offset(self.offset1, &self.line1);
        self.offset2 = compute_next_offset(self.offset2, &self.line2);
        self.last_update = now;
    }

    /// Sends the display content unless it is the same as the last one sent.
    ///
    /// Returns `true` if a command was sent.
    pub fn refresh(&mut self, sink: &mut impl DeviceSink) -> bool {
        let payload =
            arturia::display_payload(&self.render_line(Line::First), &self.render_line(Line::Second));

        self.tick();

        if payload == self.last_payload {
            return false;
        }

        match sink.send_to_device(arturia::sysex(&payload)) {
            Ok(()) => {
                self.last_payload = payload;
                true
            }
            Err(err) => {
                log::error!("Display: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, midi};

    fn display() -> (Display<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        (Display::new(clock.clone()), clock)
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn short_line_never_scrolls() {
        assert_eq!(compute_next_offset(0, ""), 0);
        assert_eq!(compute_next_offset(0, "Sixteen chars..."), 0);

        let (mut display, clock) = display();
        display.set_line1("Short");
        for _ in 0..10 {
            clock.advance(SCROLL_INTERVAL);
            display.tick();
            assert_eq!(display.offset(Line::First), 0);
        }
    }

    #[test]
    fn long_line_wraps_around() {
        let line = "abcdefghijklmnopqrst";
        assert_eq!(line.len(), 20);

        let offsets: Vec<usize> = (0..8)
            .scan(0, |offset, _| {
                *offset = compute_next_offset(*offset, line);
                Some(*offset)
            })
            .collect();
        assert_eq!(offsets, [1, 2, 3, 4, 5, 6, 0, 1]);
    }

    #[test]
    fn tick_waits_for_scroll_interval() {
        let (mut display, clock) = display();
        display.set_lines("abcdefghijklmnopqrst", "abcdefghijklmnopq");

        clock.advance_ms(499);
        display.tick();
        assert_eq!(display.offset(Line::First), 0);

        clock.advance_ms(1);
        display.tick();
        assert_eq!(display.offset(Line::First), 1);
        assert_eq!(display.offset(Line::Second), 1);
        assert_eq!(text(display.render_line(Line::First)), "bcdefghijklmnopq");
        assert_eq!(text(display.render_line(Line::Second)), "bcdefghijklmnopq");

        clock.advance_ms(250);
        display.tick();
        assert_eq!(display.offset(Line::First), 1);

        clock.advance_ms(250);
        display.tick();
        assert_eq!(display.offset(Line::First), 2);
        assert_eq!(display.offset(Line::Second), 2);
        assert_eq!(text(display.render_line(Line::Second)), "cdefghijklmnopq");
    }

    #[test]
    fn setting_text_keeps_offsets() {
        let (mut display, clock) = display();
        display.set_line1("abcdefghijklmnopqrst");

        clock.advance(SCROLL_INTERVAL);
        display.tick();
        assert_eq!(display.offset(Line::First), 1);

        display.set_line1("ABCDEFGHIJKLMNOPQRST");
        assert_eq!(display.offset(Line::First), 1);
        assert_eq!(text(display.render_line(Line::First)), "BCDEFGHIJKLMNOPQ");
    }

    #[test]
    fn ephemeral_override_expires() {
        let (mut display, clock) = display();
        display.set_lines("Primary 1", "Primary 2");
        display.set_ephemeral("Hint 1", "Hint 2", Duration::from_millis(1_000));

        assert!(display.is_ephemeral_active());
        assert_eq!(text(display.render_line(Line::First)), "Hint 1");
        assert_eq!(text(display.render_line(Line::Second)), "Hint 2");

        clock.advance_ms(999);
        assert_eq!(text(display.render_line(Line::First)), "Hint 1");

        clock.advance_ms(1);
        assert!(!display.is_ephemeral_active());
        assert_eq!(text(display.render_line(Line::First)), "Primary 1");
        assert_eq!(text(display.render_line(Line::Second)), "Primary 2");
    }

    #[test]
    fn endless_ephemeral() {
        let (mut display, clock) = display();
        display.set_line1("Primary");

        clock.advance_ms(10);
        display.set_ephemeral("Hint", "", Duration::MAX);
        assert_eq!(text(display.render_line(Line::First)), "Hint");

        clock.advance(Duration::from_secs(3_600 * 24 * 365));
        assert!(display.is_ephemeral_active());

        display.clear_ephemeral();
        assert_eq!(text(display.render_line(Line::First)), "Primary");
    }

    #[test]
    fn clear_ephemeral() {
        let (mut display, _) = display();
        display.set_line1("Primary");
        display.set_ephemeral("Hint", "", Duration::from_secs(10));
        display.clear_ephemeral();

        assert_eq!(text(display.render_line(Line::First)), "Primary");
    }

    #[test]
    fn non_ascii_is_replaced() {
        let (mut display, _) = display();
        display.set_line1("Café");

        assert_eq!(text(display.render_line(Line::First)), "Caf?");
    }

    #[test]
    fn refresh_is_idempotent() {
        let (mut display, _) = display();
        let mut sent: Vec<midi::Msg> = Vec::new();

        display.set_lines("Track 1", "Volume");
        assert!(display.refresh(&mut sent));
        assert!(!display.refresh(&mut sent));
        assert_eq!(sent.len(), 1);

        let payload = arturia::payload(&sent[0]).unwrap();
        assert_eq!(
            payload,
            arturia::display_payload(b"Track 1", b"Volume").as_slice()
        );

        display.set_line2("Pan");
        assert!(display.refresh(&mut sent));
        assert_eq!(sent.len(), 2);
    }

    #[test]
    fn refresh_follows_scrolling() {
        let (mut display, clock) = display();
        let mut sent: Vec<midi::Msg> = Vec::new();
        display.set_lines("abcdefghijklmnopqrst", "");

        // Payload is built before the offsets move.
        assert!(display.refresh(&mut sent));
        clock.advance(SCROLL_INTERVAL);
        assert!(!display.refresh(&mut sent));
        assert!(display.refresh(&mut sent));

        assert_eq!(sent.len(), 2);
        assert_eq!(
            arturia::payload(&sent[1]).unwrap(),
            arturia::display_payload(b"bcdefghijklmnopq", b"").as_slice()
        );
    }
}
