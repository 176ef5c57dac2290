use std::time::Duration;

/// Behaviour flags of the controller.
#[derive(Clone, Debug)]
pub struct Config {
    /// Treat the pads as wired bottom to top, like the 49 & 88 keys mkII.
    pub invert_led_layout: bool,
    /// Upper case the hints shown on the display.
    pub hint_all_caps: bool,
    /// How long a hint overrides the display.
    pub hint_duration: Duration,
    /// Light idle pads with a faded color instead of turning them off.
    pub colorize_pad_lights: bool,
    /// Maximum interval between two display refreshes.
    pub refresh_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            invert_led_layout: false,
            hint_all_caps: false,
            hint_duration: Duration::from_millis(1_500),
            colorize_pad_lights: true,
            refresh_period: Duration::from_millis(50),
        }
    }
}

impl Config {
    pub fn format_hint(&self, text: &str) -> String {
        if self.hint_all_caps {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn hint_case() {
        let mut config = Config::default();
        assert_eq!(config.format_hint("Play"), "Play");

        config.hint_all_caps = true;
        assert_eq!(config.format_hint("Play"), "PLAY");
    }
}
