use crate::{
    clock::Clock,
    config::Config,
    ctrl_surf::{
        keylab::PadMatrix,
        light::{self, Mode},
        Color, DeviceSink, Display, Layout, LedId, LedSync,
    },
};

/// Device state handlers act on.
pub struct Surface<C, S> {
    pub lights: LedSync<C>,
    pub display: Display<C>,
    pub out: S,
    config: Config,
}

impl<C: Clock + Clone, S: DeviceSink> Surface<C, S> {
    pub fn new(clock: C, layout: Layout, out: S, config: Config) -> Self {
        Self {
            lights: LedSync::new(clock.clone(), layout),
            display: Display::new(clock),
            out,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        self.lights.layout()
    }

    pub fn set_lights(
        &mut self,
        mapping: impl IntoIterator<Item = (LedId, Color)>,
        mode: Mode,
    ) -> usize {
        self.lights.set_lights(&mut self.out, mapping, mode)
    }

    pub fn set_bank_lights(&mut self, values: impl IntoIterator<Item = Color>, mode: Mode) -> usize {
        self.lights.set_bank_lights(&mut self.out, values, mode)
    }

    pub fn set_pad_lights(&mut self, matrix: &PadMatrix<Color>, mode: Mode) -> usize {
        self.lights.set_pad_lights(&mut self.out, matrix, mode)
    }

    pub fn set_light(&mut self, id: LedId, is_on: bool) -> usize {
        self.set_lights([(id, light::as_on_off(is_on))], Mode::Monochrome)
    }

    /// Shows a temporary message on the display.
    pub fn hint(&mut self, line1: &str, line2: &str) {
        let line1 = self.config.format_hint(line1);
        let line2 = self.config.format_hint(line2);
        self.display
            .set_ephemeral(line1, line2, self.config.hint_duration);
    }

    pub fn refresh_display(&mut self) -> bool {
        self.display.refresh(&mut self.out)
    }
}
