use crossbeam_channel as channel;
use std::sync::Arc;

use crate::{
    bytes::Displayable,
    clock::MonotonicClock,
    config::Config,
    ctrl_surf::{protocol::arturia, Dispatcher, Event, Key, Layout, Variant},
    midi,
};

pub mod monitor;

mod surface;
pub use surface::Surface;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("MIDI error: {}", .0)]
    Midi(#[from] midi::Error),

    #[error("No MIDI {direction} matching {fragment}")]
    DeviceNotFound {
        direction: midi::Direction,
        fragment: Arc<str>,
    },
}

/// Which MIDI ports to use.
#[derive(Clone, Debug, Default)]
pub struct PortSelection {
    pub input: Option<Arc<str>>,
    pub output: Option<Arc<str>>,
    /// Used to find the ports not given explicitly.
    pub device: Arc<str>,
}

pub struct Ports {
    pub ins: Vec<Arc<str>>,
    pub outs: Vec<Arc<str>>,
}

pub fn list_ports(client_name: &str) -> Result<Ports, Error> {
    let (msg_tx, _) = channel::unbounded();

    let mut ins = midi::PortsIn::try_new(client_name.into(), msg_tx)?;
    ins.refresh()?;
    let mut outs = midi::PortsOut::try_new(client_name.into())?;
    outs.refresh()?;

    Ok(Ports {
        ins: ins.list().collect(),
        outs: outs.list().collect(),
    })
}

type DeviceSurface = Surface<MonotonicClock, midi::PortsOut>;

pub struct Controller {
    dispatcher: Dispatcher<Key, DeviceSurface>,
    surface: DeviceSurface,
    // Keeps the input connection alive.
    midi_ports_in: midi::PortsIn,
    midi_rx: channel::Receiver<midi::Msg>,
}

impl Controller {
    pub fn try_new(client_name: &str, ports: &PortSelection, config: Config) -> Result<Self, Error> {
        use midi::Direction;

        let (midi_tx, midi_rx) = channel::unbounded();

        let mut midi_ports_in = midi::PortsIn::try_new(client_name.into(), midi_tx)?;
        midi_ports_in.refresh()?;
        let in_name = match ports.input {
            Some(ref name) => name.clone(),
            None => midi_ports_in
                .find(&ports.device)
                .ok_or_else(|| Error::DeviceNotFound {
                    direction: Direction::In,
                    fragment: ports.device.clone(),
                })?,
        };
        midi_ports_in.connect(in_name)?;

        let mut midi_ports_out = midi::PortsOut::try_new(client_name.into())?;
        midi_ports_out.refresh()?;
        let out_name = match ports.output {
            Some(ref name) => name.clone(),
            None => midi_ports_out
                .find(&ports.device)
                .ok_or_else(|| Error::DeviceNotFound {
                    direction: Direction::Out,
                    fragment: ports.device.clone(),
                })?,
        };
        midi_ports_out.connect(out_name.clone())?;

        let variant = Variant::from_device_name(&out_name);
        log::info!("Using {} layout", variant.name());

        let layout = Layout::new(variant, config.invert_led_layout);
        let surface = Surface::new(MonotonicClock::default(), layout, midi_ports_out, config);

        Ok(Self {
            dispatcher: monitor::dispatcher(),
            surface,
            midi_ports_in,
            midi_rx,
        })
    }

    /// Runs until the MIDI input channel is closed.
    pub fn run(mut self) {
        monitor::reset(&mut self.surface);
        self.surface.refresh_display();

        let midi_rx = self.midi_rx.clone();
        let refresh_period = self.surface.config().refresh_period;

        loop {
            channel::select! {
                recv(midi_rx) -> midi_msg => {
                    match midi_msg {
                        Ok(midi_msg) => self.handle_midi_msg(midi_msg),
                        Err(err) => {
                            log::error!("Error MIDI msg channel: {err}");
                            break;
                        }
                    }
                }
                default(refresh_period) => (),
            }

            self.surface.refresh_display();
        }

        self.midi_ports_in.disconnect();
        log::debug!("Shutting down Controller loop");
    }

    fn handle_midi_msg(&mut self, msg: midi::Msg) {
        if msg.is_sysex() {
            match arturia::payload(&msg) {
                Ok(payload) => log::debug!("Device sysex {}", Displayable::from(payload)),
                Err(err) => log::debug!("{err}"),
            }
            return;
        }

        let mut event = Event::new(msg);
        if self.dispatcher.dispatch(&mut self.surface, &mut event) {
            log::trace!("Handled {}", event.msg().display());
        }
    }
}
