use crossbeam_channel as channel;
use std::sync::Arc;

use super::{Error, Msg};

pub type MidiIn = DirectionalConnection<
    midir::MidiInput,
    midir::MidiInputConnection<channel::Sender<Msg>>,
    channel::Sender<Msg>,
>;
pub type MidiOut = DirectionalConnection<midir::MidiOutput, midir::MidiOutputConnection, ()>;

pub enum DirectionalConnection<IO, C, D> {
    Connected(C),
    Disconnected((IO, D)),
    None,
}

impl<IO, C, D> Default for DirectionalConnection<IO, C, D> {
    fn default() -> Self {
        Self::None
    }
}

impl<IO, C, D> DirectionalConnection<IO, C, D> {
    /// Closes the connection if any, keeping any other state as is.
    fn close_with(&mut self, close: impl FnOnce(C) -> (IO, D)) {
        *self = match std::mem::take(self) {
            Self::Connected(conn) => Self::Disconnected(close(conn)),
            other => other,
        };
    }

    /// Returns the disconnected IO, leaving `None` in its place.
    ///
    /// Any other state is kept.
    fn take_disconnected(&mut self) -> Result<(IO, D), Error> {
        match std::mem::take(self) {
            Self::Disconnected(io_data) => Ok(io_data),
            other => {
                *self = other;
                Err(Error::NotConnected)
            }
        }
    }
}

impl MidiIn {
    pub fn try_new(client_name: &str, msg_tx: channel::Sender<Msg>) -> Result<Self, Error> {
        Ok(Self::Disconnected((midir::MidiInput::new(client_name)?, msg_tx)))
    }

    /// Connects `port` and forwards every incoming message to the channel.
    ///
    /// The `midir` callback runs on the backend thread: it must not do
    /// anything but hand the bytes over.
    pub fn connect(
        &mut self,
        port_name: Arc<str>,
        port: &midir::MidiInputPort,
        client_port_name: &str,
    ) -> Result<(), Error> {
        self.disconnect();
        let (midi_input, msg_tx) = self.take_disconnected()?;

        let forward = |_ts: u64, buf: &[u8], msg_tx: &mut channel::Sender<Msg>| {
            let _ = msg_tx.send(Msg::from(buf));
        };

        match midi_input.connect(port, client_port_name, forward, msg_tx.clone()) {
            Ok(conn) => {
                *self = Self::Connected(conn);
                Ok(())
            }
            Err(err) => {
                // err.into_inner() doesn't give the sender back.
                *self = Self::Disconnected((err.into_inner(), msg_tx));
                let err = Error::Connection(port_name);
                log::error!("{err}");
                Err(err)
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.close_with(|conn| conn.close());
    }
}

impl MidiOut {
    pub fn try_new(client_name: &str) -> Result<Self, Error> {
        Ok(Self::Disconnected((midir::MidiOutput::new(client_name)?, ())))
    }

    pub fn connect(
        &mut self,
        port_name: Arc<str>,
        port: &midir::MidiOutputPort,
        client_port_name: &str,
    ) -> Result<(), Error> {
        self.disconnect();
        let (midi_output, ()) = self.take_disconnected()?;

        match midi_output.connect(port, client_port_name) {
            Ok(conn) => {
                *self = Self::Connected(conn);
                Ok(())
            }
            Err(err) => {
                *self = Self::Disconnected((err.into_inner(), ()));
                let err = Error::Connection(port_name);
                log::error!("{err}");
                Err(err)
            }
        }
    }

    pub fn send(&mut self, msg: &Msg) -> Result<(), Error> {
        match self {
            Self::Connected(conn) => {
                conn.send(msg).map_err(|err| {
                    log::error!("Failed to send MIDI msg {}: {err}", msg.display());
                    err
                })?;
            }
            _ => {
                log::warn!("Attempt to send a msg, but MIDI Out is not connected");
                return Err(Error::NotConnected);
            }
        }

        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.close_with(|conn| (conn.close(), ()));
    }
}
