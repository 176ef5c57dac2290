use crossbeam_channel as channel;
use std::{collections::BTreeMap, fmt, sync::Arc};

use super::{io, Error, Msg};

pub type PortsIn = DirectionalPorts<
    midir::MidiInput,
    midir::MidiInputConnection<channel::Sender<Msg>>,
    channel::Sender<Msg>,
>;
pub type PortsOut = DirectionalPorts<midir::MidiOutput, midir::MidiOutputConnection, ()>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    In,
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &str {
        match self {
            Direction::In => "In Port",
            Direction::Out => "Out Port",
        }
    }
}

pub struct DirectionalPorts<IO: midir::MidiIO, Conn, D> {
    map: BTreeMap<Arc<str>, IO::Port>,
    cur: Option<Arc<str>>,
    midi_conn: io::DirectionalConnection<IO, Conn, D>,
    client_name: Arc<str>,
}

impl<IO: midir::MidiIO, Conn, D> DirectionalPorts<IO, Conn, D> {
    pub fn list(&self) -> impl Iterator<Item = Arc<str>> + '_ {
        self.map.keys().cloned()
    }

    /// Returns the first port whose name contains `fragment`, ignoring case.
    pub fn find(&self, fragment: &str) -> Option<Arc<str>> {
        let fragment = fragment.to_lowercase();
        self.map
            .keys()
            .find(|name| name.to_lowercase().contains(&fragment))
            .cloned()
    }

    fn port(&self, port_name: &Arc<str>) -> Result<IO::Port, Error> {
        self.map
            .get(port_name)
            .cloned()
            .ok_or_else(|| Error::PortNotFound(port_name.clone()))
    }

    fn refresh_from(&mut self, conn: IO) -> Result<(), Error> {
        self.map.clear();

        for port in conn.ports().iter() {
            let name = conn.port_name(port)?;
            // Skip our own virtual ports.
            if !name.starts_with(self.client_name.as_ref()) {
                self.map.insert(name.into(), port.clone());
            }
        }

        Ok(())
    }
}

impl PortsIn {
    pub fn try_new(client_name: Arc<str>, msg_tx: channel::Sender<Msg>) -> Result<Self, Error> {
        Ok(Self {
            map: BTreeMap::new(),
            cur: None,
            midi_conn: io::MidiIn::try_new(&client_name, msg_tx)?,
            client_name,
        })
    }

    pub fn refresh(&mut self) -> Result<(), Error> {
        let temp_conn = midir::MidiInput::new(&format!("{} refresh In ports", self.client_name))?;
        self.refresh_from(temp_conn)
    }

    pub fn connect(&mut self, port_name: Arc<str>) -> Result<(), Error> {
        let port = self.port(&port_name)?;

        self.midi_conn
            .connect(port_name.clone(), &port, &self.client_name)
            .map_err(|_| {
                self.cur = None;
                Error::PortConnection
            })?;

        log::info!("Connected for Input to {port_name}");
        self.cur = Some(port_name);

        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.midi_conn.disconnect();

        if let Some(cur) = self.cur.take() {
            log::debug!("Disconnected Input from {cur}");
        }
    }
}

impl PortsOut {
    pub fn try_new(client_name: Arc<str>) -> Result<Self, Error> {
        Ok(Self {
            map: BTreeMap::new(),
            cur: None,
            midi_conn: io::MidiOut::try_new(&client_name)?,
            client_name,
        })
    }

    pub fn refresh(&mut self) -> Result<(), Error> {
        let temp_conn =
            midir::MidiOutput::new(&format!("{} refresh Out ports", self.client_name))?;
        self.refresh_from(temp_conn)
    }

    pub fn connect(&mut self, port_name: Arc<str>) -> Result<(), Error> {
        let port = self.port(&port_name)?;

        self.midi_conn
            .connect(port_name.clone(), &port, &self.client_name)
            .map_err(|_| {
                self.cur = None;
                Error::PortConnection
            })?;

        log::info!("Connected for Output to {port_name}");
        self.cur = Some(port_name);

        Ok(())
    }

    pub fn send(&mut self, msg: &Msg) -> Result<(), Error> {
        self.midi_conn.send(msg)
    }

    pub fn disconnect(&mut self) {
        self.midi_conn.disconnect();

        if let Some(cur) = self.cur.take() {
            log::debug!("Disconnected Output from {cur}");
        }
    }
}
