use anyhow::Context;
use clap::Parser;
use std::time::Duration;

pub mod bytes;
pub mod clock;
pub mod config;
pub mod controller;
pub mod ctrl_surf;
pub mod midi;

const CLIENT_NAME: &str = "KeyLab Controller";

/// Drives the lights and display of an Arturia KeyLab from its own controls
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// MIDI input port, defaults to the first one matching --device
    #[arg(long, env = "KEYLAB_IN_PORT")]
    in_port: Option<String>,

    /// MIDI output port, defaults to the first one matching --device
    #[arg(long, env = "KEYLAB_OUT_PORT")]
    out_port: Option<String>,

    /// Part of the device port names
    #[arg(short, long, env = "KEYLAB_DEVICE", default_value = "KeyLab")]
    device: String,

    /// List available MIDI ports
    #[arg(long)]
    list_ports: bool,

    /// Treat the pads as wired bottom to top
    #[arg(long, env = "KEYLAB_INVERT_LED_LAYOUT")]
    invert_led_layout: bool,

    /// Upper case the hints shown on the display
    #[arg(long, env = "KEYLAB_HINT_ALL_CAPS")]
    hint_all_caps: bool,

    /// Turn idle pads off instead of lighting them with a faded color
    #[arg(long, env = "KEYLAB_NO_PAD_COLORS")]
    no_pad_colors: bool,

    /// How long hints stay on the display, in milliseconds
    #[arg(long, env = "KEYLAB_HINT_MS", default_value_t = 1_500)]
    hint_ms: u64,

    /// Maximum interval between two display refreshes, in milliseconds
    #[arg(long, env = "KEYLAB_REFRESH_MS", default_value_t = 50)]
    refresh_ms: u64,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, env = "KEYLAB_LOG_LEVEL", default_value = "info")]
    log_level: log::LevelFilter,
}

impl Args {
    fn config(&self) -> config::Config {
        config::Config {
            invert_led_layout: self.invert_led_layout,
            hint_all_caps: self.hint_all_caps,
            hint_duration: Duration::from_millis(self.hint_ms),
            colorize_pad_lights: !self.no_pad_colors,
            refresh_period: Duration::from_millis(self.refresh_ms.max(1)),
        }
    }

    fn port_selection(&self) -> controller::PortSelection {
        controller::PortSelection {
            input: self.in_port.as_deref().map(Into::into),
            output: self.out_port.as_deref().map(Into::into),
            device: self.device.as_str().into(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    if args.list_ports {
        let ports = controller::list_ports(CLIENT_NAME).context("Listing MIDI ports")?;

        println!("MIDI In ports:");
        for name in ports.ins.iter() {
            println!("\t{name}");
        }
        println!("MIDI Out ports:");
        for name in ports.outs.iter() {
            println!("\t{name}");
        }

        return Ok(());
    }

    let ctrl = controller::Controller::try_new(CLIENT_NAME, &args.port_selection(), args.config())
        .context("Starting controller")?;

    log::info!("Starting");
    ctrl.run();
    log::info!("Exiting");

    Ok(())
}
