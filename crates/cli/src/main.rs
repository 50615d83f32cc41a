//! open-space-hub CLI: stream 6DoF controller motion to the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use open_space_hub_core::device::DeviceFilter;
use open_space_hub_core::event::MotionEvent;
use open_space_hub_core::hid::HidApiBus;
use open_space_hub_core::session::SessionManager;
use open_space_hub_core::transport::HidBus;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "open-space-hub",
    version,
    about = "Open-source driver for 3Dconnexion SpaceMouse controllers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected 3Dconnexion controllers.
    ListDevices {
        /// Emit the device list as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Connect to a controller and stream decoded motion events.
    Watch {
        /// Emit events as JSON lines instead of plain text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices { json } => {
            let bus = HidApiBus::new()?;
            let devices = bus.list_authorized(&DeviceFilter::default())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else if devices.is_empty() {
                println!("No 3Dconnexion controller found.");
                println!("Ensure your controller is connected and you have HID access rights.");
            } else {
                for dev in &devices {
                    let name = dev
                        .model()
                        .map(|m| m.name())
                        .unwrap_or("Unknown 6DoF controller");
                    println!(
                        "{name} (VID: 0x{:04X}, PID: 0x{:04X}, path: {})",
                        dev.vendor_id, dev.product_id, dev.path
                    );
                }
            }
        }
        Commands::Watch { json } => {
            let bus = Arc::new(HidApiBus::new()?);
            let manager = SessionManager::new(bus, DeviceFilter::default());

            manager.subscribe(move |event| print_event(event, json));

            if !manager.initialize()? && !manager.request_scan()? {
                anyhow::bail!("No 3Dconnexion controller found");
            }

            // Reports arrive on the reader thread; park until interrupted.
            loop {
                std::thread::sleep(Duration::from_secs(1));
            }
        }
    }

    Ok(())
}

fn print_event(event: &MotionEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("failed to serialize event: {e}"),
        }
        return;
    }

    match event {
        MotionEvent::Connected { name } => println!("Connected: {name}"),
        MotionEvent::Disconnected => println!("Disconnected"),
        MotionEvent::Translation { x, y, z } => {
            println!("translate  x={x:6} y={y:6} z={z:6}");
        }
        MotionEvent::Rotation { rx, ry, rz } => {
            println!("rotate    rx={rx:6} ry={ry:6} rz={rz:6}");
        }
    }
}
