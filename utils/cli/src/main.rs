use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use pilights_app::{
    core::{ChipsetKind, SequenceRequest, StripConfig},
    App, Notification,
};
use pilights_network::DEFAULT_PORT;
use tokio::net::TcpListener;

/// PiLights LED strip controller
///
/// Drives a WS2801 or LPD8806 LED strip connected to the SPI bus with the named pulse
/// sequences.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    strip: StripArgs,
    /// Actual command
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct StripArgs {
    /// Strip configuration file in the JSON format
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// The number of LEDs in the strip
    #[arg(long, global = true)]
    led_count: Option<u16>,
    /// Strip chipset: ws2801 or lpd8806
    #[arg(long = "type", value_name = "TYPE", global = true)]
    kind: Option<ChipsetKind>,
    /// Path to the SPI device
    #[arg(long, value_name = "PATH", global = true)]
    device: Option<String>,
    /// Master brightness between 0.0 and 1.0
    #[arg(long, global = true)]
    brightness: Option<f32>,
}

impl StripArgs {
    /// Reads the configuration file, if any, and applies the command line overrides.
    fn strip_config(&self) -> anyhow::Result<StripConfig> {
        let mut config = if let Some(path) = &self.config {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Unable to open config file {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("Unable to parse config file {}", path.display()))?
        } else {
            StripConfig::default()
        };

        if let Some(led_count) = self.led_count {
            config.led_count = led_count;
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(device) = &self.device {
            config.device = device.clone();
        }
        if let Some(brightness) = self.brightness {
            config.brightness = brightness;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Listen sequence requests over HTTP
    Serve {
        /// Listening socket address
        #[arg(short, long, default_value_t = SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))]
        listen: SocketAddr,
    },
    /// Run a single sequence and wait until it ends
    Run {
        /// Sequence name, e.g. blue_pulse
        sequence: String,
        /// The number of pulses
        #[arg(short, long)]
        iterations: Option<u32>,
        /// Delay between the waveform steps in milliseconds
        #[arg(short, long, value_name = "MS")]
        delay: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { listen } => {
            let mut app = App::new();
            app.handle_notification(Notification::Start(cli.strip.strip_config()?));

            let listener = TcpListener::bind(listen)
                .await
                .with_context(|| format!("Unable to bind listener to {listen}"))?;
            pilights_network::serve(listener, app).await?;
        }
        Command::Run {
            sequence,
            iterations,
            delay,
        } => {
            let mut app = App::new();
            app.start(cli.strip.strip_config()?);

            let request = SequenceRequest {
                iterations,
                delay,
                ..SequenceRequest::new(sequence)
            };
            log::info!("Running sequence {request:?}");
            let outcome = app.run_sequence(request)?.wait().await;
            log::info!("Sequence ended: {outcome:?}");
        }
        Command::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }

    Ok(())
}
