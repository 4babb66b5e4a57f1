use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use hatlight_app::{
    core::{Display, Rotation},
    toll::{local_hour, source::TOKEN_ENV_VAR, MAX_TOLL},
    HatlightError, PatternAnimator, PatternConfig, StaticRates, TollConfig, TollGauge,
    TollRateSource, WsdotClient,
};
use hatlight_display::TerminalDisplay;

/// LED matrix display utility
///
/// Paints animations and the I-405 toll rates on a 16x16 RGB LED matrix
/// or on its terminal simulator.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = false)]
struct Cli {
    /// Display backend
    #[arg(short, long, value_enum, default_value_t = Backend::Terminal)]
    backend: Backend,
    /// SPI device the matrix is attached to
    #[arg(long, default_value = "/dev/spidev0.0", value_name = "PATH")]
    spi_device: PathBuf,
    /// Display rotation, rounded to the nearest quarter turn
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true, value_name = "DEGREES")]
    rotation: i32,
    /// Actual command
    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Copy, Clone, PartialEq, Eq, Debug)]
#[value(rename_all = "lower")]
enum Backend {
    /// Draw the matrix in the terminal
    Terminal,
    /// Pimoroni Unicorn HAT HD
    Hat,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fade a rounded rectangle of a random color in and out until interrupted
    RoundRect {
        /// Light up the pixel at the origin while fading in
        #[arg(long)]
        mark_origin: bool,
        /// Seed of the color generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the current I-405 toll rates
    Toll {
        /// WSDOT Traveler Information API access code
        #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
        token: Option<String>,
        /// Display brightness
        #[arg(long, default_value_t = 0.8)]
        brightness: f32,
        /// Toll that lights up the whole bar, in cents
        #[arg(long, default_value_t = MAX_TOLL, value_parser = clap::value_parser!(u32).range(1..))]
        max_toll: u32,
        /// Request timeout
        #[arg(long, default_value_t = 10, value_name = "SECS")]
        timeout: u64,
        /// Hour used to pick the trips direction instead of the local time
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
        /// Read the toll rates from a file instead of the WSDOT API
        #[arg(long, value_name = "FILE")]
        rates_file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

fn open_display(backend: Backend, spi_device: &Path) -> anyhow::Result<Box<dyn Display>> {
    let display: Box<dyn Display> = match backend {
        Backend::Terminal => Box::new(TerminalDisplay::stdout()),
        #[cfg(feature = "hardware")]
        Backend::Hat => Box::new(hatlight_display::UnicornHatHd::open(spi_device)?),
        #[cfg(not(feature = "hardware"))]
        Backend::Hat => anyhow::bail!(
            "Unable to open {}: built without the `hardware` feature",
            spi_device.display()
        ),
    };
    Ok(display)
}

async fn show_toll<S: TollRateSource, D: Display>(
    source: S,
    display: &mut D,
    config: TollConfig,
    hour: u32,
) -> anyhow::Result<()> {
    let reading = TollGauge::new(source, config).render(display, hour).await?;
    log::trace!("Rendered {reading:?}");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Cli {
        backend,
        spi_device,
        rotation,
        command,
    } = Cli::parse();
    let rotation = Rotation::from_degrees(rotation);
    match command {
        Command::RoundRect { mark_origin, seed } => {
            let display = open_display(backend, &spi_device)?;
            let config = PatternConfig {
                mark_origin,
                rotation,
                ..PatternConfig::default()
            };
            let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let mut animator = PatternAnimator::with_rng(display, config, rng);

            log::info!("Starting rounded rectangle animation, press Ctrl-C to quit");
            animator
                .run_until(async {
                    tokio::signal::ctrl_c()
                        .await
                        .map_err(HatlightError::device)
                })
                .await?;
        }
        Command::Toll {
            token,
            brightness,
            max_toll,
            timeout,
            hour,
            rates_file,
        } => {
            let config = TollConfig {
                brightness,
                rotation,
                max_toll,
            };
            let hour = hour.unwrap_or_else(local_hour);

            let mut display = open_display(backend, &spi_device)?;
            if let Some(path) = rates_file {
                log::info!("Reading toll rates from {}", path.display());
                show_toll(StaticRates::from_file(path)?, &mut display, config, hour).await?;
            } else {
                let client = WsdotClient::new(token, Duration::from_secs(timeout))?;
                show_toll(client, &mut display, config, hour).await?;
            }
        }

        Command::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }

    Ok(())
}
