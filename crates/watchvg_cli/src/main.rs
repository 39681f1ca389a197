//! watchvg CLI
//!
//! Evaluate watch-face geometry and motion from the command line. Every
//! command prints a JSON report on stdout; logs go to stderr.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use watchvg_animation::Easing;
use watchvg_cli::config::{ArcItem, CurveItem, GradientItem, HandStyle, HandsItem, MotionItem};
use watchvg_cli::{report, SceneConfig};
use watchvg_paint::Cap;

#[derive(Parser)]
#[command(name = "watchvg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Watch-face vector geometry and motion", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a thick arc outline
    Arc {
        /// Diameter measured along the middle of the band
        #[arg(short, long, default_value_t = 100.0)]
        diameter: f32,

        /// Vertical diameter, for elliptic arcs
        #[arg(long)]
        vertical_diameter: Option<f32>,

        /// Band thickness
        #[arg(short, long, default_value_t = 1.0)]
        thickness: f32,

        /// Start angle in degrees
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f32,

        /// Sweep in degrees, negative for clockwise
        #[arg(long, allow_negative_numbers = true)]
        sweep: f32,

        /// End caps
        #[arg(short, long, value_enum, default_value_t = CapArg::Rounded)]
        cap: CapArg,
    },

    /// Fit a smooth chart curve through samples
    Curve {
        /// Horizontal distance between samples
        #[arg(long, default_value_t = 10.0)]
        step: f32,

        /// Line thickness
        #[arg(short, long, default_value_t = 2.0)]
        thickness: f32,

        /// Build the filled area under the curve instead of the line
        #[arg(long)]
        area: bool,

        /// Height of the chart box
        #[arg(long, default_value_t = 100.0)]
        height: f32,

        /// Sample values
        #[arg(required = true, allow_negative_numbers = true)]
        samples: Vec<f32>,
    },

    /// Evaluate a multi-stop gradient
    Gradient {
        /// Stop colors (#AARRGGBB, 0xAARRGGBB or #RRGGBB)
        #[arg(long, required = true, value_delimiter = ',')]
        colors: Vec<String>,

        /// Stop offsets in [0, 1]; evenly spread when omitted
        #[arg(long, value_delimiter = ',')]
        stops: Vec<f32>,

        /// Gradient angle in degrees
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        angle: i32,

        /// Positions to evaluate
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        at: Vec<f32>,

        /// Also print a lookup table of this length
        #[arg(long, default_value_t = 0)]
        table: usize,
    },

    /// Sample a motion frame by frame
    Motion {
        /// Start value (the resting value of a bounce)
        #[arg(long, allow_negative_numbers = true)]
        from: f32,

        /// Stop value, defaults to the start value
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f32>,

        /// Duration in milliseconds
        #[arg(short, long, default_value_t = 300)]
        duration: u64,

        /// Easing curve (linear, quad_in, cubic_out, ...)
        #[arg(short, long, conflicts_with = "bounce")]
        easing: Option<Easing>,

        /// Bounce with this amplitude instead of easing
        #[arg(short, long)]
        bounce: Option<f32>,

        /// Frames per second of the sampling
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },

    /// Compute watch-hand angles at a time of day
    Hands {
        /// Time as HH:MM[:SS[.mmm]]
        time: String,

        /// Second hand behavior
        #[arg(short, long, value_enum, default_value_t = StyleArg::Linear)]
        style: StyleArg,
    },

    /// Evaluate every item of a scene file
    Scene {
        /// Scene TOML file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CapArg {
    Rounded,
    Perpendicular,
}

impl From<CapArg> for Cap {
    fn from(cap: CapArg) -> Self {
        match cap {
            CapArg::Rounded => Cap::Rounded,
            CapArg::Perpendicular => Cap::Perpendicular,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Linear,
    Tick,
    Quartic,
}

impl From<StyleArg> for HandStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Linear => HandStyle::Linear,
            StyleArg::Tick => HandStyle::Tick,
            StyleArg::Quartic => HandStyle::Quartic,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Arc {
            diameter,
            vertical_diameter,
            thickness,
            start,
            sweep,
            cap,
        } => {
            let item = ArcItem {
                name: None,
                diameter,
                vertical_diameter,
                thickness,
                start_angle: start,
                arc_angle: sweep,
                cap: cap.into(),
            };
            emit(&report::arc(&item)?, cli.pretty)
        }

        Commands::Curve {
            step,
            thickness,
            area,
            height,
            samples,
        } => {
            let item = CurveItem {
                name: None,
                step,
                thickness,
                area,
                height,
                samples,
            };
            emit(&report::curve(&item)?, cli.pretty)
        }

        Commands::Gradient {
            colors,
            stops,
            angle,
            at,
            table,
        } => {
            let item = GradientItem {
                name: None,
                colors,
                stops,
                angle,
                at,
                table,
            };
            emit(&report::gradient(&item)?, cli.pretty)
        }

        Commands::Motion {
            from,
            to,
            duration,
            easing,
            bounce,
            fps,
        } => {
            if fps == 0 {
                anyhow::bail!("--fps must be at least 1");
            }
            let item = MotionItem {
                name: None,
                from,
                to,
                duration_ms: duration,
                easing,
                bounce,
                frame_ms: (1_000 / u64::from(fps)).max(1),
            };
            emit(&report::motion(&item)?, cli.pretty)
        }

        Commands::Hands { time, style } => {
            let item = HandsItem {
                name: None,
                time,
                style: style.into(),
            };
            emit(&report::hands(&item)?, cli.pretty)
        }

        Commands::Scene { file } => {
            let config = SceneConfig::load_from_file(&file)?;
            emit(&report::scene(&config)?, cli.pretty)
        }
    }
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    debug!(bytes = json.len(), "report serialized");
    println!("{json}");
    Ok(())
}
