use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use noise_engine::{Amplitude, Curve, Dimensions, FieldRequest, NoiseConfig, NoiseEngine, NoiseOptions, OctaveEngine, SampleKind, ScheduleKind, Seed};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod preview;
use preview::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CurveArg { Linear, Cubic }

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg { Value, Gradient }

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AmplitudeArg { Inverse, Constant, Persistence }

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg { Png, Json, Ascii }

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "noise_preview")]
#[command(about = "Generate octave noise fields and export them as images or data", long_about = None)]
struct Args {
    /// RON config file; replaces every field flag below
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the random source (overrides the config's seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Generate a 1D line of this many samples instead of a plane
    #[arg(long, value_name = "SAMPLES")]
    line: Option<usize>,

    #[arg(long, default_value_t = 256)]
    width: usize,

    #[arg(long, default_value_t = 256)]
    height: usize,

    #[arg(long, default_value_t = 2)]
    min_frequency: usize,

    #[arg(long, default_value_t = 32)]
    max_frequency: usize,

    /// Amplitude per octave: inverse (1/f), constant (--gain), persistence (--gain per doubling)
    #[arg(long, value_enum, default_value = "inverse")]
    amplitude: AmplitudeArg,

    #[arg(long, default_value_t = 0.5)]
    gain: f64,

    #[arg(long, value_enum, default_value = "linear")]
    curve: CurveArg,

    #[arg(long, value_enum, default_value = "value")]
    kind: KindArg,

    /// Make opposite edges of the field match
    #[arg(long)]
    tile: bool,

    /// Decimal places kept after normalization
    #[arg(long, default_value_t = 2)]
    precision: u32,

    /// Keep full floating-point precision
    #[arg(long, conflicts_with = "precision")]
    full_precision: bool,

    #[arg(long, value_enum, default_value = "png")]
    format: FormatArg,

    /// Output file; json and ascii go to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the effective config as RON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn request(&self) -> FieldRequest {
        let dimensions = match self.line {
            Some(length) => Dimensions::Line { length },
            None => Dimensions::Plane { width: self.width, height: self.height },
        };
        let amplitude = match self.amplitude {
            AmplitudeArg::Inverse => Amplitude::InverseFrequency,
            AmplitudeArg::Constant => Amplitude::Constant(self.gain),
            AmplitudeArg::Persistence => Amplitude::Persistence(self.gain),
        };
        let options = NoiseOptions {
            curve: match self.curve { CurveArg::Linear => Curve::Linear, CurveArg::Cubic => Curve::Cubic },
            kind: match self.kind { KindArg::Value => SampleKind::Value, KindArg::Gradient => SampleKind::Gradient },
            tile: self.tile,
            precision: (!self.full_precision).then_some(self.precision),
        };
        FieldRequest { dimensions, min_frequency: self.min_frequency, max_frequency: self.max_frequency, amplitude, schedule: ScheduleKind::Halving, options }
    }

    fn noise_config(&self) -> anyhow::Result<NoiseConfig> {
        let mut config = match &self.config {
            Some(path) => NoiseConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => NoiseConfig { seed: None, request: self.request() },
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    fn format(&self) -> Format {
        match self.format {
            FormatArg::Png => Format::Png,
            FormatArg::Json => Format::Json,
            FormatArg::Ascii => Format::Ascii,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();
    let config = args.noise_config()?;
    if args.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    let seed = Seed(config.seed.unwrap_or_default());
    info!(seed = seed.0, dimensions = ?config.request.dimensions, "generating field");
    let mut engine = OctaveEngine::from_seed(seed);
    let field = engine.generate(&config.request).context("generating field")?;

    preview::export(&field, args.format(), args.output.as_deref()).context("exporting field")?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), "wrote field");
    }
    Ok(())
}
