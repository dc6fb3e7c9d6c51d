// src/main.rs - Sample a planned S-curve move to CSV or JSON lines
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};

use scurve_rs::config::{self, OutputFormat, ProfileConfig};
use scurve_rs::motion::{ConstantJerkProfile, MotionPoint, sample};

/// Plan a jerk-limited move and print its sampled jerk, acceleration,
/// velocity and position.
#[derive(Parser, Debug)]
#[command(name = "scurve-sample", about = "Sample a constant-jerk S-curve motion profile.")]
struct Cli {
    /// Path to a TOML config file (overrides defaults)
    #[arg(short, long)]
    config: Option<String>,

    /// Maximum jerk
    #[arg(long)]
    jerk: Option<f64>,

    /// Maximum acceleration
    #[arg(long)]
    accel: Option<f64>,

    /// Maximum velocity
    #[arg(long)]
    velocity: Option<f64>,

    /// Distance to travel
    #[arg(long)]
    distance: Option<f64>,

    /// Sample rate in Hz
    #[arg(long)]
    rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct SampleRecord {
    time: f64,
    jerk: f64,
    acceleration: f64,
    velocity: f64,
    position: f64,
}

impl From<&MotionPoint> for SampleRecord {
    fn from(point: &MotionPoint) -> Self {
        Self {
            time: point.time,
            jerk: point.state.jerk,
            acceleration: point.state.acceleration,
            velocity: point.state.velocity,
            position: point.state.position,
        }
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn main() -> Result<(), BoxError> {
    // Logs go to stderr so stdout stays usable for samples
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(path)?
        }
        None => ProfileConfig::default(),
    };
    apply_overrides(&mut config, &cli);

    if let Err(e) = config.validate() {
        tracing::error!("Rejected configuration: {}", e);
        return Err(e.into());
    }

    let profile = ConstantJerkProfile::new(config.profile.to_parameters()).map_err(|e| {
        tracing::error!("Failed to plan move: {}", e);
        Box::new(e) as BoxError
    })?;
    let b = profile.boundaries();
    tracing::info!("Trajectory {} over {:.4}s", profile.case(), profile.duration());
    tracing::info!(
        "Boundaries: t1={:.4} t2={:.4} t3={:.4} t4={:.4} t5={:.4} t6={:.4} t7={:.4}",
        b.t1,
        b.t2,
        b.t3,
        b.t4,
        b.t5,
        b.t6,
        b.t7
    );

    let points = sample(&profile, config.sampling.rate_hz)?;

    let writer: Box<dyn Write> = match &config.sampling.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    match config.sampling.format {
        OutputFormat::Csv => write_csv(writer, &points)?,
        OutputFormat::Jsonl => write_jsonl(writer, &points)?,
    }

    tracing::info!("Wrote {} samples", points.len());
    Ok(())
}

fn apply_overrides(config: &mut ProfileConfig, cli: &Cli) {
    if let Some(jerk) = cli.jerk {
        config.profile.jerk_max = jerk;
    }
    if let Some(accel) = cli.accel {
        config.profile.acc_max = accel;
    }
    if let Some(velocity) = cli.velocity {
        config.profile.v_max = velocity;
    }
    if let Some(distance) = cli.distance {
        config.profile.distance = distance;
    }
    if let Some(rate) = cli.rate {
        config.sampling.rate_hz = rate;
    }
    if let Some(format) = cli.format {
        config.sampling.format = format;
    }
    if let Some(output) = &cli.output {
        config.sampling.output = Some(output.clone());
    }
}

fn write_csv(writer: Box<dyn Write>, points: &[MotionPoint]) -> Result<(), BoxError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in points {
        wtr.serialize(SampleRecord::from(point))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_jsonl(mut writer: Box<dyn Write>, points: &[MotionPoint]) -> Result<(), BoxError> {
    for point in points {
        let line = serde_json::to_string(&SampleRecord::from(point))?;
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}
