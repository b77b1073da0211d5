//! surfit CLI - estimate a value at a location from scattered samples

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use surfit_algorithms::interpolation::{GaussianParams, IdwParams, KernelLog, Method, TpsParams};
use surfit_core::{Interpolator, SamplePoint, TargetPoint};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "surfit")]
#[command(author, version, about = "Spatial interpolation from scattered points", long_about = None)]
struct Cli {
    /// Verbose output (debug level, overriding RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Sample points as 'x,y,z;x,y,z;...'
    #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
    points: Option<String>,
    /// JSON file holding an array of {"x", "y", "z"} objects
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Target location as 'x,y'
    #[arg(short, long, allow_hyphen_values = true)]
    target: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Triangulated irregular network (linear within Delaunay triangles)
    Tin {
        #[command(flatten)]
        input: Input,
    },
    /// Inverse distance weighting
    Idw {
        #[command(flatten)]
        input: Input,
        /// Distance power (> 0)
        #[arg(long, default_value = "2.0")]
        power: f64,
    },
    /// Gaussian kernel smoothing
    Gaussian {
        #[command(flatten)]
        input: Input,
        /// Kernel bandwidth; defaults to the largest sample distance
        #[arg(short, long)]
        bandwidth: Option<f64>,
    },
    /// Global first-order trend surface
    Trend {
        #[command(flatten)]
        input: Input,
    },
    /// Thin plate spline
    Tps {
        #[command(flatten)]
        input: Input,
        /// Smoothing parameter (0 = exact interpolation)
        #[arg(short, long, default_value = "0.0")]
        smoothing: f64,
        /// Use r²·ln(r) instead of r²·log10(r) as the kernel
        #[arg(long)]
        natural_log: bool,
    },
    /// Run every method and report each result
    All {
        #[command(flatten)]
        input: Input,
        /// IDW distance power (> 0)
        #[arg(long, default_value = "2.0")]
        power: f64,
        /// Gaussian kernel bandwidth
        #[arg(short, long)]
        bandwidth: Option<f64>,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

/// `--verbose` forces debug output; otherwise RUST_LOG applies, then info.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn setup_logging(verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}

fn parse_coords<const N: usize>(s: &str, what: &str) -> Result<[f64; N]> {
    let parts: Vec<&str> = s.trim().split(',').collect();
    if parts.len() != N {
        anyhow::bail!("{} must have {} comma-separated values, got: {}", what, N, s);
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .with_context(|| format!("Invalid number '{}' in {}", part.trim(), what))?;
    }
    Ok(out)
}

fn parse_points(s: &str) -> Result<Vec<SamplePoint>> {
    s.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let [x, y, z] = parse_coords::<3>(chunk, "Sample point")?;
            Ok(SamplePoint::new(x, y, z))
        })
        .collect()
}

fn read_points(path: &PathBuf) -> Result<Vec<SamplePoint>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load(input: &Input) -> Result<(Vec<SamplePoint>, TargetPoint)> {
    let points = match (&input.points, &input.input) {
        (Some(inline), _) => parse_points(inline)?,
        (None, Some(path)) => read_points(path)?,
        (None, None) => anyhow::bail!("Provide sample points with --points or --input"),
    };
    let [x, y] = parse_coords::<2>(&input.target, "Target")?;
    info!("Loaded {} sample points, target ({}, {})", points.len(), x, y);
    Ok((points, TargetPoint::new(x, y)))
}

fn report(methods: &[Method], points: &[SamplePoint], target: TargetPoint, json: bool) -> Result<()> {
    let single = methods.len() == 1;
    let mut results = serde_json::Map::new();

    for method in methods {
        let start = Instant::now();
        let outcome = method.interpolate(points, target);
        debug!("{} finished in {:.2?}", method.name(), start.elapsed());

        match outcome {
            Ok(value) => {
                if json {
                    results.insert(method.name().to_string(), json!(value));
                } else {
                    println!("{}: {:.6}", method.name(), value);
                }
            }
            // A lone method's failure is the command's failure
            Err(e) if single => {
                return Err(e).with_context(|| format!("{} interpolation failed", method.name()));
            }
            Err(e) => {
                if json {
                    results.insert(method.name().to_string(), json!({ "error": e.to_string() }));
                } else {
                    println!("{}: error: {}", method.name(), e);
                }
            }
        }
    }

    if json {
        let doc = json!({ "target": target, "results": results });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let (input, methods) = match cli.command {
        Commands::Tin { input } => (input, vec![Method::Tin]),
        Commands::Idw { input, power } => (input, vec![Method::Idw(IdwParams::with_power(power))]),
        Commands::Gaussian { input, bandwidth } => {
            (input, vec![Method::Gaussian(GaussianParams { bandwidth })])
        }
        Commands::Trend { input } => (input, vec![Method::TrendSurface]),
        Commands::Tps {
            input,
            smoothing,
            natural_log,
        } => {
            let kernel_log = if natural_log {
                KernelLog::Natural
            } else {
                KernelLog::Base10
            };
            (
                input,
                vec![Method::ThinPlateSpline(TpsParams {
                    smoothing,
                    kernel_log,
                })],
            )
        }
        Commands::All {
            input,
            power,
            bandwidth,
        } => (
            input,
            vec![
                Method::Tin,
                Method::Idw(IdwParams::with_power(power)),
                Method::Gaussian(GaussianParams { bandwidth }),
                Method::TrendSurface,
                Method::ThinPlateSpline(TpsParams::default()),
            ],
        ),
    };

    let (points, target) = load(&input)?;
    report(&methods, &points, target, cli.json)
}
