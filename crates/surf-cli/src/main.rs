//! SurfGraph command-line front end.
//!
//! Evaluates surface and curve equations and writes the coordinate arrays
//! (or a triangle mesh / polyline) as JSON for a rendering layer.
//!
//! # Usage
//!
//! ```bash
//! # Direct parametric surface on the default 100x100 grid
//! surfgraph surface --x "(3 + cos(v)) * cos(u)" --y "(3 + cos(v)) * sin(u)" --z "sin(v)"
//!
//! # Polar surface, exported as a mesh
//! surfgraph surface --polar --x 1 --y u --z v --v-max 3.141592653589793 --mesh
//!
//! # Spherical curve
//! surfgraph curve --rho 1 --theta "8 * t" --phi t --t-max 3.141592653589793
//!
//! # Built-in examples
//! surfgraph presets --render
//! surfgraph preset klein-bottle -o klein.json
//! ```

mod output;

use std::f64::consts::TAU;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use ndarray::ArrayD;
use rayon::prelude::*;
use surf_core::SamplingConfig;
use surf_expr::{Expression, Namespace};
use surf_field::{presets, CoordinateMode, PlotRequest};

use output::{FieldDocument, GeometryDocument, PresetSummary};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "surfgraph",
    version,
    about = "Evaluate parametric and polar surfaces/curves and export them as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log evaluation details (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with sampling resolution (`surface_u`, `surface_v`, `curve_t`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Samples along u (overrides the config file)
    #[arg(long, global = true)]
    nu: Option<usize>,

    /// Samples along v (overrides the config file)
    #[arg(long, global = true)]
    nv: Option<usize>,

    /// Samples along t (overrides the config file)
    #[arg(long, global = true)]
    nt: Option<usize>,

    /// Write output here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a surface over u and v
    Surface {
        /// X equation (rho with --polar)
        #[arg(long, allow_hyphen_values = true)]
        x: String,
        /// Y equation (theta with --polar)
        #[arg(long, allow_hyphen_values = true)]
        y: String,
        /// Z equation (phi with --polar)
        #[arg(long, allow_hyphen_values = true)]
        z: String,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        u_min: f64,
        #[arg(long, default_value_t = TAU, allow_hyphen_values = true)]
        u_max: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        v_min: f64,
        #[arg(long, default_value_t = TAU, allow_hyphen_values = true)]
        v_max: f64,
        /// Treat the equations as (rho, theta, phi)
        #[arg(long)]
        polar: bool,
        #[command(flatten)]
        export: Export,
    },
    /// Evaluate a spherical curve over t
    Curve {
        #[arg(long, allow_hyphen_values = true)]
        rho: String,
        #[arg(long, allow_hyphen_values = true)]
        theta: String,
        #[arg(long, allow_hyphen_values = true)]
        phi: String,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        t_min: f64,
        #[arg(long, default_value_t = TAU, allow_hyphen_values = true)]
        t_max: f64,
        #[command(flatten)]
        export: Export,
    },
    /// Evaluate a plot request read from a JSON file
    Request {
        file: PathBuf,
        #[command(flatten)]
        export: Export,
    },
    /// Evaluate a built-in example
    Preset {
        name: String,
        #[command(flatten)]
        export: Export,
    },
    /// List built-in examples
    Presets {
        /// Evaluate every preset in parallel and print a summary
        #[arg(long)]
        render: bool,
    },
    /// Parse an expression and report its structure and names
    Check {
        #[arg(allow_hyphen_values = true)]
        expression: String,
        /// Check names against the curve parameter `t` instead of `u`, `v`
        #[arg(long)]
        curve: bool,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct Export {
    /// Export a triangle mesh (surfaces) or polyline (curves) instead of raw arrays
    #[arg(long)]
    mesh: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn sampling_config(cli: &Cli) -> Result<SamplingConfig> {
    let mut config = match &cli.config {
        Some(path) => SamplingConfig::from_json_file(path)?,
        None => SamplingConfig::default(),
    };
    if let Some(n) = cli.nu {
        config.surface_u = n;
    }
    if let Some(n) = cli.nv {
        config.surface_v = n;
    }
    if let Some(n) = cli.nt {
        config.curve_t = n;
    }
    Ok(config)
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn render(
    request: &PlotRequest,
    export: Export,
    config: &SamplingConfig,
    output: Option<&PathBuf>,
) -> Result<()> {
    let triple = request.generate(config)?;

    let report = triple.domain_report();
    if !report.is_clean() {
        log::warn!(
            "{} of {} samples are non-finite (x, y, z = {:?}); they are written as null",
            report.non_finite.iter().max().copied().unwrap_or(0),
            report.total,
            report.non_finite
        );
    }

    if !export.mesh {
        return write_json(&FieldDocument::new(request, &triple), output);
    }
    let geometry = if request.is_curve() {
        GeometryDocument::polyline(surf_mesh::curve_to_polyline(&triple)?)
    } else {
        GeometryDocument::mesh(surf_mesh::surface_to_mesh(&triple)?)
    };
    write_json(&geometry, output)
}

fn find_preset(name: &str) -> Result<presets::Preset> {
    presets::find(name).ok_or_else(|| {
        let known: Vec<_> = presets::all().iter().map(|p| p.name).collect();
        format!("unknown preset '{name}' (known: {})", known.join(", ")).into()
    })
}

fn list_presets(render_all: bool, config: &SamplingConfig, output: Option<&PathBuf>) -> Result<()> {
    let all = presets::all();
    if !render_all {
        for preset in &all {
            println!("{:<18} {:<8} {}", preset.name, output::kind(&preset.request), preset.description);
        }
        return Ok(());
    }

    // Calls share nothing, so each preset is generated on its own worker.
    let summaries: Vec<PresetSummary> = all
        .par_iter()
        .map(|preset| {
            PresetSummary::new(preset.name, &preset.request, preset.request.generate(config))
        })
        .collect();
    write_json(&summaries, output)
}

fn check_expression(source: &str, curve: bool) -> Result<()> {
    let expr = Expression::parse(source)?;
    // Names are checked against placeholder bindings; no values are computed.
    let placeholder = || ArrayD::<f64>::zeros(ndarray::IxDyn(&[1]));
    let ns = if curve {
        Namespace::new().with("t", placeholder())
    } else {
        Namespace::new().with("u", placeholder()).with("v", placeholder())
    };
    expr.check(&ns)?;

    println!("parsed:      {}", expr.tree());
    println!("nodes:       {}", expr.tree().node_count());
    let names: Vec<_> = expr.identifiers().into_iter().collect();
    println!("identifiers: {}", names.join(", "));
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = sampling_config(&cli)?;
    let output = cli.output.as_ref();

    match cli.command {
        Command::Surface {
            x,
            y,
            z,
            u_min,
            u_max,
            v_min,
            v_max,
            polar,
            export,
        } => {
            let mode = if polar { CoordinateMode::Polar } else { CoordinateMode::Direct };
            let request = PlotRequest::surface(
                [x.as_str(), y.as_str(), z.as_str()],
                (u_min, u_max),
                (v_min, v_max),
                mode,
            );
            render(&request, export, &config, output)
        }
        Command::Curve {
            rho,
            theta,
            phi,
            t_min,
            t_max,
            export,
        } => {
            let request =
                PlotRequest::curve([rho.as_str(), theta.as_str(), phi.as_str()], (t_min, t_max));
            render(&request, export, &config, output)
        }
        Command::Request { file, export } => {
            let text = std::fs::read_to_string(&file)?;
            let request: PlotRequest = serde_json::from_str(&text)?;
            render(&request, export, &config, output)
        }
        Command::Preset { name, export } => {
            let preset = find_preset(&name)?;
            log::info!("{}: {}", preset.name, preset.description);
            render(&preset.request, export, &config, output)
        }
        Command::Presets { render: render_all } => list_presets(render_all, &config, output),
        Command::Check { expression, curve } => check_expression(&expression, curve),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error plotting the graph: {e}");
            eprintln!("Please check your equation syntax.");
            ExitCode::FAILURE
        }
    }
}
