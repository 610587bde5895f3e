use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use ants_schedule::{DEFAULT_CONVERGENCE, Dialect, ScheduleRequest, StepMode};

/// Generate a multi-resolution registration schedule (shrink factors,
/// smoothing sigmas, iterations) and print it as ANTs command-line flags.
#[derive(Parser, Debug)]
#[command(name = "ants-schedule", version, about)]
struct Cli {
    /// Minimum resolution of the fixed file (mm).
    #[arg(long = "min", required_unless_present = "config")]
    min_resolution: Option<f64>,

    /// Max size of the fixed file (mm).
    #[arg(long = "max", required_unless_present = "config")]
    max_size: Option<f64>,

    /// Starting scale (mm); default calculated from max size.
    #[arg(long)]
    start_scale: Option<f64>,

    /// Iterations at the finest scale [default: 50 for affine and multilevel-halving, else 25].
    #[arg(long)]
    final_iterations: Option<u32>,

    /// Type of output to generate.
    #[arg(long, value_enum, default_value_t = OutputChoice::Generic)]
    output: OutputChoice,

    /// Step mode: a positive integer shrink step, or `power2` for halving.
    #[arg(long, default_value = "1")]
    step_size: StepMode,

    /// Convergence threshold for generated stages.
    #[arg(long, default_value = DEFAULT_CONVERGENCE)]
    convergence: String,

    /// Read the whole request from a JSON file instead of flags.
    #[arg(
        long,
        conflicts_with_all = [
            "min_resolution",
            "max_size",
            "start_scale",
            "final_iterations",
            "output",
            "step_size",
            "convergence",
        ]
    )]
    config: Option<PathBuf>,

    /// Print the generated schedule as JSON instead of dialect text.
    #[arg(long)]
    json: bool,

    /// Log generation details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputChoice {
    Generic,
    Affine,
    Modelbuild,
    #[value(name = "twolevel_dbm")]
    TwolevelDbm,
    MultilevelHalving,
    ExhaustiveAffine,
}

impl From<OutputChoice> for Dialect {
    fn from(choice: OutputChoice) -> Self {
        match choice {
            OutputChoice::Generic => Dialect::Generic,
            OutputChoice::Affine => Dialect::Affine,
            OutputChoice::Modelbuild => Dialect::Modelbuild,
            OutputChoice::TwolevelDbm => Dialect::TwolevelDbm,
            OutputChoice::MultilevelHalving => Dialect::MultilevelHalving,
            OutputChoice::ExhaustiveAffine => Dialect::ExhaustiveAffine,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let request = build_request(&cli)?;
    tracing::debug!(
        dialect = %request.dialect,
        step = %request.step,
        final_iterations = request.effective_final_iterations(),
        "resolved request"
    );

    let text = if cli.json {
        let mut json = request.schedule()?.to_json()?;
        json.push('\n');
        json
    } else {
        request.run()?
    };

    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())
        .context("write schedule to stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_request(cli: &Cli) -> anyhow::Result<ScheduleRequest> {
    if let Some(path) = &cli.config {
        return ScheduleRequest::from_path(path)
            .with_context(|| format!("load request '{}'", path.display()));
    }

    let min_resolution = cli.min_resolution.context("--min is required")?;
    let max_size = cli.max_size.context("--max is required")?;
    Ok(ScheduleRequest {
        start_scale: cli.start_scale,
        final_iterations: cli.final_iterations,
        step: cli.step_size,
        dialect: cli.output.into(),
        convergence: cli.convergence.clone(),
        ..ScheduleRequest::new(min_resolution, max_size)
    })
}
