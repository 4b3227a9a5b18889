use clap::{Parser, Subcommand, ValueEnum};
use cli::{ConversionJob, parse_dpi, parse_simplify_factor};
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};
use vectorize::{ConversionReport, Preset};

#[derive(Parser)]
#[command(author, version, about = "Convert black-and-white bitmaps into DXF polylines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a bitmap and write <input>.dxf beside it
    Convert {
        /// Path to the input bitmap
        #[arg(short, long)]
        input: PathBuf,
        /// Output drawing (defaults to the input path with a .dxf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Resolution of the bitmap in pixels per inch
        #[arg(long, default_value = "1000", value_parser = parse_dpi)]
        dpi: f64,
        /// Fraction of each contour's perimeter allowed as deviation (0 disables)
        #[arg(long, value_parser = parse_simplify_factor)]
        simplify: Option<f64>,
        /// Tracing policy
        #[arg(long, value_enum, default_value = "detailed")]
        preset: PresetArg,
        /// Replace the output file if it already exists
        #[arg(short, long)]
        force: bool,
    },
    /// Run a conversion described by a job file
    Process {
        /// Path to the TOML or JSON job file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Write a job file with default options for the given bitmap
    GenerateConfig {
        /// Path to the input bitmap
        #[arg(short, long)]
        input: PathBuf,
        /// Where to save the job file (.toml or .json)
        #[arg(short, long)]
        config_output: PathBuf,
        #[arg(long, value_enum, default_value = "detailed")]
        preset: PresetArg,
    },
    /// Print the JSON schema of the job file
    Schema,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    /// All boundaries including holes, simplify factor 0.001
    Detailed,
    /// Outer boundaries only, no simplification
    Outline,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Detailed => Preset::Detailed,
            PresetArg::Outline => Preset::Outline,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            dpi,
            simplify,
            preset,
            force,
        } => {
            let mut options = Preset::from(preset).options().with_dpi(dpi);
            if let Some(factor) = simplify {
                options = options.with_simplify_factor(factor);
            }
            let job = ConversionJob {
                input,
                output,
                overwrite: force,
                options,
            };
            run_job(&job)?;
        }
        Commands::Process { config } => {
            let job = ConversionJob::from_file(&config)?;
            info!("Loaded job from {:?}", config);
            run_job(&job)?;
        }
        Commands::GenerateConfig {
            input,
            config_output,
            preset,
        } => {
            generate_config(&input, &config_output, preset.into())?;
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(ConversionJob);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn run_job(job: &ConversionJob) -> Result<ConversionReport> {
    info!(
        "Converting {:?} at {} dpi, simplify factor {}, retrieval {}",
        job.input, job.options.dpi, job.options.simplify_factor, job.options.retrieval
    );

    let report = job.run()?;

    info!(
        "Traced {}x{} px bitmap: {} contours found, {} polylines written ({} points)",
        report.image_width,
        report.image_height,
        report.contours_found,
        report.polylines,
        report.points
    );
    println!("{}", report.output.display());
    Ok(report)
}

fn generate_config(input: &Path, config_output: &Path, preset: Preset) -> Result<()> {
    let job = ConversionJob::new(input, preset.options());
    job.to_file(config_output)?;

    info!("Preset '{}': {}", preset, preset.description());
    info!("Job file saved to: {:?}", config_output);
    Ok(())
}
