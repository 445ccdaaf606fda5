use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use xrchart::config::ChartDefaults;
use xrchart::data::loader::DataLoader;
use xrchart::error::XrChartError;
use xrchart::writer::OutputFormat;
use xrchart::writer::html::scene_to_html;
use xrchart::{ChartSpecification, SceneCompiler};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a specification and write it as an A-Frame page or as JSON
    Render {
        /// Path to the JSON specification
        spec: PathBuf,

        /// Output file. Written to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (html or json). Defaults to the output extension, else html
        #[arg(short, long)]
        format: Option<String>,

        /// JSON file overriding the chart defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Parse and validate a specification without loading its data
    Validate {
        /// Path to the JSON specification
        spec: PathBuf,
    },
    /// Print the compiled scene graph as JSON
    Scene {
        /// Path to the JSON specification
        spec: PathBuf,

        /// JSON file overriding the chart defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            spec,
            output,
            format,
            config,
        } => render(&spec, output.as_deref(), format.as_deref(), config.as_deref()),
        Commands::Validate { spec } => validate(&spec),
        Commands::Scene { spec, config } => print_scene(&spec, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:?} error: {}", err.kind(), err);
            ExitCode::FAILURE
        }
    }
}

fn read_spec(path: &Path) -> Result<ChartSpecification, XrChartError> {
    if path.is_dir() {
        return Err(XrChartError::ValidationError(format!(
            "Input path is a directory: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    ChartSpecification::from_json(&content)
}

/// Relative data sources resolve against the directory holding the specification
fn make_compiler(spec_path: &Path, config: Option<&Path>) -> Result<SceneCompiler, XrChartError> {
    let defaults = match config {
        Some(config) => ChartDefaults::from_json_file(config)?,
        None => ChartDefaults::default(),
    };
    let base_dir = spec_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(SceneCompiler::new(defaults, DataLoader::new().with_base_dir(base_dir)))
}

fn render(
    spec_path: &Path,
    output: Option<&Path>,
    format: Option<&str>,
    config: Option<&Path>,
) -> Result<(), XrChartError> {
    let spec = read_spec(spec_path)?;
    let format = match (format, output) {
        (Some(format), _) => format.parse::<OutputFormat>()?,
        (None, Some(output)) => OutputFormat::from_path(output)?,
        (None, None) => OutputFormat::Html,
    };

    let contents = match format {
        OutputFormat::Html => {
            let compiled = make_compiler(spec_path, config)?.compile(&spec)?;
            log_warnings(&compiled.warnings);
            scene_to_html(&compiled.scene)?
        }
        OutputFormat::Json => spec.to_json()?,
    };

    match output {
        Some(output) => {
            fs::write(output, contents)?;
            info!("Wrote {}", output.display());
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn validate(spec_path: &Path) -> Result<(), XrChartError> {
    let spec = read_spec(spec_path)?;
    spec.validate()?;
    println!("{}: ok ({} leaves)", spec_path.display(), spec.leaves().len());
    Ok(())
}

fn print_scene(spec_path: &Path, config: Option<&Path>) -> Result<(), XrChartError> {
    let spec = read_spec(spec_path)?;
    let compiled = make_compiler(spec_path, config)?.compile(&spec)?;
    log_warnings(&compiled.warnings);
    println!("{}", serde_json::to_string_pretty(&compiled.scene)?);
    Ok(())
}

fn log_warnings(warnings: &[String]) {
    for warning in warnings {
        warn!("{warning}");
    }
}
