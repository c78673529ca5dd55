use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use opticif_config::Config;
use opticif_engine::{
    ReorderOptions, ScanMode, convert, pipeline, reorder_document, validate::validate_name_table,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "opticif")]
#[command(about = "Reorder plant declarations in CIF specifications to follow a sequence")]
#[command(version)]
struct Cli {
    #[arg(long, short, global = true, help = "Show debug output")]
    verbose: bool,
    #[arg(long, global = true, value_name = "PATH", help = "Config file to use instead of the default location")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Reorder declarations of a CIF document to follow a name table")]
    Reorder {
        #[arg(help = "Table with a 'name' column (and optional 'labels'/'kind' column)")]
        names: PathBuf,
        #[arg(help = "CIF document to reorder")]
        document: PathBuf,
        #[arg(long, short, value_name = "DIR", help = "Output directory [default: generated]")]
        output_dir: Option<PathBuf>,
        #[arg(long, short, value_name = "CHAR", help = "Field delimiter [default: ;]")]
        delimiter: Option<char>,
        #[arg(long, short, value_name = "MODE", help = "automaton or instantiation [default: automaton]")]
        mode: Option<String>,
        #[arg(long, help = "Reject tables where a label appears in more than one run")]
        strict_groups: bool,
    },
    #[command(about = "Check the structure of a name table")]
    Validate {
        #[arg(help = "Table with a 'name' column")]
        names: PathBuf,
        #[arg(long, short, value_name = "CHAR", help = "Field delimiter [default: ;]")]
        delimiter: Option<char>,
    },
    #[command(about = "Convert a binary DSM into an edge list")]
    Edges {
        #[arg(help = "Headerless square binary matrix")]
        matrix: PathBuf,
        #[arg(help = "Table naming the matrix rows/columns in order")]
        nodes: PathBuf,
        #[arg(help = "Stem of the output file (<stem>.edges.csv)")]
        stem: String,
        #[arg(long, short, value_name = "DIR", help = "Output directory [default: generated]")]
        output_dir: Option<PathBuf>,
        #[arg(long, short, value_name = "CHAR", help = "Field delimiter [default: ;]")]
        delimiter: Option<char>,
    },
}

/// Command-line values layered over the config file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    output_dir: PathBuf,
    delimiter: char,
    mode: ScanMode,
    strict_groups: bool,
}

impl Settings {
    fn resolve(
        config: &Config,
        output_dir: Option<PathBuf>,
        delimiter: Option<char>,
        mode: Option<String>,
        strict_groups: bool,
    ) -> Result<Self> {
        let mode = match mode.or_else(|| config.mode.clone()) {
            Some(mode) => mode.parse::<ScanMode>()?,
            None => ScanMode::default(),
        };

        Ok(Self {
            output_dir: output_dir
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(pipeline::DEFAULT_OUTPUT_DIR)),
            delimiter: delimiter
                .or(config.delimiter)
                .unwrap_or(pipeline::DEFAULT_DELIMITER),
            mode,
            strict_groups: strict_groups || config.strict_groups.unwrap_or(false),
        })
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) if !path.exists() => {
            bail!("Config file '{}' does not exist", path.display())
        }
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    let config = loaded.context("Failed to load config file")?;
    if config.is_some() {
        log::debug!("Loaded config: {config:?}");
    }
    Ok(config.unwrap_or_default())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Reorder {
            names,
            document,
            output_dir,
            delimiter,
            mode,
            strict_groups,
        } => {
            let settings = Settings::resolve(&config, output_dir, delimiter, mode, strict_groups)?;
            let options = ReorderOptions::new(&names, &document)
                .with_output_dir(settings.output_dir)
                .with_delimiter(settings.delimiter)
                .with_mode(settings.mode)
                .with_strict_groups(settings.strict_groups);

            let written = reorder_document(&options)
                .with_context(|| format!("Failed to reorder '{}'", document.display()))?;
            println!("Reordered document written to {}", written.display());
        }
        Commands::Validate { names, delimiter } => {
            let delimiter = delimiter
                .or(config.delimiter)
                .unwrap_or(pipeline::DEFAULT_DELIMITER);
            let shape = validate_name_table(&names, delimiter)
                .with_context(|| format!("'{}' is not a valid name table", names.display()))?;
            println!(
                "{}: {} names{}",
                names.display(),
                shape.rows,
                if shape.has_labels { ", labelled" } else { "" }
            );
        }
        Commands::Edges {
            matrix,
            nodes,
            stem,
            output_dir,
            delimiter,
        } => {
            let output_dir = output_dir
                .or(config.output_dir)
                .unwrap_or_else(|| PathBuf::from(pipeline::DEFAULT_OUTPUT_DIR));
            let delimiter = delimiter
                .or(config.delimiter)
                .unwrap_or(pipeline::DEFAULT_DELIMITER);
            let written =
                convert::matrix_to_edge_list(&matrix, &nodes, &stem, &output_dir, delimiter)
                    .with_context(|| format!("Failed to convert '{}'", matrix.display()))?;
            println!("Edge list written to {}", written.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins over the default level
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
