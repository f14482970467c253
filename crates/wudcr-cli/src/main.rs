// crates/wudcr-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wudcr_core::graph::{Caterpillar, DiskGraph, EmbedOrder};
use wudcr_io::{Algorithm, Stats};

#[derive(Parser, Debug)]
#[command(
    name = "wudcr",
    about = "Weak unit-disk contact representation embedder",
    long_about = "Decide whether a caterpillar or lobster graph admits a weak unit-disk contact representation on the triangular lattice, and construct one when it does.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Read a graph, run the dynamic program, and write the embedding (or failure) back out.
    Embed {
        /// Input path (edge list or degree list, per --input-format)
        #[arg(long)]
        input: PathBuf,

        /// Input format
        #[arg(long, value_enum, default_value_t = InputFormatOpt::EdgeList)]
        input_format: InputFormatOpt,

        /// Output path
        #[arg(long)]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormatOpt::Dump)]
        output_format: OutputFormatOpt,

        /// Optional path to append one CSV statistics row to
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Traversal order recorded in statistics. The dynamic program
        /// always searches depth-first internally; this flag does not
        /// change its behavior.
        #[arg(long, value_enum, default_value_t = EmbedOrderOpt::DepthFirst)]
        embed_order: EmbedOrderOpt,
    },

    /// Classify an edge list as a path, caterpillar, or lobster without embedding it.
    Classify {
        /// Input path (edge list or degree list, per --input-format)
        #[arg(long)]
        input: PathBuf,

        /// Input format
        #[arg(long, value_enum, default_value_t = InputFormatOpt::EdgeList)]
        input_format: InputFormatOpt,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum InputFormatOpt {
    EdgeList,
    Degrees,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum OutputFormatOpt {
    Dump,
    Json,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum EmbedOrderOpt {
    DepthFirst,
    BreadthFirst,
}

impl From<EmbedOrderOpt> for EmbedOrder {
    fn from(opt: EmbedOrderOpt) -> Self {
        match opt {
            EmbedOrderOpt::DepthFirst => EmbedOrder::DepthFirst,
            EmbedOrderOpt::BreadthFirst => EmbedOrder::BreadthFirst,
        }
    }
}

/// Invalid CLI configuration, caught before any I/O happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigError {
    /// `--output` names the same file `--input` is read from.
    OutputEqualsInput,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutputEqualsInput => {
                write!(f, "--output must not be the same path as --input")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate an `embed` invocation before touching the filesystem.
/// `--input-format degrees` against a suspicious edge-list-looking
/// extension is only logged as a warning; reusing the input path as the
/// output path is a hard error.
fn validate_embed_config(
    input: &Path,
    output: &Path,
    input_format: InputFormatOpt,
) -> Result<(), ConfigError> {
    if input == output {
        return Err(ConfigError::OutputEqualsInput);
    }

    if input_format == InputFormatOpt::Degrees {
        if let Some(ext) = input.extension().and_then(|e| e.to_str()) {
            let ext = ext.to_ascii_lowercase();
            if ext == "edgelist" || ext == "edges" {
                warn!(
                    extension = %ext,
                    "--input-format degrees used with an edge-list-looking extension"
                );
            }
        }
    }

    Ok(())
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Cmd::Embed {
            input,
            input_format,
            output,
            output_format,
            stats,
            embed_order,
        } => embed(input, input_format, output, output_format, stats, embed_order),

        Cmd::Classify {
            input,
            input_format,
        } => classify_cmd(input, input_format),
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Read `input` per `format` and produce an (unembedded) `DiskGraph`.
///
/// The degree-list format only ever describes a caterpillar, so it
/// bypasses the classifier and goes straight to
/// `DiskGraph::from_caterpillar`.
fn read_graph(input: &Path, format: InputFormatOpt) -> Result<DiskGraph> {
    match format {
        InputFormatOpt::EdgeList => {
            let edges = wudcr_io::read_edges_text(input)
                .with_context(|| format!("reading edge list from {}", input.display()))?;
            let (graph, class) = wudcr_core::classify(edges)
                .with_context(|| format!("classifying graph read from {}", input.display()))?;
            info!(?class, size = graph.size(), "classified input graph");
            Ok(graph)
        }
        InputFormatOpt::Degrees => {
            let leaves = wudcr_io::read_degrees_text(input)
                .with_context(|| format!("reading degree list from {}", input.display()))?;
            let mut caterpillar = Caterpillar::new();
            for l in leaves {
                caterpillar.extend(l);
            }
            let graph = DiskGraph::from_caterpillar(&caterpillar);
            info!(size = graph.size(), "built caterpillar from degree list");
            Ok(graph)
        }
    }
}

fn embed(
    input: PathBuf,
    input_format: InputFormatOpt,
    output: PathBuf,
    output_format: OutputFormatOpt,
    stats_path: Option<PathBuf>,
    embed_order: EmbedOrderOpt,
) -> Result<()> {
    validate_embed_config(&input, &output, input_format)
        .context("invalid configuration")?;

    let mut graph = read_graph(&input, input_format)?;

    info!(input = %input.display(), "running dynamic program");
    let start = Instant::now();
    let order = EmbedOrder::from(embed_order);
    let success = wudcr_core::embed_dynamic(&mut graph, order, true)
        .context("dynamic program rejected the input graph")?;
    let duration = start.elapsed();

    ensure_parent_dir(&output)?;
    match output_format {
        OutputFormatOpt::Dump => wudcr_io::write_dump_text(&output, &graph)
            .with_context(|| format!("writing dump to {}", output.display()))?,
        OutputFormatOpt::Json => wudcr_io::write_graph_json(&output, &graph)
            .with_context(|| format!("writing JSON snapshot to {}", output.display()))?,
    }

    if let Some(stats_path) = stats_path {
        let stats = Stats {
            algorithm: Algorithm::DynamicProgram,
            embed_order: order,
            size: graph.size(),
            spines: graph.length(),
            success,
            duration_microseconds: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        };
        ensure_parent_dir(&stats_path)?;
        wudcr_io::write_stats_csv(&stats_path, &stats)
            .with_context(|| format!("writing statistics to {}", stats_path.display()))?;
    }

    if success {
        println!(
            "Embedded {} disks ({} spine) → {}",
            graph.size(),
            graph.length(),
            output.display()
        );
    } else {
        // No embedding exists: a normal outcome, not an error. Every
        // disk is marked failed in the output rather than aborting.
        println!(
            "No embedding exists for the {}-disk graph read from {} (every disk marked failed in {})",
            graph.size(),
            input.display(),
            output.display()
        );
    }

    Ok(())
}

fn classify_cmd(input: PathBuf, input_format: InputFormatOpt) -> Result<()> {
    match input_format {
        InputFormatOpt::EdgeList => {
            let edges = wudcr_io::read_edges_text(&input)
                .with_context(|| format!("reading edge list from {}", input.display()))?;
            let (graph, class) = wudcr_core::classify(edges)
                .with_context(|| format!("classifying graph read from {}", input.display()))?;
            println!(
                "{:?}: {} disks, {} spine",
                class,
                graph.size(),
                graph.length()
            );
        }
        InputFormatOpt::Degrees => {
            let leaves = wudcr_io::read_degrees_text(&input)
                .with_context(|| format!("reading degree list from {}", input.display()))?;
            let mut caterpillar = Caterpillar::new();
            for l in leaves {
                caterpillar.extend(l);
            }
            let graph = DiskGraph::from_caterpillar(&caterpillar);
            println!("Caterpillar: {} disks, {} spine", graph.size(), graph.length());
        }
    }
    Ok(())
}
