//! Graphlens CLI — decorate graph snapshots from the command line
//!
//! Loads a `{ nodes, links }` snapshot from a file or an HTTP endpoint, runs
//! the decoration pipeline with a config file and prints the result.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use graphlens::config::{load_config, load_precomputed_config};
use graphlens::{
    augment_with_file_clusters, decorate, decorate_precomputed, force_layout, link_force,
    DecoratedGraph, DecoratedNode, FileSource, GraphData, GraphSnapshot, GraphSource,
    RemoteSource,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "graphlens", version, about = "Graph decoration for 3D graph viewers")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Snapshot JSON file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Graph endpoint URL
    #[arg(long, env = "GRAPHLENS_URL")]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score, map and optionally cluster a snapshot
    Decorate {
        #[command(flatten)]
        source: SourceArgs,

        /// Decoration config (.yaml, .yml or .json)
        #[arg(long)]
        config: PathBuf,

        /// Retry failed HTTP fetches this many times
        #[arg(long, default_value_t = 0)]
        retries: u32,

        /// Attach force-layout parameters (requires --format json)
        #[arg(long)]
        layout: bool,

        /// Rows to show in table/csv output
        #[arg(long, default_value_t = 25)]
        top: usize,
    },
    /// Map server-computed coreScore values with the config's mapping
    Precomputed {
        #[command(flatten)]
        source: SourceArgs,

        /// Config with `mapping` and `cluster`; a `scoring` block is optional and unused
        #[arg(long)]
        config: PathBuf,

        #[arg(long, default_value_t = 0)]
        retries: u32,

        #[arg(long, default_value_t = 25)]
        top: usize,
    },
    /// Add file cluster nodes without scoring and print the snapshot as JSON
    Cluster {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
    /// Show spring parameters for edge types
    Layout {
        /// Edge types to look up
        #[arg(required = true)]
        types: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decorate { source, config, retries, layout, top } => {
            run_decorate(&source, &config, retries, layout, top, &cli.format).await
        }
        Commands::Precomputed { source, config, retries, top } => {
            run_precomputed(&source, &config, retries, top, &cli.format).await
        }
        Commands::Cluster { source, retries } => run_cluster(&source, retries).await,
        Commands::Layout { types } => run_layout(&types, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn load_graph(args: &SourceArgs, retries: u32) -> anyhow::Result<GraphData> {
    let source: Box<dyn GraphSource> = match (&args.input, &args.url) {
        (Some(path), _) => Box::new(FileSource::new(path)),
        (None, Some(url)) => Box::new(RemoteSource::new(url).with_retries(retries)),
        (None, None) => bail!("either --input or --url is required"),
    };

    let mut snapshot = GraphSnapshot::new();
    let graph = snapshot
        .refresh(source.as_ref())
        .await
        .with_context(|| format!("loading graph from {}", source.describe()))?;
    Ok((*graph).clone())
}

/// Layout parameters only exist in the JSON rendering
fn check_layout_format(layout: bool, format: &OutputFormat) -> anyhow::Result<()> {
    if layout && *format != OutputFormat::Json {
        bail!("--layout requires --format json");
    }
    Ok(())
}

async fn run_decorate(
    source: &SourceArgs,
    config_path: &Path,
    retries: u32,
    layout: bool,
    top: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    check_layout_format(layout, format)?;
    let config = load_config(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let graph = load_graph(source, retries).await?;

    let mut decorated = decorate(&graph, &config)?;
    if layout {
        decorated.layout = Some(force_layout(&decorated));
    }

    print_decorated(&decorated, top, format)
}

async fn run_precomputed(
    source: &SourceArgs,
    config_path: &Path,
    retries: u32,
    top: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let config = load_precomputed_config(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let graph = load_graph(source, retries).await?;

    let decorated = decorate_precomputed(&graph, &config)?;
    print_decorated(&decorated, top, format)
}

async fn run_cluster(source: &SourceArgs, retries: u32) -> anyhow::Result<()> {
    let graph = load_graph(source, retries).await?;
    let augmented = augment_with_file_clusters(&graph);
    println!("{}", serde_json::to_string_pretty(&augmented)?);
    Ok(())
}

fn run_layout(types: &[String], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let forces: Vec<serde_json::Value> = types
                .iter()
                .map(|t| {
                    let force = link_force(t);
                    serde_json::json!({"type": t, "distance": force.distance, "strength": force.strength})
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&forces)?);
        }
        OutputFormat::Csv => {
            println!("type,distance,strength");
            for t in types {
                let force = link_force(t);
                println!("{},{},{}", format_csv_value(t), force.distance, force.strength);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["type", "distance", "strength"]);
            for t in types {
                let force = link_force(t);
                table.add_row(vec![t.clone(), force.distance.to_string(), force.strength.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

const COLUMNS: [&str; 7] = ["id", "label", "score", "size", "labelSize", "signals", "path"];

/// Nodes ordered by descending score, ties by id
fn ranked(decorated: &DecoratedGraph) -> Vec<&DecoratedNode> {
    let mut nodes: Vec<&DecoratedNode> = decorated.nodes.iter().collect();
    nodes.sort_by(|a, b| {
        b.score
            .unwrap_or(0.0)
            .total_cmp(&a.score.unwrap_or(0.0))
            .then_with(|| a.id().cmp(b.id()))
    });
    nodes
}

fn format_signals(node: &DecoratedNode) -> String {
    let mut parts = Vec::new();
    if let Some(pr) = node.pagerank {
        parts.push(format!("pr={:.4}", pr));
    }
    if let Some(ppr) = node.personalized_pagerank {
        parts.push(format!("ppr={:.4}", ppr));
    }
    if let Some(deg) = node.degree {
        parts.push(format!("deg={}", deg));
    }
    if let Some(core) = node.kcore {
        parts.push(format!("kcore={}", core));
    }
    match node.distance {
        Some(Some(d)) => parts.push(format!("dist={}", d)),
        Some(None) => parts.push("dist=inf".to_string()),
        None => {}
    }
    parts.join(" ")
}

fn row(node: &DecoratedNode) -> Vec<String> {
    let fmt = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_default();
    vec![
        node.id().to_string(),
        node.node.label.clone(),
        fmt(node.score),
        fmt(node.size),
        fmt(node.label_size),
        format_signals(node),
        node.node.path.clone().unwrap_or_default(),
    ]
}

fn print_decorated(decorated: &DecoratedGraph, top: usize, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(decorated)?);
        }
        OutputFormat::Csv => {
            println!("{}", COLUMNS.join(","));
            for node in ranked(decorated).into_iter().take(top) {
                let cells: Vec<String> = row(node).iter().map(|c| format_csv_value(c)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if decorated.nodes.is_empty() {
                println!("(no nodes)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(COLUMNS.to_vec());

            for node in ranked(decorated).into_iter().take(top) {
                table.add_row(row(node));
            }

            println!("{}", table);
            println!(
                "{} node(s), {} link(s), showing top {}",
                decorated.nodes.len(),
                decorated.links.len(),
                top.min(decorated.nodes.len())
            );
        }
    }

    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_requires_json() {
        assert!(check_layout_format(true, &OutputFormat::Json).is_ok());
        assert!(check_layout_format(true, &OutputFormat::Table).is_err());
        assert!(check_layout_format(true, &OutputFormat::Csv).is_err());
        assert!(check_layout_format(false, &OutputFormat::Csv).is_ok());
    }

    #[test]
    fn test_layout_flag_parses_with_format() {
        let cli = Cli::try_parse_from([
            "graphlens", "--format", "json", "decorate", "--input", "g.json", "--config",
            "c.yaml", "--layout",
        ])
        .unwrap();
        match cli.command {
            Commands::Decorate { layout, .. } => assert!(layout),
            _ => panic!("expected decorate"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
