#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use resflow::{
    check_cut, check_flow, Capacity, CapacityEdge, DenseNetwork, MaxFlow, SimpleEdge,
    SimpleEdgeFlow, SparseNetwork,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Network {
    /// Capacity matrix, O(V^2) memory
    Dense,
    /// Adjacency list with paired residual arcs
    Sparse,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CapacityKind {
    Int,
    Float,
}

/// Computes the maximum flow of a capacitated directed graph
#[derive(Parser, Debug)]
#[command(name = "resflow-cli", version, about)]
struct Cli {
    /// CSV edge list with a `from,to,capacity` header; solves the built-in 6-node example if absent
    #[arg(short, long)]
    input_file: Option<PathBuf>,

    /// Where to write the `from,to,capacity,flow` CSV, stdout if absent
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Number of nodes, defaults to one past the largest node id in the input
    #[arg(short, long)]
    nodes: Option<usize>,

    #[arg(short, long, default_value_t = 0)]
    source: usize,

    #[arg(short = 't', long, default_value_t = 5)]
    sink: usize,

    #[arg(long, value_enum, default_value_t = Network::Dense)]
    network: Network,

    #[arg(long, value_enum, default_value_t = CapacityKind::Int)]
    capacity: CapacityKind,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

const EXAMPLE: [[i64; 6]; 6] = [
    [0, 16, 13, 0, 0, 0],
    [0, 0, 10, 12, 0, 0],
    [0, 4, 0, 0, 14, 0],
    [0, 0, 9, 0, 0, 20],
    [0, 0, 0, 7, 0, 4],
    [0, 0, 0, 0, 0, 0],
];

// Function to read the edge list from a CSV file
fn read_edges_csv<C>(filepath: &Path) -> Result<Vec<SimpleEdge<C>>, Box<dyn Error>>
where
    C: Capacity + DeserializeOwned,
{
    let file = File::open(filepath)?;
    let mut rdr = csv::Reader::from_reader(file);
    let edges = rdr.deserialize().collect::<Result<Vec<_>, _>>()?;
    Ok(edges)
}

fn example_edges<C>(convert: impl Fn(i64) -> C) -> Vec<SimpleEdge<C>>
where
    C: Capacity,
{
    EXAMPLE
        .iter()
        .enumerate()
        .flat_map(|(from, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c > 0)
                .map(move |(to, c)| (from, to, *c))
        })
        .filter_map(|(from, to, c)| SimpleEdge::new(from, to, convert(c)).ok())
        .collect()
}

// Function to write the per-edge flows
fn write_csv<C: Serialize>(
    flows: &[SimpleEdgeFlow<C>],
    filepath: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let out: Box<dyn Write> = match filepath {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut wtr = csv::Writer::from_writer(out);
    for flow in flows {
        wtr.serialize(flow)?;
    }
    wtr.flush()?;
    Ok(())
}

fn solve<N>(mut network: N, cli: &Cli) -> Result<(), Box<dyn Error>>
where
    N: MaxFlow,
    N::Capacity: Capacity + Serialize,
    N::Error: Error + 'static,
{
    let value = network.max_flow(cli.source, cli.sink)?;
    let cut = network.min_cut(cli.source)?;
    let flows = network.edge_flows();

    log::info!("----------------------------------");
    log::info!("          Nodes = {}", network.node_count());
    log::info!("  Augmentations = {}", network.augmenting_paths().len());
    log::info!("       Max flow = {value}");
    log::info!("   Min cut side = {:?}", cut.source_side());
    log::info!("  Min cut edges = {:?}", cut.edges());
    for path in network.augmenting_paths() {
        log::debug!("{:?} += {}", path.vertices(), path.bottleneck());
    }

    check_flow(&flows, network.node_count(), cli.source, cli.sink, value)?;
    check_cut(&cut, value)?;

    write_csv(&flows, cli.output_file.as_deref())
}

fn run<C>(cli: &Cli, convert: impl Fn(i64) -> C) -> Result<(), Box<dyn Error>>
where
    C: Capacity + Serialize + DeserializeOwned,
{
    let edges = match &cli.input_file {
        Some(path) => read_edges_csv::<C>(path)?,
        None => example_edges(convert),
    };
    let node_count = cli.nodes.unwrap_or_else(|| {
        edges
            .iter()
            .map(|e| e.from().max(e.to()) + 1)
            .max()
            .unwrap_or(0)
    });
    log::debug!("read {} edges over {node_count} nodes", edges.len());

    match cli.network {
        Network::Dense => solve(DenseNetwork::from_edges(node_count, edges)?, cli),
        Network::Sparse => solve(SparseNetwork::from_edges(node_count, edges)?, cli),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    TermLogger::init(
        cli.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    match cli.capacity {
        CapacityKind::Int => run::<i64>(&cli, |c| c),
        #[allow(clippy::cast_precision_loss)]
        CapacityKind::Float => run::<f64>(&cli, |c| c as f64),
    }
}
