use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use graph_spanner::{build_spanner, data, output, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "graph-spanner",
    about = "Randomized (2k-1)-spanner construction for weighted undirected graphs"
)]
struct Cli {
    /// Stretch parameter k; pairwise distances are preserved within 2k - 1
    #[clap(default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    k: u32,

    /// Read the graph from a file instead of stdin
    #[clap(long)]
    input: Option<PathBuf>,

    /// Write the spanner to a file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,

    /// Save run diagnostics as JSON
    #[clap(long)]
    stats: Option<PathBuf>,

    /// Seed for the center sampler (reproducible runs)
    #[clap(long)]
    seed: Option<u64>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Starting spanner construction (k = {})", args.k);

    // 1. Load the graph
    let graph = match &args.input {
        Some(path) => {
            log::info!("Reading graph from {}", path.display());
            data::text::read_graph(BufReader::new(File::open(path)?))?
        }
        None => {
            log::info!("Reading graph from stdin");
            let stdin = io::stdin();
            data::text::read_graph(stdin.lock())?
        }
    };

    // 2. Build the spanner
    let config = Config::new(args.k, args.seed);
    let spanner = build_spanner(graph, &config)?;

    // 3. Write the result
    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            output::write_spanner(&mut out, &spanner)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            output::write_spanner(&mut out, &spanner)?;
            out.flush()?;
        }
    }

    // 4. Save diagnostics if requested
    if let Some(path) = &args.stats {
        output::save_stats(&spanner, path)?;
    }

    log::info!(
        "Spanner complete: {} edges ({} from phase 1, {} from phase 2)",
        spanner.edge_count(),
        spanner.stats.phase1_edges,
        spanner.stats.phase2_edges
    );

    Ok(())
}
