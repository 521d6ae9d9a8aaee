//! Cluster a token dataset and write the merge queue and/or cluster listing.
//!
//! ```text
//! hac -i docs.txt -q merges.txt -c clusters.txt -a c -d j -n 8
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{ArgGroup, Parser, ValueEnum};
use hac::{format, Clustering, Dataset, HierarchicalClustering, Linkage, Metric};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Single linkage.
    #[value(name = "s")]
    Single,
    /// Complete linkage.
    #[value(name = "c")]
    Complete,
    /// Average linkage.
    #[value(name = "a")]
    Average,
}

impl From<Algorithm> for Linkage {
    fn from(a: Algorithm) -> Self {
        match a {
            Algorithm::Single => Linkage::Single,
            Algorithm::Complete => Linkage::Complete,
            Algorithm::Average => Linkage::Average,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Distance {
    /// Unshared dimensions.
    #[value(name = "i")]
    InnerProduct,
    /// Jaccard distance.
    #[value(name = "j")]
    Jaccard,
}

impl From<Distance> for Metric {
    fn from(d: Distance) -> Self {
        match d {
            Distance::InnerProduct => Metric::InnerProduct,
            Distance::Jaccard => Metric::Jaccard,
        }
    }
}

/// Hierarchical agglomerative clustering of token datasets.
#[derive(Parser, Debug)]
#[command(name = "hac")]
#[command(group(ArgGroup::new("output").required(true).multiple(true).args(["queue", "clusters"])))]
struct Args {
    /// Dataset: one item per line, label followed by feature tokens.
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Write the merge queue, one "survivor absorbed" pair per line.
    #[arg(short = 'q', long)]
    queue: Option<PathBuf>,

    /// Write the member list of every remaining cluster.
    #[arg(short = 'c', long)]
    clusters: Option<PathBuf>,

    /// Linkage criterion.
    #[arg(short = 'a', long, value_enum, default_value = "s")]
    algorithm: Algorithm,

    /// Distance metric.
    #[arg(short = 'd', long, value_enum, default_value = "i")]
    metric: Distance,

    /// Number of clusters to leave.
    #[arg(short = 'n', long = "clusters-count", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    n_clusters: u32,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let t = Instant::now();
    let dataset = Dataset::open(&args.input)
        .with_context(|| format!("{}: invalid dataset", args.input.display()))?;
    info!(elapsed = ?t.elapsed(), "dataset file loaded");
    info!(vectors = dataset.len(), dimensions = dataset.n_dims(), "dataset");

    let t = Instant::now();
    let distances = dataset.distance_matrix(args.metric.into())?;
    info!(elapsed = ?t.elapsed(), metric = %Metric::from(args.metric), "distances computed");

    let t = Instant::now();
    let linkage = Linkage::from(args.algorithm);
    let dendrogram = HierarchicalClustering::new(args.n_clusters as usize)
        .with_linkage(linkage)
        .fit(&distances)?;
    info!(elapsed = ?t.elapsed(), %linkage, merges = dendrogram.n_merges(), "clustering complete");

    if let Some(path) = &args.queue {
        let t = Instant::now();
        let file = File::create(path)
            .with_context(|| format!("{}: output file not created", path.display()))?;
        format::write_connections(&dendrogram, BufWriter::new(file))?;
        info!(elapsed = ?t.elapsed(), path = %path.display(), "result queue file complete");
    }

    if let Some(path) = &args.clusters {
        let t = Instant::now();
        let file = File::create(path)
            .with_context(|| format!("{}: output file not created", path.display()))?;
        format::write_clusters(&dendrogram, BufWriter::new(file))?;
        info!(elapsed = ?t.elapsed(), path = %path.display(), "result cluster file complete");
    }

    Ok(())
}
