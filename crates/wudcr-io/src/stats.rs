//! The `Stats` record and its append-mode CSV writer.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wudcr_core::graph::EmbedOrder;

use crate::error::IoError;

/// The embedding algorithm a run was configured for. Only `DynamicProgram`
/// has a body in this workspace; the others are named so a real
/// deployment's configuration format round-trips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    KlemzNollenburgPrutkin,
    Cleve,
    DynamicProgram,
    Benchmark,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Algorithm::KlemzNollenburgPrutkin => "KlemzNollenburgPrutkin",
            Algorithm::Cleve => "Cleve",
            Algorithm::DynamicProgram => "DynamicProgram",
            Algorithm::Benchmark => "Benchmark",
        };
        f.write_str(s)
    }
}

fn embed_order_str(order: EmbedOrder) -> &'static str {
    match order {
        EmbedOrder::DepthFirst => "DepthFirst",
        EmbedOrder::BreadthFirst => "BreadthFirst",
    }
}

/// Per-invocation run statistics.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Stats {
    pub algorithm: Algorithm,
    pub embed_order: EmbedOrder,
    pub size: usize,
    pub spines: usize,
    pub success: bool,
    pub duration_microseconds: u64,
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Append one row to a CSV file at `path`, writing the header first if
/// the file doesn't already exist.
pub fn write_stats_csv<P: AsRef<Path>>(path: P, stats: &Stats) -> Result<(), IoError> {
    let path = path.as_ref();
    let exists = path.exists();

    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| IoError::Io {
            path: display(path),
            source,
        })?;

    if !exists {
        writeln!(f, "Algorithm,EmbedOrder,Size,Spines,Success,Duration(usec)").map_err(|source| {
            IoError::Io {
                path: display(path),
                source,
            }
        })?;
    }

    writeln!(
        f,
        "{},{},{},{},{},{}",
        stats.algorithm,
        embed_order_str(stats.embed_order),
        stats.size,
        stats.spines,
        stats.success,
        stats.duration_microseconds
    )
    .map_err(|source| IoError::Io {
        path: display(path),
        source,
    })
}
