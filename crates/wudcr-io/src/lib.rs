//! Text parsing, JSON/CBOR serialization, and run statistics for
//! [`wudcr_core`]'s `DiskGraph`.
//!
//! This crate handles all the bytes flowing in and out of the embedder:
//! it never touches the dynamic program itself.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod dump;
mod error;
mod snapshot;
mod stats;
mod text;

pub use dump::write_dump_text;
pub use error::IoError;
pub use snapshot::{
    read_graph_auto, read_graph_cbor, read_graph_json, write_graph_auto, write_graph_cbor,
    write_graph_json,
};
pub use stats::{write_stats_csv, Algorithm, Stats};
pub use text::{read_degrees_text, read_edges_text, write_edges_text};
