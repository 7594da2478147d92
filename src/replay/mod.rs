//! Transcript-driven replay and verification

pub mod compare;
pub mod connection;
pub mod reader;

pub use compare::{ensure_match, first_divergence, Divergence};
pub use connection::ReplayConnection;
pub use reader::TranscriptReader;
