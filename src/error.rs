use thiserror::Error;

use crate::transcript::LogEntry;

#[derive(Debug, Error)]
pub enum Error {
    /// A configured method name does not exist on the wrapped target.
    /// Raised at wrap time, before any proxy is handed out.
    #[error("no method {name:?} on {target} target")]
    UnknownMethod { target: String, name: String },

    #[error("invalid method path {0:?}")]
    InvalidPath(String),

    #[error("bad arguments for {method}: {detail}")]
    BadArguments { method: String, detail: String },

    /// The script asked for more responses than the recording holds.
    #[error("transcript exhausted: no recorded response left for {name} (response #{call})")]
    TranscriptExhausted { name: String, call: usize },

    #[error("malformed reply {reply:?} to {command:?}")]
    Protocol { command: String, reply: String },

    #[error("transcripts diverge at entry {index}: recorded {recorded:?}, replayed {replayed:?}")]
    ReplayDivergence {
        index: usize,
        recorded: Option<LogEntry>,
        replayed: Option<LogEntry>,
    },

    #[error("invalid transcript file: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("transcript codec: {0}")]
    Codec(#[from] bincode::Error),
}
