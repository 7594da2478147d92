//! Call interception and transcript production

pub mod logger;
pub mod proxy;
pub mod runner;
pub mod writer;

pub use logger::{BoundMethod, CallLogger};
pub use proxy::ProxyTree;
pub use runner::{record, Script};
pub use writer::TranscriptWriter;
