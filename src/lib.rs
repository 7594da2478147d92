pub mod error;
pub mod minecraft;
pub mod record;
pub mod replay;
pub mod scripts;
pub mod target;
pub mod transcript;

pub use error::Error;
pub use target::{CallTarget, CallTargetExt};
pub use transcript::{Kwargs, LogEntry, MethodPath, Transcript, Value};
