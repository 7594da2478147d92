use crate::error::Error;
use crate::target::CallTarget;
use crate::transcript::{Kwargs, LogEntry, MethodPath, Value};

/// Transport stand-in that answers every call from a recorded
/// transcript instead of performing I/O.
///
/// Whichever operation is invoked, the connection consumes the next
/// recorded Exit entry bearing its own key and returns that entry's
/// result. The recording is fixed for the session; the only mutable
/// state is the consumption cursor.
pub struct ReplayConnection {
    recorded: Vec<LogEntry>,
    key: String,
    cursor: usize,
    served: usize,
}

impl ReplayConnection {
    /// Replay the transport-level ("conn") responses of `recorded`.
    pub fn new(recorded: Vec<LogEntry>) -> Self {
        Self::with_key(recorded, "conn")
    }

    pub fn with_key(recorded: Vec<LogEntry>, key: &str) -> Self {
        ReplayConnection {
            recorded,
            key: key.to_string(),
            cursor: 0,
            served: 0,
        }
    }

    /// Number of recorded responses handed out so far.
    pub fn served(&self) -> usize {
        self.served
    }
}

impl CallTarget for ReplayConnection {
    fn call(
        &mut self,
        method: &MethodPath,
        _args: &[Value],
        _kwargs: &Kwargs,
    ) -> Result<Value, Error> {
        while self.cursor < self.recorded.len() {
            let entry = &self.recorded[self.cursor];
            self.cursor += 1;
            if let LogEntry::Exit { key, result, .. } = entry {
                if *key == self.key {
                    self.served += 1;
                    return Ok(result.clone());
                }
            }
        }
        Err(Error::TranscriptExhausted {
            name: method.dotted(),
            call: self.served + 1,
        })
    }

    // The dummy does not distinguish operations; any method resolves.
    fn has_method(&self, _method: &MethodPath) -> bool {
        true
    }
}
