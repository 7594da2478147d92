use crate::error::Error;
use crate::transcript::{Kwargs, LogEntry, Transcript, Value};

/// An already-bound method: same calling convention before and after
/// wrapping.
pub type BoundMethod = Box<dyn FnMut(&[Value], &Kwargs) -> Result<Value, Error>>;

/// Records an Enter/Exit pair around every invocation of a wrapped
/// method, without altering its behavior or return value.
pub struct CallLogger {
    log: Transcript,
}

impl CallLogger {
    pub fn new(log: Transcript) -> Self {
        CallLogger { log }
    }

    pub fn log(&self) -> &Transcript {
        &self.log
    }

    /// Wrap `method` so each invocation appends Enter before and Exit
    /// after execution. A failing call propagates its error unchanged
    /// and appends no Exit entry.
    pub fn wrap_method(&self, key: &str, name: &str, mut method: BoundMethod) -> BoundMethod {
        let log = self.log.clone();
        let key = key.to_string();
        let name = name.to_string();
        Box::new(move |args, kwargs| {
            log.append(LogEntry::Enter {
                key: key.clone(),
                name: name.clone(),
                args: args.to_vec(),
                kwargs: kwargs.clone(),
            });
            let result = method(args, kwargs)?;
            log.append(LogEntry::Exit {
                key: key.clone(),
                name: name.clone(),
                result: result.clone(),
            });
            Ok(result)
        })
    }
}
