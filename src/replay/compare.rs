//! Structural comparison of recorded and replayed transcripts.

use crate::error::Error;
use crate::transcript::LogEntry;

/// The first position at which two transcripts disagree. A missing
/// side means that transcript ended before the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    pub index: usize,
    pub recorded: Option<LogEntry>,
    pub replayed: Option<LogEntry>,
}

/// Compare entry by entry, returning the first divergence if any.
/// Transcripts are equal iff they have the same length and every
/// position compares equal by value.
pub fn first_divergence(recorded: &[LogEntry], replayed: &[LogEntry]) -> Option<Divergence> {
    let shared = recorded.len().min(replayed.len());
    for index in 0..shared {
        if recorded[index] != replayed[index] {
            return Some(Divergence {
                index,
                recorded: Some(recorded[index].clone()),
                replayed: Some(replayed[index].clone()),
            });
        }
    }
    if recorded.len() != replayed.len() {
        return Some(Divergence {
            index: shared,
            recorded: recorded.get(shared).cloned(),
            replayed: replayed.get(shared).cloned(),
        });
    }
    None
}

/// Equality assertion at the end of a record/replay cycle; a
/// divergence is fatal.
pub fn ensure_match(recorded: &[LogEntry], replayed: &[LogEntry]) -> Result<(), Error> {
    match first_divergence(recorded, replayed) {
        None => Ok(()),
        Some(divergence) => Err(Error::ReplayDivergence {
            index: divergence.index,
            recorded: divergence.recorded,
            replayed: divergence.replayed,
        }),
    }
}
