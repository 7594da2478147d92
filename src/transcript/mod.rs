//! Transcript data model: call payloads, Enter/Exit entries, method
//! paths and the shared append-only log they accumulate in.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::Error;

/// Opaque call payload. The harness records and compares these without
/// inspecting their content; only the domain layer builds and parses
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
}

/// Keyword arguments. Ordered so equality and serialization are
/// deterministic.
pub type Kwargs = BTreeMap<String, Value>;

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Seq(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A dotted method name, decomposed into its segments. Selects a
/// method on a [`crate::target::CallTarget`] and positions the
/// matching leaf in a proxy tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodPath {
    segments: Vec<String>,
}

impl MethodPath {
    pub fn parse(name: &str) -> Result<Self, Error> {
        let segments: Vec<String> = name.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidPath(name.to_string()));
        }
        Ok(MethodPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment, the method name proper.
    pub fn leaf(&self) -> &str {
        // parse() rejects empty paths, so there is always a last segment
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl FromStr for MethodPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodPath::parse(s)
    }
}

impl fmt::Display for MethodPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

/// One recorded event: a call entering a wrapped method, or the method
/// returning. `key` names the wrapped root the call belongs to, `name`
/// is the dotted method path on that root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    Enter {
        key: String,
        name: String,
        args: Vec<Value>,
        kwargs: Kwargs,
    },
    Exit {
        key: String,
        name: String,
        result: Value,
    },
}

impl LogEntry {
    pub fn key(&self) -> &str {
        match self {
            LogEntry::Enter { key, .. } | LogEntry::Exit { key, .. } => key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LogEntry::Enter { name, .. } | LogEntry::Exit { name, .. } => name,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, LogEntry::Enter { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, LogEntry::Exit { .. })
    }

    pub fn result(&self) -> Option<&Value> {
        match self {
            LogEntry::Enter { .. } => None,
            LogEntry::Exit { result, .. } => Some(result),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Enter {
                key,
                name,
                args,
                kwargs,
            } => {
                write!(f, "enter {} {}(", key, name)?;
                let mut first = true;
                for arg in args {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                    first = false;
                }
                for (k, v) in kwargs {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                    first = false;
                }
                write!(f, ")")
            }
            LogEntry::Exit { key, name, result } => {
                write!(f, "exit  {} {} -> {}", key, name, result)
            }
        }
    }
}

/// Ordered, append-only call log, shared by reference between the
/// recording session and inspection code. Clones are handles to the
/// same underlying sequence. Deliberately not `Send`: recording is
/// single-threaded.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript::default()
    }

    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        Transcript {
            entries: Rc::new(RefCell::new(entries)),
        }
    }

    pub fn append(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<LogEntry> {
        self.entries.borrow().get(index).cloned()
    }

    /// Copy of the entries as of now.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }
}

impl PartialEq for Transcript {
    fn eq(&self, other: &Self) -> bool {
        *self.entries.borrow() == *other.entries.borrow()
    }
}

pub const TRANSCRIPT_MAGIC: u32 = 0x4D43_5049; // "MCPI"

/// Trailer written after the entry frames in a transcript file.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptMetadata {
    pub magic: u32,
    pub version: u8,
    pub total_entries: u64,
    /// Number of Enter entries, i.e. recorded calls.
    pub call_count: u64,
    pub entries_per_key: HashMap<String, u64>,
}

impl TranscriptMetadata {
    pub fn new() -> Self {
        TranscriptMetadata {
            magic: TRANSCRIPT_MAGIC,
            version: 1,
            total_entries: 0,
            call_count: 0,
            entries_per_key: HashMap::new(),
        }
    }
}

impl Default for TranscriptMetadata {
    fn default() -> Self {
        Self::new()
    }
}
