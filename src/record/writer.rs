use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::Error;
use crate::transcript::{LogEntry, TranscriptMetadata, TRANSCRIPT_MAGIC};

/// Writes a transcript file: length-prefixed bincode entry frames,
/// then a metadata trailer and an end marker.
pub struct TranscriptWriter {
    file: BufWriter<File>,
    metadata: TranscriptMetadata,
}

impl TranscriptWriter {
    pub fn new(path: &str) -> Result<Self, Error> {
        let file = File::create(path)?;
        Ok(TranscriptWriter {
            file: BufWriter::new(file),
            metadata: TranscriptMetadata::new(),
        })
    }

    pub fn write_entry(&mut self, entry: &LogEntry) -> Result<(), Error> {
        let encoded = bincode::serialize(entry)?;

        // u16 length prefix per frame
        self.file.write_all(&(encoded.len() as u16).to_le_bytes())?;
        self.file.write_all(&encoded)?;

        self.metadata.total_entries += 1;
        if entry.is_enter() {
            self.metadata.call_count += 1;
        }
        *self
            .metadata
            .entries_per_key
            .entry(entry.key().to_string())
            .or_insert(0) += 1;

        Ok(())
    }

    /// Seal the file: metadata, then its length prefix, then the end
    /// marker so readers can locate the trailer from the file end.
    pub fn finish(mut self) -> Result<(), Error> {
        let encoded = bincode::serialize(&self.metadata)?;
        self.file.write_all(&encoded)?;
        self.file.write_all(&(encoded.len() as u16).to_le_bytes())?;
        self.file.write_all(&TRANSCRIPT_MAGIC.to_le_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}
