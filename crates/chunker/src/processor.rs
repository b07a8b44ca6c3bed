use std::fmt;

use log::{error, info};

use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::reader::ChunkReader;
use crate::script::ChunkHook;
use crate::writer::TextWriter;

/// Totals accumulated over completed chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub chunks: usize,
    /// Record count of each completed chunk, in order.
    pub chunk_records: Vec<usize>,
}

impl RunSummary {
    fn complete_chunk(&mut self, records: usize) {
        self.records += records;
        self.chunks += 1;
        self.chunk_records.push(records);
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total {} files are processed, by {} chunks",
            self.records, self.chunks
        )
    }
}

/// A run that stopped on a fault. `summary` covers the chunks completed
/// before chunk `chunk` failed.
#[derive(Debug)]
pub struct RunFailure {
    pub summary: RunSummary,
    pub chunk: usize,
    pub source: ChunkerError,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run stopped at chunk {}: {}", self.chunk, self.source)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Streams the source in chunks, writes every review's text to its own file
/// and hands each finished chunk to the hook.
pub struct ChunkProcessor<H> {
    config: ChunkerConfig,
    hook: H,
}

impl<H: ChunkHook> ChunkProcessor<H> {
    pub fn new(config: ChunkerConfig, hook: H) -> Self {
        Self { config, hook }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn run(&mut self) -> std::result::Result<RunSummary, RunFailure> {
        let mut summary = RunSummary::default();
        match self.run_inner(&mut summary) {
            Ok(()) => {
                info!("{}", summary);
                Ok(summary)
            }
            Err(source) => {
                let chunk = summary.chunks;
                error!("chunk {} failed: {}", chunk, source);
                Err(RunFailure {
                    summary,
                    chunk,
                    source,
                })
            }
        }
    }

    fn run_inner(&mut self, summary: &mut RunSummary) -> Result<()> {
        self.config.validate()?;
        let reader = ChunkReader::open(&self.config.source, self.config.chunk_size)?;
        let writer = TextWriter::new(&self.config.output_dir, self.config.naming);
        writer.prepare()?;

        for chunk in reader {
            let chunk = chunk?;
            let written = writer.write_chunk(&chunk)?;
            info!(
                "Chunk {}: wrote {} files to {}",
                chunk.index,
                written.len(),
                writer.output_dir().display()
            );
            self.hook.on_chunk(chunk.index)?;
            summary.complete_chunk(chunk.len());
        }
        Ok(())
    }
}
