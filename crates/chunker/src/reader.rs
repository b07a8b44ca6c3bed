use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ChunkerError, Result};
use crate::record::{Chunk, Review};

/// Streams a line-delimited JSON source as successive chunks of at most
/// `chunk_size` records. Lines are pulled lazily; the whole file is never
/// held in memory.
///
/// `None` from the iterator means the source is exhausted. A fault is
/// yielded once as `Some(Err(..))`, after which the reader is fused.
pub struct ChunkReader<R> {
    lines: std::io::Lines<R>,
    chunk_size: usize,
    next_index: usize,
    line_no: usize,
    done: bool,
}

impl ChunkReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ChunkerError::OpenSource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufReader::new(file), chunk_size)
    }
}

impl<R: BufRead> ChunkReader<R> {
    pub fn new(reader: R, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ChunkerError::Config("chunk size must be positive".into()));
        }
        Ok(Self {
            lines: reader.lines(),
            chunk_size,
            next_index: 0,
            line_no: 0,
            done: false,
        })
    }

    fn read_chunk(&mut self) -> Result<Vec<Review>> {
        let mut records = Vec::with_capacity(self.chunk_size.min(4096));
        while records.len() < self.chunk_size {
            let line = match self.lines.next() {
                Some(line) => line,
                None => break,
            };
            self.line_no += 1;
            let line = line.map_err(|source| ChunkerError::Read {
                line: self.line_no,
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let review = serde_json::from_str(&line).map_err(|source| ChunkerError::Parse {
                line: self.line_no,
                source,
            })?;
            records.push(review);
        }
        Ok(records)
    }
}

impl<R: BufRead> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_chunk() {
            Ok(records) if records.is_empty() => {
                self.done = true;
                None
            }
            Ok(records) => {
                let index = self.next_index;
                self.next_index += 1;
                Some(Ok(Chunk { index, records }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
