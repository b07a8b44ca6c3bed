use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ChunkerError, Result};
use crate::record::Chunk;

/// How output files are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `{local_index}.txt`, restarting at 0 every chunk. Chunk N+1 overwrites
    /// chunk N's files, so the post-processing hook must consume them first.
    #[default]
    PerChunk,
    /// `{chunk}_{local_index}.txt`, unique across the whole run.
    Global,
}

impl FileNaming {
    pub fn file_name(self, chunk: usize, local_index: usize) -> String {
        match self {
            FileNaming::PerChunk => format!("{}.txt", local_index),
            FileNaming::Global => format!("{}_{}.txt", chunk, local_index),
        }
    }
}

pub struct TextWriter {
    output_dir: PathBuf,
    naming: FileNaming,
}

impl TextWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P, naming: FileNaming) -> Self {
        Self {
            output_dir: output_dir.into(),
            naming,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ChunkerError::Write {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Writes one file per record and returns the paths in record order.
    /// Files written before a failing record are left in place.
    pub fn write_chunk(&self, chunk: &Chunk) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(chunk.len());
        for (i, review) in chunk.records.iter().enumerate() {
            let text = review.text.as_deref().ok_or_else(|| ChunkerError::MissingText {
                chunk: chunk.index,
                record: i,
                review_id: review.review_id.clone(),
            })?;
            let path = self.output_dir.join(self.naming.file_name(chunk.index, i));
            write_text(&path, text)?;
            debug!("wrote {} ({} bytes)", path.display(), text.len());
            written.push(path);
        }
        Ok(written)
    }
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let wrap = |source: std::io::Error| ChunkerError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(text.as_bytes()).map_err(wrap)
}
