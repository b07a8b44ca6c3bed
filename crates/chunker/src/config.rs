use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChunkerError, Result};
use crate::writer::FileNaming;

pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkerConfig {
    /// Line-delimited JSON file of reviews.
    pub source: PathBuf,
    /// Directory receiving one `.txt` file per review.
    pub output_dir: PathBuf,
    /// Executable invoked after each chunk with the chunk index.
    pub script: PathBuf,
    /// Records per chunk.
    pub chunk_size: usize,
    pub naming: FileNaming,
    /// Treat a non-zero script exit as a failure.
    pub check_script_status: bool,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("dataset/review.json"),
            output_dir: PathBuf::from("Source"),
            script: PathBuf::from("shellscript.sh"),
            chunk_size: DEFAULT_CHUNK_SIZE,
            naming: FileNaming::PerChunk,
            check_script_status: true,
        }
    }
}

impl ChunkerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkerError::Config("chunk_size must be positive".into()));
        }
        Ok(())
    }
}
