use std::path::{Path, PathBuf};
use std::process::Command;

use log::{info, warn};

use crate::error::{ChunkerError, Result};

/// Post-processing step run after every chunk has been written to disk.
///
/// With per-chunk file naming the next chunk overwrites the current one's
/// files, so an implementation must finish consuming them before returning.
pub trait ChunkHook {
    fn on_chunk(&mut self, chunk: usize) -> Result<()>;
}

/// Runs an external executable once per chunk with the chunk index as its
/// only argument and blocks until it exits.
#[derive(Debug, Clone)]
pub struct ShellScript {
    path: PathBuf,
    check_status: bool,
}

impl ShellScript {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            check_status: true,
        }
    }

    /// When disabled, a non-zero exit status is logged and ignored.
    pub fn check_status(mut self, check: bool) -> Self {
        self.check_status = check;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChunkHook for ShellScript {
    fn on_chunk(&mut self, chunk: usize) -> Result<()> {
        info!("Running {} for chunk {}", self.path.display(), chunk);
        let status = Command::new(&self.path)
            .arg(chunk.to_string())
            .status()
            .map_err(|source| ChunkerError::ScriptLaunch {
                script: self.path.clone(),
                chunk,
                source,
            })?;

        if status.success() {
            return Ok(());
        }
        if self.check_status {
            return Err(ChunkerError::ScriptFailed {
                script: self.path.clone(),
                chunk,
                status,
            });
        }
        warn!(
            "{} exited with {} on chunk {}; continuing",
            self.path.display(),
            status,
            chunk
        );
        Ok(())
    }
}

/// Skips post-processing entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl ChunkHook for NoopHook {
    fn on_chunk(&mut self, _chunk: usize) -> Result<()> {
        Ok(())
    }
}
