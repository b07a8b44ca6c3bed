pub mod config;
pub mod error;
pub mod processor;
pub mod reader;
pub mod record;
pub mod script;
pub mod writer;

pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use processor::{ChunkProcessor, RunFailure, RunSummary};
pub use reader::ChunkReader;
pub use record::{Chunk, Review};
pub use script::{ChunkHook, NoopHook, ShellScript};
pub use writer::{FileNaming, TextWriter};
