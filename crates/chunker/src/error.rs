use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("cannot open source {path}: {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {record} of chunk {chunk} (review_id {review_id}) has no text")]
    MissingText {
        chunk: usize,
        record: usize,
        review_id: String,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot launch script {script} for chunk {chunk}: {source}")]
    ScriptLaunch {
        script: PathBuf,
        chunk: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("script {script} failed on chunk {chunk}: {status}")]
    ScriptFailed {
        script: PathBuf,
        chunk: usize,
        status: ExitStatus,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ChunkerError>;
