use anyhow::{bail, Context, Result};
use chunker::{ChunkHook, ChunkProcessor, ChunkerConfig, FileNaming, NoopHook, ShellScript};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Loaded when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "configs/chunker.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Split a review dataset into per-review text files, chunk by chunk", long_about = None)]
pub struct Cli {
    /// YAML configuration file [default: configs/chunker.yaml when present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Line-delimited JSON reviews
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for the per-review .txt files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Script run after each chunk with the chunk index
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Reviews per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Name files `<chunk>_<index>.txt` instead of reusing `<index>.txt`
    #[arg(long)]
    pub global_names: bool,

    /// Keep going when the script exits non-zero
    #[arg(long)]
    pub ignore_script_status: bool,

    /// Only write the text files; do not run the script
    #[arg(long)]
    pub no_script: bool,
}

impl Cli {
    pub fn resolve_config(&self) -> Result<ChunkerConfig> {
        self.resolve_config_with_default(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// An explicit `--config` must exist; the default path is optional.
    pub fn resolve_config_with_default(&self, default_path: &Path) -> Result<ChunkerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file {} does not exist", path.display());
                }
                load(path)?
            }
            None if default_path.exists() => load(default_path)?,
            None => ChunkerConfig::default(),
        };

        if let Some(input) = &self.input {
            config.source = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(script) = &self.script {
            config.script = script.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if self.global_names {
            config.naming = FileNaming::Global;
        }
        if self.ignore_script_status {
            config.check_script_status = false;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Runs the processor and writes the summary line to `out`, whether or
    /// not the run completed. Returns `false` when the run stopped on a fault.
    pub fn execute<W: Write>(&self, config: ChunkerConfig, out: &mut W) -> Result<bool> {
        log::info!(
            "Processing {} in chunks of {} into {}",
            config.source.display(),
            config.chunk_size,
            config.output_dir.display()
        );
        if self.no_script {
            return process(config, NoopHook, out);
        }
        let script = ShellScript::new(&config.script).check_status(config.check_script_status);
        log::info!("Post-processing each chunk with {}", script.path().display());
        process(config, script, out)
    }
}

fn load(path: &Path) -> Result<ChunkerConfig> {
    log::info!("Loading config from {}", path.display());
    ChunkerConfig::from_file(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn process<H: ChunkHook, W: Write>(config: ChunkerConfig, hook: H, out: &mut W) -> Result<bool> {
    match ChunkProcessor::new(config, hook).run() {
        Ok(summary) => {
            writeln!(out, "{}", summary)?;
            Ok(true)
        }
        Err(failure) => {
            writeln!(out, "{}", failure.summary)?;
            eprintln!("Error: {}", failure);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("review_chunks").chain(args.iter().copied())).unwrap()
    }

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("chunker.yaml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_apply_when_no_config_is_found() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&[]);
        let config = cli
            .resolve_config_with_default(&dir.path().join("absent.yaml"))
            .unwrap();
        assert_eq!(config, ChunkerConfig::default());
    }

    #[test]
    fn default_config_file_is_loaded_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "chunk_size: 7\n");
        let config = parse(&[]).resolve_config_with_default(&path).unwrap();
        assert_eq!(config.chunk_size, 7);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let typo = dir.path().join("typo.yaml");
        let cli = parse(&["--config", typo.to_str().unwrap()]);
        let err = cli
            .resolve_config_with_default(&dir.path().join("absent.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("typo.yaml"));
    }

    #[test]
    fn flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "source: a.json\noutput_dir: a_out\nscript: a.sh\nchunk_size: 10\n",
        );
        let cli = parse(&[
            "--config",
            path.to_str().unwrap(),
            "--input",
            "b.json",
            "--output-dir",
            "b_out",
            "--chunk-size",
            "20",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.source, PathBuf::from("b.json"));
        assert_eq!(config.output_dir, PathBuf::from("b_out"));
        assert_eq!(config.script, PathBuf::from("a.sh"));
        assert_eq!(config.chunk_size, 20);
        assert_eq!(config.naming, FileNaming::PerChunk);
        assert!(config.check_script_status);
    }

    #[test]
    fn switches_set_naming_and_status_policy() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&["--global-names", "--ignore-script-status"]);
        let config = cli
            .resolve_config_with_default(&dir.path().join("absent.yaml"))
            .unwrap();
        assert_eq!(config.naming, FileNaming::Global);
        assert!(!config.check_script_status);
    }

    #[test]
    fn zero_chunk_size_flag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&["--chunk-size", "0"]);
        assert!(cli
            .resolve_config_with_default(&dir.path().join("absent.yaml"))
            .is_err());
    }

    #[test]
    fn missing_source_fails_but_still_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.json");
        let output = dir.path().join("out");
        let cli = parse(&[
            "--input",
            input.to_str().unwrap(),
            "--output-dir",
            output.to_str().unwrap(),
            "--no-script",
        ]);
        let config = cli
            .resolve_config_with_default(&dir.path().join("absent.yaml"))
            .unwrap();

        let mut out = Vec::new();
        let succeeded = cli.execute(config, &mut out).unwrap();

        assert!(!succeeded);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total 0 files are processed, by 0 chunks\n"
        );
        assert!(!output.exists());
    }

    #[test]
    fn clean_run_succeeds_without_script() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("review.json");
        fs::write(
            &input,
            "{\"review_id\":\"a\",\"text\":\"x\"}\n{\"review_id\":\"b\",\"text\":\"y\"}\n",
        )
        .unwrap();
        let output = dir.path().join("out");
        let cli = parse(&[
            "--input",
            input.to_str().unwrap(),
            "--output-dir",
            output.to_str().unwrap(),
            "--chunk-size",
            "1",
            "--no-script",
        ]);
        let config = cli
            .resolve_config_with_default(&dir.path().join("absent.yaml"))
            .unwrap();

        let mut out = Vec::new();
        assert!(cli.execute(config, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Total 2 files are processed, by 2 chunks\n"
        );
        assert_eq!(fs::read_to_string(output.join("0.txt")).unwrap(), "y");
    }
}
