// Top-level error for the CLI. Library errors convert in with `?`; file
// errors carry the path they were about.

use std::path::PathBuf;

use tessera_grid::ConfigError;
use tessera_push::{OutputError, PushError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse MIDI file {}: {source}", path.display())]
    Midi {
        path: PathBuf,
        #[source]
        source: midly::Error,
    },
    #[error(transparent)]
    Push(#[from] PushError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
