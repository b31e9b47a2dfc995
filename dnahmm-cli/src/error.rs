use dnahmm_core::types::DnaHmmError;
use thiserror::Error;

/// Error types raised by the command-line front end
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Malformed FASTA input or model file
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error(transparent)]
    Analysis(#[from] DnaHmmError),
}
