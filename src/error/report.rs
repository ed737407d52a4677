use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write CSV report '{path}': {source}")]
    WriteCsv {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write console output: {source}")]
    Console {
        #[source]
        source: std::io::Error,
    },
}
