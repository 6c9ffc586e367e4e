use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading, cleaning, and writing tables.
pub type CleanerResult<T> = Result<T, CleanerError>;

/// Error type returned by the fallible stages of a cleaning run.
///
/// The cleaning pipeline itself never returns this type: per-cell and per-column coercion
/// failures are swallowed inside [`crate::processing`]. Everything around it (reading the
/// config, loading the input, writing the output and report) reports through this enum.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Underlying I/O error (e.g. permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Excel read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "excel")]
    /// Excel write error (feature-gated behind `excel`).
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The config document is not valid YAML or does not match the expected shape.
    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Report serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input bytes could not be decoded with the configured encoding.
    #[error("cannot decode input as '{label}': {message}")]
    Encoding { label: String, message: String },

    /// The config parsed but holds a value that cannot be used.
    #[error("invalid config: {message}")]
    Config { message: String },

    /// A required input file does not exist.
    #[error("{kind} file does not exist: {}", path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    /// The input does not form a usable table (no header row, ragged rows, etc.).
    #[error("table error: {message}")]
    Table { message: String },
}
