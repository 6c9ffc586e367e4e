//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`load_table`] (from [`unified`]) which:
//!
//! - picks the reader from the file extension
//! - applies the encoding, header row and sheet options from [`crate::config::ReadOptions`]
//! - infers one [`crate::types::DataType`] per column
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (Cargo feature `excel`)

pub mod csv;
pub mod encoding;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod unified;

pub use unified::{TableFormat, format_for_path, load_table};
