use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems while loading the records file.
///
/// Cells that merely fail numeric coercion are not errors; they load as nulls.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("cannot open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("malformed arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("table has no header row")]
    EmptyTable,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
