use thiserror::Error;

#[derive(Debug, Error)]
pub enum TizumError {
    #[error("cannot open task database at {path}: {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read tasks: {0}")]
    StorageRead(#[source] rusqlite::Error),

    #[error("failed to write task: {0}")]
    StorageWrite(#[source] rusqlite::Error),

    #[error("{0}")]
    Validation(String),

    #[error("task {id} has a corrupt created_at value {value:?}: {source}")]
    DataCorruption {
        id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{}", out_of_range_message(*position, *len))]
    OutOfRange { position: i64, len: usize },

    #[error("invalid position {0:?} (expected a positive number)")]
    InvalidPosition(String),

    #[error("could not determine the home directory (set TIZUM_HOME)")]
    HomeDirUnavailable,

    #[error("cannot create data directory {path}: {source}")]
    DataDirUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn out_of_range_message(position: i64, len: usize) -> String {
    if len == 0 {
        format!("no task at position {position} (the list is empty)")
    } else {
        format!("no task at position {position} (valid: 1-{len})")
    }
}

impl TizumError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::StorageRead(_) => "storage_read_error",
            Self::StorageWrite(_) => "storage_write_error",
            Self::Validation(_) => "validation_error",
            Self::DataCorruption { .. } => "data_corruption",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidPosition(_) => "invalid_position",
            Self::HomeDirUnavailable => "home_dir_unavailable",
            Self::DataDirUnavailable { .. } => "data_dir_unavailable",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    /// Errors that end the process when they happen during startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable { .. }
                | Self::HomeDirUnavailable
                | Self::DataDirUnavailable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TizumError>;
