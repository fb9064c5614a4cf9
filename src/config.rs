use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TizumError};

pub const HOME_ENV: &str = "TIZUM_HOME";
pub const DB_ENV: &str = "TIZUM_DB";
pub const LOG_ENV: &str = "TIZUM_LOG";

const DATA_DIR_NAME: &str = ".tizum";
const DB_FILE_NAME: &str = "tizu.db";
const LOG_FILE_NAME: &str = "tizum.log";

/// Where tizum keeps its database and log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| TizumError::DataDirUnavailable {
        path: path.display().to_string(),
        source,
    })
}

impl Config {
    /// Resolve paths from the process environment and create the data
    /// directory.
    ///
    /// Precedence for the database: `db_override` (the `--db` flag), then
    /// `TIZUM_DB`, then `<data dir>/tizu.db`. The data directory is
    /// `TIZUM_HOME` or `~/.tizum`.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        let config = Self::resolve(
            env_path(HOME_ENV),
            dirs::home_dir(),
            db_override.or_else(|| env_path(DB_ENV)),
        )?;
        create_dir(&config.data_dir)?;
        if let Some(parent) = config.db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir(parent)?;
        }
        Ok(config)
    }

    /// Pure path resolution; `load` adds the environment and filesystem.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        home: Option<PathBuf>,
        db_path: Option<PathBuf>,
    ) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => home
                .ok_or(TizumError::HomeDirUnavailable)?
                .join(DATA_DIR_NAME),
        };
        let db_path = db_path.unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_path = data_dir.join(LOG_FILE_NAME);
        Ok(Self {
            data_dir,
            db_path,
            log_path,
        })
    }
}
