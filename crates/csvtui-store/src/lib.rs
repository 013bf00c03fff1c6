// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod demo;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const BACKUP_SUFFIX: &str = ".temp";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {}: {detail}", .path.display())]
    Parse { path: PathBuf, detail: String },
    #[error("invalid csv path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn from_csv(path: &Path, error: csv::Error) -> Self {
        if !error.is_io_error() {
            return Self::Parse {
                path: path.to_path_buf(),
                detail: error.to_string(),
            };
        }
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::io(path, source),
            other => Self::Parse {
                path: path.to_path_buf(),
                detail: format!("{other:?}"),
            },
        }
    }
}

/// Header record and data records as read from disk. Data records may be
/// shorter or longer than the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvData {
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }
}

/// Rejects paths that cannot name a local CSV file.
pub fn validate_csv_path(path: &str) -> Result<(), StoreError> {
    let invalid = |reason| {
        Err(StoreError::InvalidPath {
            path: path.to_owned(),
            reason,
        })
    };

    if path.trim().is_empty() {
        return invalid("path must not be empty");
    }
    if let Some(index) = path.find("://")
        && index > 0
        && path[..index].chars().all(char::is_alphabetic)
    {
        return invalid("looks like a URL; pass a filesystem path instead");
    }
    if path.ends_with(['/', '\\']) {
        return invalid("names a directory; pass a CSV file");
    }
    Ok(())
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Reads a CSV file. The first record becomes the header row.
pub fn load(path: &Path) -> Result<CsvData, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| StoreError::from_csv(path, error))?;

    let mut records = reader.records();
    let headers = match records.next() {
        Some(record) => record
            .map_err(|error| StoreError::from_csv(path, error))?
            .iter()
            .map(str::to_owned)
            .collect(),
        None => {
            return Err(StoreError::Parse {
                path: path.to_path_buf(),
                detail: "file contains no records".to_owned(),
            });
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|error| StoreError::from_csv(path, error))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    info!(path = %path.display(), rows = rows.len(), "loaded csv");
    Ok(CsvData { headers, rows })
}

fn write_records(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|error| StoreError::from_csv(path, error))?;

    writer
        .write_record(headers)
        .map_err(|error| StoreError::from_csv(path, error))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|error| StoreError::from_csv(path, error))?;
    }
    writer.flush().map_err(|error| StoreError::io(path, error))
}

/// Writes headers and rows to `path`, replacing its contents.
pub fn save(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<(), StoreError> {
    write_records(path, headers, rows)?;
    info!(path = %path.display(), rows = rows.len(), "saved csv");
    Ok(())
}

/// Snapshot of unsaved edits next to the source file, at `<path>.temp`.
pub fn write_backup(
    path: &Path,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<PathBuf, StoreError> {
    let backup = backup_path(path);
    write_records(&backup, headers, rows)?;
    debug!(path = %backup.display(), "wrote backup");
    Ok(backup)
}

/// Returns whether a backup existed.
pub fn remove_backup(path: &Path) -> Result<bool, StoreError> {
    let backup = backup_path(path);
    match fs::remove_file(&backup) {
        Ok(()) => {
            debug!(path = %backup.display(), "removed backup");
            Ok(true)
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(StoreError::io(&backup, error)),
    }
}

/// A CSV file opened for viewing and editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        validate_csv_path(&path.to_string_lossy())?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<CsvData, StoreError> {
        load(&self.path)
    }

    /// Saves over the source file and drops the backup, which is now stale.
    /// The save stands even when the backup cannot be removed.
    pub fn save(&self, headers: &[String], rows: &[Vec<String>]) -> Result<(), StoreError> {
        save(&self.path, headers, rows)?;
        if let Err(error) = remove_backup(&self.path) {
            warn!(%error, "could not remove backup after save");
        }
        Ok(())
    }

    pub fn write_backup(
        &self,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<PathBuf, StoreError> {
        write_backup(&self.path, headers, rows)
    }

    /// Resolves a name typed at the save prompt. Relative names land next to
    /// the source file.
    pub fn sibling(&self, name: &Path) -> PathBuf {
        if name.is_absolute() {
            return name.to_path_buf();
        }
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
            _ => name.to_path_buf(),
        }
    }
}
