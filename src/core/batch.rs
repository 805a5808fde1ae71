//! Run the engines over many files.
//!
//! Files are read and extracted in parallel. Each file stands alone: a file
//! that cannot be read or parsed is reported and contributes no records,
//! while every other file still does. Results are ordered by file path, and
//! by document order within a file, so output does not depend on scheduling.

use std::{fs, path::Path};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::data::{ExtractionRecord, ParseError};
use crate::core::engine::{EngineRegistry, Extractor};

/// Why a file produced no records.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{file_path}: failed to read file: {source}")]
    Read {
        file_path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FileError {
    pub fn file_path(&self) -> &str {
        match self {
            FileError::Read { file_path, .. } => file_path,
            FileError::Parse(err) => &err.file_path,
        }
    }

    /// Line of the failure, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            FileError::Read { .. } => None,
            FileError::Parse(err) => Some(err.line),
        }
    }

    /// The cause without the location prefix.
    pub fn cause(&self) -> String {
        match self {
            FileError::Read { source, .. } => format!("failed to read file: {}", source),
            FileError::Parse(err) => err.kind.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub records: Vec<ExtractionRecord>,
    pub failures: Vec<FileError>,
    /// Files an engine was run on.
    pub files_processed: usize,
}

impl BatchResult {
    pub fn failed_file_count(&self) -> usize {
        self.failures.len()
    }
}

/// Extract every file that has an engine. Paths in records and errors are
/// shown relative to `root`.
pub fn extract_files<'a, I>(files: I, root: &Path, registry: &EngineRegistry) -> BatchResult
where
    I: IntoIterator<Item = &'a Path>,
{
    let jobs: Vec<(&Path, String)> = files
        .into_iter()
        .filter(|path| registry.handles(path))
        .map(|path| (path, display_path(path, root)))
        .collect();

    let mut outcomes: Vec<(String, Result<Vec<ExtractionRecord>, FileError>)> = jobs
        .par_iter()
        .filter_map(|(path, shown)| {
            let engine = registry.for_path(path)?;
            let outcome = fs::read_to_string(path)
                .map_err(|source| FileError::Read {
                    file_path: shown.clone(),
                    source,
                })
                .and_then(|text| engine.extract(shown, &text).map_err(FileError::from));
            debug!(
                file = shown.as_str(),
                engine = engine.name(),
                ok = outcome.is_ok(),
                "processed file"
            );
            Some((shown.clone(), outcome))
        })
        .collect();

    outcomes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut result = BatchResult {
        files_processed: outcomes.len(),
        ..Default::default()
    };
    for (_, outcome) in outcomes {
        match outcome {
            Ok(records) => result.records.extend(records),
            Err(err) => {
                match &err {
                    FileError::Read { .. } => warn!("{}", err),
                    FileError::Parse(_) => debug!("{}", err),
                }
                result.failures.push(err);
            }
        }
    }
    result
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
