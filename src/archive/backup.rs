use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::manifest::{BackupManifest, MANIFEST_NAME};
use super::slug::backup_entry_name;
use crate::error::{Error, Result};
use crate::indexer::conversation_files;
use crate::models::NormalizedMessage;
use crate::parsers::read_conversation;
use crate::utils::{project_dir, validate_component};

const MAX_COMPRESSION_LEVEL: i64 = 9;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Parameters of a project backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRequest {
    pub project_id: String,
    /// Display name recorded in the manifest
    pub project_name: String,
    /// Archive file to create, overwritten if it exists
    pub destination: PathBuf,
}

impl BackupRequest {
    pub fn new(
        project_id: impl Into<String>,
        project_name: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: project_name.into(),
            destination: destination.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        validate_component("projectId", &self.project_id)?;
        if self.project_name.trim().is_empty() {
            return Err(Error::invalid_request("Missing project name"));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(Error::invalid_request("Missing backup destination"));
        }
        Ok(())
    }
}

/// A conversation left out of a backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupError {
    /// Source file name, e.g. `abc.jsonl`
    pub file: String,
    pub error: String,
}

/// Outcome of a finished backup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupReport {
    pub saved_path: PathBuf,
    /// Conversations written to the archive
    pub conversation_count: usize,
    /// Conversation files found in the project
    pub total_conversations: usize,
    /// Bytes of JSON written into the archive before compression
    pub uncompressed_size: u64,
    /// Size of the archive file on disk
    pub compressed_size: u64,
    pub errors: Vec<BackupError>,
}

impl BackupReport {
    /// Archive size in megabytes with two decimals, e.g. `0.42 MB`
    pub fn total_size_display(&self) -> String {
        format!("{:.2} MB", self.compressed_size as f64 / BYTES_PER_MB)
    }
}

/// Write every conversation of a project into one zip archive.
///
/// Each conversation is read, classified and streamed into its own entry
/// (`NNN-YYYY-MM-DD-slug.json`), followed by a [`BackupManifest`]. A conversation that
/// fails to read is recorded in [`BackupReport::errors`] and skipped.
///
/// # Errors
///
/// - [`Error::InvalidRequest`] for missing parameters
/// - [`Error::NotFound`] if the project directory does not exist
/// - [`Error::EmptyProject`] if it holds no `.jsonl` files
/// - [`Error::Io`] / [`Error::Archive`] if the archive cannot be written; the partial
///   archive is removed
pub fn backup_project(root: &Path, request: &BackupRequest) -> Result<BackupReport> {
    request.validate()?;

    let dir = project_dir(root, &request.project_id)?;
    let files = conversation_files(&dir)?;
    if files.is_empty() {
        return Err(Error::EmptyProject(request.project_id.clone()));
    }

    let destination = &request.destination;
    let file = File::create(destination).map_err(|e| Error::io(destination, e))?;

    match write_archive(file, &dir, &files, request) {
        Ok(report) => {
            info!(
                "Backed up {}/{} conversations of {} to {} ({})",
                report.conversation_count,
                report.total_conversations,
                request.project_id,
                destination.display(),
                report.total_size_display()
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(destination) {
                warn!("Failed to remove partial archive {}: {}", destination.display(), remove_err);
            }
            Err(e)
        }
    }
}

fn write_archive(
    file: File,
    dir: &Path,
    files: &[PathBuf],
    request: &BackupRequest,
) -> Result<BackupReport> {
    let destination = &request.destination;
    let mut zip = ZipWriter::new(file);
    let mut uncompressed_size = 0;
    let mut conversation_count = 0;
    let mut errors = Vec::new();

    for (index, path) in files.iter().enumerate() {
        let (name, messages) = match load_entry(index + 1, path) {
            Ok(entry) => entry,
            Err(e) => {
                let file = path.file_name().map(|n| n.to_string_lossy().into_owned());
                warn!("Leaving {} out of backup: {}", path.display(), e);
                errors.push(BackupError { file: file.unwrap_or_default(), error: e.to_string() });
                continue;
            }
        };

        zip.start_file(name, entry_options())?;
        uncompressed_size += write_json_entry(&mut zip, &messages)?;
        conversation_count += 1;
    }

    let manifest = BackupManifest::new(
        &request.project_id,
        &request.project_name,
        dir,
        Utc::now(),
        conversation_count,
        files.len(),
        errors.len(),
    );
    zip.start_file(MANIFEST_NAME, entry_options())?;
    uncompressed_size += write_json_entry(&mut zip, &manifest)?;

    let file = zip.finish()?;
    file.sync_all().map_err(|e| Error::io(destination, e))?;
    let compressed_size = file.metadata().map_err(|e| Error::io(destination, e))?.len();

    Ok(BackupReport {
        saved_path: destination.clone(),
        conversation_count,
        total_conversations: files.len(),
        uncompressed_size,
        compressed_size,
        errors,
    })
}

/// Read and name one conversation before its entry is opened, so a read failure never
/// leaves a half-written entry behind
fn load_entry(index: usize, path: &Path) -> Result<(String, Vec<NormalizedMessage>)> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(path, e))?;
    let date: NaiveDate = DateTime::<Utc>::from(modified).date_naive();

    let messages = read_conversation(path)?;
    Ok((backup_entry_name(index, date, &messages), messages))
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(MAX_COMPRESSION_LEVEL))
}

/// Serialize `value` as pretty JSON into the open entry, returning the bytes written
fn write_json_entry<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<u64> {
    let mut counter = CountingWriter { inner: writer, written: 0 };
    serde_json::to_writer_pretty(&mut counter, value)?;
    counter.flush().map_err(|e| Error::Archive(e.into()))?;
    Ok(counter.written)
}

struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `{projectName}-backup-{YYYY-MM-DD}.zip`
pub fn default_backup_filename(project_name: &str, date: NaiveDate) -> String {
    format!("{}-backup-{}.zip", project_name, date.format("%Y-%m-%d"))
}
