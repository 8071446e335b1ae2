//! Filesystem adapter for observation input files
//!
//! Opens the input, records its size for the timing diagnostic, and hands
//! back a buffered reader, optionally wrapped in a byte progress bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::BYTES_PER_GB;
use crate::{Error, Result};

/// An opened input file ready for a single sequential pass
pub struct InputFile {
    path: PathBuf,
    size_bytes: u64,
    reader: Box<dyn BufRead>,
    progress: Option<ProgressBar>,
}

impl std::fmt::Debug for InputFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputFile")
            .field("path", &self.path)
            .field("size_bytes", &self.size_bytes)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl InputFile {
    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes at open time
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Buffered reader over the file contents
    pub fn reader(&mut self) -> &mut dyn BufRead {
        self.reader.as_mut()
    }

    /// Clear the progress bar, if one is shown
    pub fn finish(&self) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
    }
}

/// Open `path` for reading with a `buffer_kb` KiB read buffer
///
/// A missing or unreadable file maps to [`Error::InputNotFound`].
pub fn open_input(path: &Path, buffer_kb: usize, show_progress: bool) -> Result<InputFile> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::input_not_found(path, e),
        _ => Error::io(format!("Failed to open {}", path.display()), e),
    })?;

    let metadata = file
        .metadata()
        .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?;
    let size_bytes = metadata.len();

    if !metadata.is_file() {
        return Err(Error::configuration(format!(
            "Input path is not a regular file: {}",
            path.display()
        )));
    }

    debug!(
        "Opened {} ({} bytes, {} KiB buffer)",
        path.display(),
        size_bytes,
        buffer_kb
    );

    let capacity = buffer_kb.checked_mul(1024).ok_or_else(|| {
        Error::configuration(format!("Read buffer of {} KiB is too large", buffer_kb))
    })?;
    let (reader, progress): (Box<dyn BufRead>, Option<ProgressBar>) = if show_progress {
        let pb = ProgressBar::new(size_bytes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
                )
                .map_err(|e| Error::configuration(format!("Invalid progress template: {}", e)))?
                .progress_chars("#>-"),
        );
        let reader = BufReader::with_capacity(capacity, pb.wrap_read(file));
        (Box::new(reader), Some(pb))
    } else {
        (Box::new(BufReader::with_capacity(capacity, file)), None)
    };

    Ok(InputFile {
        path: path.to_path_buf(),
        size_bytes,
        reader,
        progress,
    })
}

/// Size in gigabytes (1024³ bytes) for the timing diagnostic
pub fn format_gigabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}
