use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{Result, RotationPolicy};

/// State of the current log file.
#[derive(Debug)]
struct FileState {
    /// The open file handle.
    file: File,
    /// Current size of the file in bytes.
    size: u64,
    /// Time suffix of the current file (empty for size-based rotation).
    time_suffix: String,
}

/// A writer that rotates log files by size or by time period.
///
/// Size rotation keeps the base path stable and shifts old content through
/// numbered backups (`base.1` up to `base.N`). The shift copies and truncates
/// instead of renaming, so the base file can be monitored continuously
/// (e.g. `tail -f`). Time rotation appends the period suffix to the base
/// path (`base.2024-01-01`) and prunes old period files down to the
/// retention count.
///
/// The writer is not internally synchronized; callers that share one across
/// threads wrap it in a mutex (the file handler does).
pub struct RotatingWriter {
    /// Base path for log files.
    base_path: PathBuf,
    /// The rotation policy.
    policy: RotationPolicy,
    /// Current file state; `None` until the first open.
    state: Option<FileState>,
}

impl RotatingWriter {
    /// Create a new rotating writer and open the initial file.
    ///
    /// The parent directory is created if necessary, so paths containing
    /// directories that don't yet exist (e.g. `logs/app.log`) work.
    pub fn new(base_path: &Path, policy: RotationPolicy) -> Result<Self> {
        let mut writer = Self {
            base_path: base_path.to_path_buf(),
            policy,
            state: None,
        };

        if let Some(parent) = writer.base_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Open eagerly so a bad path surfaces at construction.
        writer.ensure_current(0)?;

        Ok(writer)
    }

    /// Path of the file currently written to.
    pub fn current_path(&self) -> PathBuf {
        let suffix = self.policy.current_suffix();
        if suffix.is_empty() {
            self.base_path.clone()
        } else {
            PathBuf::from(format!("{}.{}", self.base_path.display(), suffix))
        }
    }

    /// Check if rotation is needed before writing `buf_len` more bytes.
    fn needs_rotation(&self, state: &FileState, buf_len: usize) -> bool {
        match &self.policy {
            RotationPolicy::Size { max_bytes, .. } => state.size + buf_len as u64 > *max_bytes,
            RotationPolicy::Time { .. } => self.policy.current_suffix() != state.time_suffix,
        }
    }

    /// Check if the base file exists and can simply be appended to.
    fn should_use_existing_file(&self) -> io::Result<bool> {
        match &self.policy {
            RotationPolicy::Size { max_bytes, .. } => {
                if !self.base_path.exists() {
                    return Ok(false);
                }
                Ok(self.base_path.metadata()?.len() <= *max_bytes)
            }
            // Time-based files carry the period in their name; the suffixed
            // file for the current period is appended to on open.
            RotationPolicy::Time { .. } => Ok(false),
        }
    }

    /// Shift the numbered backup chain and truncate the current file.
    ///
    /// Copies content: base.log -> base.log.1, then truncates base.log to 0.
    fn rotate_by_size(&self) -> io::Result<()> {
        let backups = self.policy.backups() as u64;
        let current = self.current_path();

        if backups == 0 {
            if current.exists() {
                OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .open(&current)?;
            }
            return Ok(());
        }

        // Delete the oldest backup if it exists (current.<backups>).
        let oldest = PathBuf::from(format!("{}.{}", current.display(), backups));
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift: current.(N-1) -> current.N, ..., current.1 -> current.2
        for i in (1..backups).rev() {
            let from = PathBuf::from(format!("{}.{}", current.display(), i));
            let to = PathBuf::from(format!("{}.{}", current.display(), i + 1));
            if from.exists() {
                fs::rename(&from, &to)?;
            }
        }

        if current.exists() {
            let first = PathBuf::from(format!("{}.1", current.display()));
            fs::copy(&current, &first)?;

            let file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&current)?;
            file.set_len(0)?;
        }

        Ok(())
    }

    /// Remove old period files beyond the retention count.
    ///
    /// Period files share the base file name with a date-like suffix
    /// (`app.log.2024-01-01`); numbered size backups (`app.log.1`) are left
    /// alone. The current period's file is never removed.
    fn prune_time_files(&self) -> io::Result<()> {
        let backups = self.policy.backups() as usize;
        let Some(dir) = self.base_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        let Some(file_name) = self.base_path.file_name() else {
            return Ok(());
        };
        let prefix = format!("{}.", file_name.to_string_lossy());
        let current_name = self
            .current_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut old: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| {
                let Some(suffix) = name.strip_prefix(&prefix) else {
                    return false;
                };
                *name != current_name
                    && suffix.starts_with(|c: char| c.is_ascii_digit())
                    && suffix.contains('-')
            })
            .collect();

        // Period suffixes sort chronologically; drop the oldest first.
        old.sort();
        let excess = old.len().saturating_sub(backups);
        for name in old.into_iter().take(excess) {
            fs::remove_file(dir.join(name))?;
        }

        Ok(())
    }

    /// Perform rotation and open the new current file.
    fn rotate(&self) -> io::Result<FileState> {
        match &self.policy {
            RotationPolicy::Size { .. } => self.rotate_by_size()?,
            RotationPolicy::Time { .. } => self.prune_time_files()?,
        }

        self.open_current()
    }

    fn open_current(&self) -> io::Result<FileState> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())?;

        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(FileState {
            file,
            size,
            time_suffix: self.policy.current_suffix(),
        })
    }

    /// Get the current file state, rotating first if necessary.
    fn ensure_current(&mut self, buf_len: usize) -> io::Result<&mut FileState> {
        let needs_rotation = match &self.state {
            // First open: reuse the existing base file if it is under the
            // size limit, otherwise run a full rotation.
            None => !self.should_use_existing_file()?,
            Some(state) => self.needs_rotation(state, buf_len),
        };

        if needs_rotation {
            self.state = None;
            self.state = Some(self.rotate()?);
        } else if self.state.is_none() {
            self.state = Some(self.open_current()?);
        }

        match &mut self.state {
            Some(state) => Ok(state),
            None => Err(io::Error::other("failed to open log file")),
        }
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let state = self.ensure_current(buf.len())?;
        let written = state.file.write(buf)?;
        state.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.state {
            Some(state) => state.file.sync_all(),
            None => Ok(()),
        }
    }
}
