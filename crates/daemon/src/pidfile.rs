//! PID file handling: prevents double instantiation, matching the original
//! daemon's `main.cpp` (reads the existing PID file, signals it with
//! signal 0, and exits on EEXIST if that process is still alive).

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PidFileError {
    #[error("another instance is already running (pid {0})")]
    AlreadyRunning(i32),

    #[error("I/O error on PID file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PidFileError>;

/// The user cache directory's rvoip subdirectory, `$XDG_CACHE_HOME/rvoip`
/// falling back to `~/.cache/rvoip`.
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rvoip")
}

pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Acquires the PID file at `dir/rvoip.pid`, creating `dir` if needed.
    /// Fails with [`PidFileError::AlreadyRunning`] if a live process already
    /// holds it.
    pub fn acquire(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| PidFileError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = dir.join("rvoip.pid");

        if let Ok(existing) = fs::read_to_string(&path) {
            if let Ok(pid) = existing.trim().parse::<i32>() {
                if process_alive(pid) {
                    return Err(PidFileError::AlreadyRunning(pid));
                }
            }
        }

        fs::write(&path, std::process::id().to_string()).map_err(|source| PidFileError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self { path })
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn process_alive(pid: i32) -> bool {
    // kill(pid, 0) sends no signal but still reports ESRCH if the process
    // is gone, matching the original daemon's liveness check.
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(not(unix))]
fn process_alive(_pid: i32) -> bool {
    false
}
