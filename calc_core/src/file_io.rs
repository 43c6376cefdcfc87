//! # History Persistence
//!
//! Persists the calculation history:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the real file
//! - **File locking**: two calculator processes never interleave writes
//! - **Version validation**: refuse files from a newer schema
//!
//! Lock files sit next to the history file with a `.lock` suffix and hold
//! JSON describing the owner.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_or_create_history, save_history, HistoryLock};
//! use calc_core::history::HistoryEntry;
//! use std::path::Path;
//!
//! let path = Path::new("history.json");
//! let lock = HistoryLock::acquire(path)?;
//!
//! let mut history = load_or_create_history(path)?;
//! history.record(HistoryEntry::new("2+2", "4", "2+2=4"));
//! save_history(&history, path)?;
//!
//! drop(lock);
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::history::{History, SCHEMA_VERSION};

/// Locks older than this are considered abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Owner metadata written into the lock file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Owning process
    pub pid: u32,
    /// Machine name where the lock was taken
    pub machine: String,
    /// When the lock was taken
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    fn current() -> Self {
        LockInfo {
            pid: std::process::id(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Exclusive lock on a history file, released on drop.
///
/// Holds an OS advisory lock (fs2) on the lock file and records the
/// owner inside it so a blocked process can say who is holding it.
pub struct HistoryLock {
    lock_path: PathBuf,
    _file: File,
    pub info: LockInfo,
}

impl HistoryLock {
    /// Take the lock for `path`.
    ///
    /// # Errors
    ///
    /// [`CalcError::FileLocked`] if a live process already holds it.
    pub fn acquire(path: &Path) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);

        if let Ok(existing) = read_lock_info(&lock_path) {
            if !is_lock_stale(&existing) {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("pid {} on {}", existing.pid, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            tracing::warn!(
                path = %lock_path.display(),
                pid = existing.pid,
                "taking over stale history lock"
            );
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::current();
        let json = serde_json::to_string_pretty(&info)?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        Ok(HistoryLock {
            lock_path,
            _file: file,
            info,
        })
    }

    /// Owner of a live lock on `path`, if any.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path))
            .ok()
            .filter(|info| !is_lock_stale(info))
    }
}

impl Drop for HistoryLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    Ok(serde_json::from_str(&contents)?)
}

fn is_lock_stale(info: &LockInfo) -> bool {
    if hostname().as_deref() == Some(info.machine.as_str()) && !process_alive(info.pid) {
        return true;
    }
    (Utc::now() - info.locked_at).num_hours() > STALE_LOCK_HOURS
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{pid}")).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut contents))
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Save the history with atomic write semantics.
///
/// Writes `<path>.tmp`, syncs it, then renames it over `path`.
pub fn save_history(history: &History, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(history)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.sync_all())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("replace", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), entries = history.len(), "history saved");
    Ok(())
}

/// Load a history file.
///
/// # Errors
///
/// - [`CalcError::FileError`] on I/O failure
/// - [`CalcError::SerializationError`] for invalid JSON
/// - [`CalcError::VersionMismatch`] for an incompatible schema
pub fn load_history(path: &Path) -> CalcResult<History> {
    let contents = read_to_string(path, "read")?;
    let history: History = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("{}: {e}", path.display()),
    })?;
    validate_version(&history.meta.version)?;
    history.settings.validate()?;
    Ok(history)
}

/// Load the history, or start a fresh one if the file does not exist yet.
pub fn load_or_create_history(path: &Path) -> CalcResult<History> {
    if path.exists() {
        load_history(path)
    } else {
        Ok(History::new())
    }
}

/// Major versions must match; within 0.x a newer minor is rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file.as_slice(), current.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
