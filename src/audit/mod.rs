//! Audit module for the Pokédex gateway
//!
//! Append-only records of what each user did (actions) and what went
//! wrong for them (errors). Unauthenticated failures are recorded under
//! [`UNKNOWN_USER`].

use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

/// Username recorded when no verified identity is available.
pub const UNKNOWN_USER: &str = "Unknown";

pub trait AuditLog: Send + Sync {
    fn record_action(&self, username: &str, message: &str);
    fn record_error(&self, username: &str, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
    Action,
    Error,
}

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: AuditKind,
    pub username: String,
    pub message: String,
}

impl AuditEntry {
    fn new(kind: AuditKind, username: &str, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            username: username.to_string(),
            message: message.to_string(),
        }
    }

    /// One complete log line, newline included. Control characters in the
    /// username or message are escaped so an entry never spans lines.
    pub fn to_line(&self) -> String {
        format!(
            "{} - {} - {}\n",
            self.timestamp.to_rfc3339(),
            escape_controls(&self.username),
            escape_controls(&self.message)
        )
    }
}

fn escape_controls(field: &str) -> Cow<'_, str> {
    if !field.chars().any(char::is_control) {
        return Cow::Borrowed(field);
    }
    let mut escaped = String::with_capacity(field.len() + 8);
    for c in field.chars() {
        if c.is_control() {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// File-backed audit log writing actions and errors to separate files.
pub struct FileAuditLog {
    actions: Mutex<File>,
    errors: Mutex<File>,
}

impl FileAuditLog {
    pub fn open(actions_path: impl AsRef<Path>, errors_path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            actions: Mutex::new(open_append(actions_path.as_ref())?),
            errors: Mutex::new(open_append(errors_path.as_ref())?),
        })
    }

    fn append(&self, file: &Mutex<File>, entry: &AuditEntry) {
        // Synchronous on the worker thread: one short line per entry, and a
        // single write under the lock keeps lines whole under concurrency
        let mut file = lock(file);
        if let Err(e) = file.write_all(entry.to_line().as_bytes()) {
            error!("Failed to write audit entry for {}: {}", entry.username, e);
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AuditLog for FileAuditLog {
    fn record_action(&self, username: &str, message: &str) {
        info!(target: "audit", username, "{}", message);
        self.append(&self.actions, &AuditEntry::new(AuditKind::Action, username, message));
    }

    fn record_error(&self, username: &str, message: &str) {
        warn!(target: "audit", username, "{}", message);
        self.append(&self.errors, &AuditEntry::new(AuditKind::Error, username, message));
    }
}

/// In-memory audit log, handy for tests and for running without a disk.
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        lock(&self.entries).clone()
    }

    pub fn actions(&self) -> Vec<AuditEntry> {
        self.of_kind(AuditKind::Action)
    }

    pub fn errors(&self) -> Vec<AuditEntry> {
        self.of_kind(AuditKind::Error)
    }

    fn of_kind(&self, kind: AuditKind) -> Vec<AuditEntry> {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.kind == kind)
            .cloned()
            .collect()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record_action(&self, username: &str, message: &str) {
        lock(&self.entries).push(AuditEntry::new(AuditKind::Action, username, message));
    }

    fn record_error(&self, username: &str, message: &str) {
        lock(&self.entries).push(AuditEntry::new(AuditKind::Error, username, message));
    }
}
