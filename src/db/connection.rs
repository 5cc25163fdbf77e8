use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, ErrorCode, OpenFlags};

/// Open (or create) the deck file for writing. Parent directories are created
/// on demand so a fresh `--deck` path works without any setup.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    Connection::open(path).context("failed to open SQLite database")
}

/// Open an existing deck file without creating or migrating anything. Loading
/// must never touch the file, even when its contents turn out to be garbage.
pub fn open_read_only(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .context("failed to open SQLite database read-only")
}

/// True when the error chain bottoms out in SQLite refusing the file itself,
/// meaning the file is not a database or is damaged beyond reading.
pub fn is_unreadable(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<rusqlite::Error>()
            .and_then(rusqlite::Error::sqlite_error_code)
            .is_some_and(|code| {
                matches!(code, ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt)
            })
    })
}
