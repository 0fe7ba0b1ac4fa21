//! Ordered schema migrations.
//!
//! # Responsibility
//! - Define every schema migration shipped with this build.
//! - Apply pending migrations atomically and record progress in
//!   `PRAGMA user_version`.
//!
//! # Invariants
//! - Migration versions are contiguous and ascending, starting at 1.
//! - A database at a version newer than [`latest_version`] is rejected
//!   rather than partially interpreted.

use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::{DbError, DbResult};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_deadline.sql"),
    },
];

/// Schema version produced by a full migration run.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Brings `conn` from its current `user_version` up to [`latest_version`].
///
/// All pending migrations run inside one immediate transaction, so a
/// failure leaves the database at its previous version.
pub fn apply_migrations(conn: &Connection) -> DbResult<()> {
    let db_version = current_version(conn)?;
    let latest = latest_version();

    if db_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest,
        });
    }
    if db_version == latest {
        return Ok(());
    }

    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > db_version) {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        info!(
            "event=db_migrate module=db status=ok version={}",
            migration.version
        );
    }
    tx.commit()?;
    Ok(())
}

fn current_version(conn: &Connection) -> DbResult<u32> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
