// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer: query modules accept
//! `&Database` and call through `conn.call()`. Do NOT create additional
//! Connection instances for writes.

use std::path::Path;

use coldreach_core::ColdreachError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Convert a tokio_rusqlite error into `ColdreachError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> ColdreachError {
    ColdreachError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database, wrapping a single background connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, applying PRAGMAs and all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, ColdreachError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ColdreachError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).await.map_err(|e| map_tr_err(e.into()))?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| ColdreachError::Storage {
                source: Box::new(e),
            })?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database with the full schema applied. Test use only.
    pub async fn open_in_memory() -> Result<Self, ColdreachError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| ColdreachError::Storage {
                source: Box::new(e),
            })?;
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), ColdreachError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
