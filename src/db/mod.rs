// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Database connector for reports and analysis history
//!
//! The service runs without a database in demo mode. [`connect`] falls
//! back to demo mode when the store cannot be opened instead of failing.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::{FactlensError, Result};

/// Database manager (thread-safe wrapper)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Outcome of connecting at startup
#[derive(Clone)]
pub enum DbState {
    Connected(Database),
    Demo,
}

impl DbState {
    pub fn database(&self) -> Option<&Database> {
        match self {
            DbState::Connected(db) => Some(db),
            DbState::Demo => None,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            DbState::Connected(_) => "database",
            DbState::Demo => "demo",
        }
    }
}

/// A stored content report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: String,
    pub content_id: String,
    pub reason: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored analysis summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub content_type: String,
    pub credibility_score: u8,
    pub verdict: String,
    pub analyzer: String,
    pub created_at: DateTime<Utc>,
}

/// Open the configured database, degrading to demo mode on failure
pub fn connect(config: &AppConfig) -> Result<DbState> {
    let path = match config.database.path.as_deref() {
        Some(path) if !path.trim().is_empty() => path,
        _ if config.is_demo() => {
            info!("Running in demo mode without database");
            return Ok(DbState::Demo);
        }
        _ => {
            return Err(FactlensError::Config(
                "database.path is required unless FACTLENS_MODE=demo".to_string(),
            ))
        }
    };

    match Database::open(path) {
        Ok(db) => {
            info!("Database connected: {}", path);
            Ok(DbState::Connected(db))
        }
        Err(e) => {
            error!("Database connection error: {}", e);
            warn!("Continuing in demo mode without database");
            Ok(DbState::Demo)
        }
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl Database {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| FactlensError::Config("Database lock poisoned".to_string()))
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute_batch(r#"
            CREATE TABLE IF NOT EXISTS reports (
                id TEXT PRIMARY KEY,
                content_id TEXT NOT NULL,
                reason TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT NOT NULL,
                content_type TEXT NOT NULL,
                credibility_score INTEGER NOT NULL,
                verdict TEXT NOT NULL,
                analyzer TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_reports_content ON reports(content_id);
            CREATE INDEX IF NOT EXISTS idx_analyses_created ON analyses(created_at);
        "#)?;
        Ok(())
    }

    pub fn insert_report(&self, report: &ReportRecord) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            r#"INSERT INTO reports (id, content_id, reason, description, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![
                report.id,
                report.content_id,
                report.reason,
                report.description,
                report.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_report(&self, id: &str) -> Result<Option<ReportRecord>> {
        let conn = self.lock_conn()?;
        let report = conn
            .query_row(
                "SELECT id, content_id, reason, description, created_at FROM reports WHERE id = ?1",
                params![id],
                |row| {
                    let created: String = row.get(4)?;
                    Ok(ReportRecord {
                        id: row.get(0)?,
                        content_id: row.get(1)?,
                        reason: row.get(2)?,
                        description: row.get(3)?,
                        created_at: parse_timestamp(&created),
                    })
                },
            )
            .optional()?;
        Ok(report)
    }

    pub fn count_reports(&self) -> Result<i64> {
        let conn = self.lock_conn()?;
        conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn record_analysis(&self, record: &AnalysisRecord) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            r#"INSERT INTO analyses (id, content_type, credibility_score, verdict, analyzer, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                record.id,
                record.content_type,
                record.credibility_score,
                record.verdict,
                record.analyzer,
                record.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Most recent analyses, newest first
    pub fn recent_analyses(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT id, content_type, credibility_score, verdict, analyzer, created_at
               FROM analyses ORDER BY created_at DESC, rowid DESC LIMIT ?1"#
        )?;
        let records = stmt.query_map(params![limit as i64], |row| {
            let created: String = row.get(5)?;
            Ok(AnalysisRecord {
                id: row.get(0)?,
                content_type: row.get(1)?,
                credibility_score: row.get(2)?,
                verdict: row.get(3)?,
                analyzer: row.get(4)?,
                created_at: parse_timestamp(&created),
            })
        })?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}
