//! SQLite persistence for the complaint desk.
//!
//! RULE: only store.rs talks to the database. The desk sees it through
//! `ComplaintPersistence` and nothing else.

use chrono::{DateTime, Utc};
use complaint_desk_core::{
    classifier::Classification, complaint::Complaint, persistence::ComplaintPersistence,
    types::{Category, Priority, Status},
};
use rusqlite::{params, Connection};

pub struct SqliteComplaintStore {
    conn: Connection,
}

/// Raw row before label and timestamp parsing.
struct ComplaintRow {
    complaint_id: String,
    customer_name: Option<String>,
    text: String,
    category: String,
    priority: String,
    status: String,
    confidence: f64,
    matched_keywords: String,
    created_at: String,
}

impl ComplaintRow {
    fn into_complaint(self) -> anyhow::Result<Complaint> {
        let classification = Classification {
            category: self.category.parse::<Category>()?,
            confidence: self.confidence,
            priority: self.priority.parse::<Priority>()?,
            matched_keywords: serde_json::from_str(&self.matched_keywords)?,
        };
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| anyhow::anyhow!("Bad created_at '{}': {e}", self.created_at))?
            .with_timezone(&Utc);
        Ok(Complaint::rehydrate(
            self.complaint_id,
            self.customer_name,
            self.text,
            classification,
            self.status.parse::<Status>()?,
            created_at,
        ))
    }
}

impl SqliteComplaintStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; in-memory databases ignore it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> anyhow::Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_complaints.sql"))?;
        Ok(())
    }

    pub fn complaint_count(&self) -> anyhow::Result<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM complaint", [], |row| row.get(0))?;
        Ok(n)
    }
}

impl ComplaintPersistence for SqliteComplaintStore {
    fn load(&self) -> anyhow::Result<Vec<Complaint>> {
        let mut stmt = self.conn.prepare(
            "SELECT complaint_id, customer_name, text, category, priority, status,
                    confidence, matched_keywords, created_at
             FROM complaint ORDER BY seq ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ComplaintRow {
                    complaint_id: row.get(0)?,
                    customer_name: row.get(1)?,
                    text: row.get(2)?,
                    category: row.get(3)?,
                    priority: row.get(4)?,
                    status: row.get(5)?,
                    confidence: row.get(6)?,
                    matched_keywords: row.get(7)?,
                    created_at: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ComplaintRow::into_complaint).collect()
    }

    /// Replace the table contents in one transaction.
    fn save(&self, complaints: &[Complaint]) -> anyhow::Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM complaint", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO complaint (
                    complaint_id, customer_name, text, category, priority, status,
                    confidence, matched_keywords, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for c in complaints {
                stmt.execute(params![
                    c.id(),
                    c.customer_name(),
                    c.text(),
                    c.category().label(),
                    c.priority().label(),
                    c.status().label(),
                    c.confidence(),
                    serde_json::to_string(c.matched_keywords())?,
                    c.created_at().to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("saved {} complaints to sqlite", complaints.len());
        Ok(())
    }
}
