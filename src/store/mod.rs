use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub mod models;
use models::*;

/// Thread-safe SQLite handle (single connection with mutex).
///
/// This replaces the source's browser-local-storage content store with a
/// durable keyed store; slug uniqueness is enforced by the schema.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    // ── Pages ─────────────────────────────────────────────────────────────────

    /// List all pages, most recently updated first
    pub fn list_pages(&self) -> Result<Vec<Page>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, slug, title, body, template, updated_at
             FROM pages ORDER BY updated_at DESC",
        )?;
        let pages = stmt
            .query_map([], map_page)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pages)
    }

    /// Look up one page by slug
    pub fn get_page(&self, slug: &str) -> Result<Option<Page>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, slug, title, body, template, updated_at
             FROM pages WHERE slug = ?1",
        )?;
        let mut rows = stmt.query_map(params![slug], map_page)?;
        match rows.next() {
            Some(page) => Ok(Some(page?)),
            None => Ok(None),
        }
    }

    /// Insert a new page. Fails when the slug is already taken (UNIQUE
    /// constraint); callers surface that as a conflict.
    pub fn create_page(&self, page: &Page) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO pages (slug, title, body, template, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                page.slug,
                page.title,
                page.body,
                page.template,
                page.updated_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Update an existing page by slug. Returns false when no such page.
    pub fn update_page(&self, slug: &str, title: &str, body: &str, template: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE pages SET title=?1, body=?2, template=?3, updated_at=?4 WHERE slug=?5",
            params![title, body, template, Utc::now(), slug],
        )?;
        Ok(changed > 0)
    }

    /// Delete a page by slug. Returns false when no such page.
    pub fn delete_page(&self, slug: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute("DELETE FROM pages WHERE slug=?1", params![slug])?;
        Ok(changed > 0)
    }

    // ── Contact messages ──────────────────────────────────────────────────────

    /// Record a contact-form submission
    pub fn record_contact(&self, msg: &ContactMessage) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO contact_messages (name, email, message, submitted_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![msg.name, msg.email, msg.message, msg.submitted_at],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List recent contact-form submissions
    pub fn list_recent_contacts(&self, limit: i64) -> Result<Vec<ContactMessage>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, email, message, submitted_at
             FROM contact_messages ORDER BY submitted_at DESC LIMIT ?1",
        )?;
        let messages = stmt
            .query_map(params![limit], map_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(messages)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

fn map_page(row: &rusqlite::Row) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        template: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn map_contact(row: &rusqlite::Row) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        message: row.get(3)?,
        submitted_at: row.get(4)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS pages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    slug        TEXT    NOT NULL UNIQUE,
    title       TEXT    NOT NULL,
    body        TEXT    NOT NULL,
    template    TEXT    NOT NULL DEFAULT 'page',
    updated_at  TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS contact_messages (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT    NOT NULL,
    email        TEXT    NOT NULL,
    message      TEXT    NOT NULL,
    submitted_at TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_template ON pages(template);
"#;
