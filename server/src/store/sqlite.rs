//! SQLite implementation of PageStore

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagesmith::models::{Block, Page, PageData};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::{PageStore, StoreError, StoreResult};

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS pages (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        -- Block ids come from the editor, so they are only unique per page.
        CREATE TABLE IF NOT EXISTS blocks (
            page_id TEXT NOT NULL REFERENCES pages(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            block_type TEXT NOT NULL,
            content TEXT NOT NULL,
            sort_order INTEGER NOT NULL,
            PRIMARY KEY (page_id, id)
        );

        CREATE INDEX IF NOT EXISTS idx_blocks_page_order ON blocks(page_id, sort_order);
        CREATE INDEX IF NOT EXISTS idx_pages_updated ON pages(updated_at);
        "#,
    )
}

fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
    clock: fn() -> i64,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, unix_millis)
    }

    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, unix_millis)
    }

    pub fn with_connection(conn: Connection, clock: fn() -> i64) -> StoreResult<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

/// Insert `blocks` for `page_id` in array order. `order` is the array index;
/// empty or repeated ids are replaced with fresh ones.
fn insert_blocks(tx: &Transaction<'_>, page_id: &str, blocks: &[Block]) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO blocks (page_id, id, block_type, content, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    let mut seen: HashSet<String> = HashSet::with_capacity(blocks.len());
    for (index, block) in blocks.iter().enumerate() {
        let id = if block.id.trim().is_empty() || seen.contains(&block.id) {
            Uuid::new_v4().to_string()
        } else {
            block.id.clone()
        };
        stmt.execute(params![page_id, &id, &block.block_type, &block.content, index as i64])?;
        seen.insert(id);
    }
    Ok(())
}

fn load_blocks(conn: &Connection, page_id: &str) -> rusqlite::Result<Vec<Block>> {
    let mut stmt = conn.prepare(
        "SELECT id, block_type, content, sort_order
         FROM blocks WHERE page_id = ?1 ORDER BY sort_order ASC",
    )?;

    let blocks = stmt
        .query_map(params![page_id], |row| {
            Ok(Block {
                id: row.get(0)?,
                block_type: row.get(1)?,
                content: row.get(2)?,
                order: row.get(3)?,
                page_id: Some(page_id.to_string()),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(blocks)
}

fn load_page(conn: &Connection, id: &str) -> StoreResult<Page> {
    let header = conn
        .query_row(
            "SELECT id, title, updated_at FROM pages WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?;

    let Some((id, title, updated_at)) = header else {
        return Err(StoreError::NotFound(id.to_string()));
    };

    let blocks = load_blocks(conn, &id)?;
    Ok(Page {
        id,
        title,
        blocks,
        updated_at,
    })
}

#[async_trait]
impl PageStore for SqliteStore {
    async fn create_page(&self, data: &PageData) -> StoreResult<Page> {
        let mut conn = self.conn()?;
        let id = Uuid::new_v4().to_string();
        let now = (self.clock)();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO pages (id, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![&id, &data.title, now, now],
        )?;
        insert_blocks(&tx, &id, &data.blocks)?;
        tx.commit()?;

        debug!(page_id = %id, blocks = data.blocks.len(), "created page");
        load_page(&conn, &id)
    }

    async fn load_page(&self, id: &str) -> StoreResult<Page> {
        let conn = self.conn()?;
        load_page(&conn, id)
    }

    async fn save_page(&self, id: &str, data: &PageData) -> StoreResult<Page> {
        if data.is_empty() {
            return Err(StoreError::EmptySave);
        }

        let mut conn = self.conn()?;
        let now = (self.clock)();

        let tx = conn.transaction()?;
        let updated = tx.execute(
            "UPDATE pages SET title = ?1, updated_at = ?2 WHERE id = ?3",
            params![&data.title, now, id],
        )?;
        if updated == 0 {
            // Dropping the transaction rolls it back.
            return Err(StoreError::NotFound(id.to_string()));
        }
        tx.execute("DELETE FROM blocks WHERE page_id = ?1", params![id])?;
        insert_blocks(&tx, id, &data.blocks)?;
        tx.commit()?;

        debug!(page_id = %id, blocks = data.blocks.len(), "saved page");
        load_page(&conn, id)
    }

    async fn list_pages(&self) -> StoreResult<Vec<Page>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, updated_at FROM pages ORDER BY updated_at DESC, created_at DESC",
        )?;

        let headers = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        headers
            .into_iter()
            .map(|(id, title, updated_at)| -> StoreResult<Page> {
                let blocks = load_blocks(&conn, &id)?;
                Ok(Page {
                    id,
                    title,
                    blocks,
                    updated_at,
                })
            })
            .collect()
    }
}
