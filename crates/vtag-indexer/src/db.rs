use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

pub struct Db {
    conn: Mutex<Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub batch_id: u64,
    pub name: String,
    pub brand: String,
    pub serial_count: u32,
    pub ledger: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRow {
    pub commitment: [u8; 32],
    pub batch_id: u64,
    pub authentic: bool,
    pub caller: String,
    pub ledger: u64,
}

impl Db {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS products (
                batch_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                brand TEXT NOT NULL,
                serial_count INTEGER NOT NULL,
                ledger INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS verifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                commitment BLOB NOT NULL,
                batch_id INTEGER NOT NULL,
                authentic INTEGER NOT NULL,
                caller TEXT NOT NULL,
                ledger INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS verifications_by_commitment
                ON verifications (commitment);
            CREATE TABLE IF NOT EXISTS sync_cursor (
                topic TEXT PRIMARY KEY,
                last_ledger INTEGER NOT NULL,
                last_cursor TEXT
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // A registration event may be re-delivered after a cursor reset;
    // batch ids are unique on-chain so re-inserts are ignored.
    pub fn insert_product(&self, row: &ProductRow) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO products (batch_id, name, brand, serial_count, ledger)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.batch_id as i64,
                row.name,
                row.brand,
                row.serial_count as i64,
                row.ledger as i64
            ],
        )?;
        Ok(())
    }

    pub fn get_product(&self, batch_id: u64) -> rusqlite::Result<Option<ProductRow>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT name, brand, serial_count, ledger FROM products WHERE batch_id = ?1",
            params![batch_id as i64],
            |row| {
                Ok(ProductRow {
                    batch_id,
                    name: row.get(0)?,
                    brand: row.get(1)?,
                    serial_count: row.get::<_, i64>(2)? as u32,
                    ledger: row.get::<_, i64>(3)? as u64,
                })
            },
        )
        .optional()
    }

    pub fn insert_verification(&self, row: &VerificationRow) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO verifications (commitment, batch_id, authentic, caller, ledger)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.commitment.as_slice(),
                row.batch_id as i64,
                row.authentic as i64,
                row.caller,
                row.ledger as i64
            ],
        )?;
        Ok(())
    }

    pub fn verifications_for(&self, commitment: &[u8; 32]) -> rusqlite::Result<Vec<VerificationRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT batch_id, authentic, caller, ledger FROM verifications
             WHERE commitment = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![commitment.as_slice()], |row| {
                Ok(VerificationRow {
                    commitment: *commitment,
                    batch_id: row.get::<_, i64>(0)? as u64,
                    authentic: row.get::<_, i64>(1)? != 0,
                    caller: row.get(2)?,
                    ledger: row.get::<_, i64>(3)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn is_serial_verified(&self, commitment: &[u8; 32]) -> rusqlite::Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM verifications WHERE commitment = ?1 AND authentic = 1",
            params![commitment.as_slice()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// (total products, total authentic verifications) as observed on-chain
    pub fn stats(&self) -> rusqlite::Result<(u64, u64)> {
        let conn = self.conn.lock().unwrap();
        let products: i64 =
            conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        let verifications: i64 = conn.query_row(
            "SELECT COUNT(*) FROM verifications WHERE authentic = 1",
            [],
            |row| row.get(0),
        )?;
        Ok((products as u64, verifications as u64))
    }

    pub fn save_cursor(
        &self,
        topic: &str,
        last_ledger: u64,
        cursor: Option<&str>,
    ) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO sync_cursor (topic, last_ledger, last_cursor)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(topic) DO UPDATE SET last_ledger = ?2, last_cursor = ?3",
            params![topic, last_ledger as i64, cursor],
        )?;
        Ok(())
    }

    pub fn load_cursor(&self, topic: &str) -> rusqlite::Result<Option<(u64, Option<String>)>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT last_ledger, last_cursor FROM sync_cursor WHERE topic = ?1",
            params![topic],
            |row| {
                let ledger: i64 = row.get(0)?;
                let cursor: Option<String> = row.get(1)?;
                Ok((ledger as u64, cursor))
            },
        )
        .optional()
    }
}
