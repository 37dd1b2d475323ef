use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, NewContact};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const MEMORY_URL: &str = "sqlite::memory:";
const FILE_URL_PREFIX: &str = "sqlite://";

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS contacts (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id  TEXT NOT NULL UNIQUE,
    doc TEXT NOT NULL
);
";

/// Contact repository storing each contact as a JSON document in SQLite.
///
/// `seq` preserves insertion order for listings; `id` is the store-assigned
/// contact identifier. The connection is shared behind a mutex and every
/// operation runs on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteContactRepository {
    conn: Arc<Mutex<Connection>>,
    location: String,
}

impl SqliteContactRepository {
    /// Open the store named by a database URL.
    ///
    /// Accepts `sqlite://<path>` and `sqlite::memory:`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnsupportedUrl` for any other URL, or the database
    /// error if the file cannot be opened.
    pub fn open_url(url: &str) -> StoreResult<Self> {
        if url == MEMORY_URL {
            return Self::open_in_memory();
        }

        match url.strip_prefix(FILE_URL_PREFIX) {
            Some(path) if !path.is_empty() => Self::open(path),
            _ => Err(StoreError::UnsupportedUrl(url.to_string())),
        }
    }

    /// Open or create a database file, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!("Opening contact store at {}", path.display());

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn, path.display().to_string())
    }

    /// Create an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, ":memory:".to_string())
    }

    fn init(conn: Connection, location: String) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        info!("Contact store ready at {}", location);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location,
        })
    }

    /// Where the database lives (`:memory:` for in-memory stores).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Run `op` against the connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

fn decode(doc: &str) -> StoreResult<Contact> {
    Ok(serde_json::from_str(doc)?)
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn create(&self, contact: &NewContact) -> StoreResult<Contact> {
        let contact = contact.with_id(ContactId::generate());
        let doc = serde_json::to_string(&contact)?;
        let id = contact.id.to_string();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO contacts (id, doc) VALUES (?1, ?2)",
                params![id, doc],
            )?;
            Ok(())
        })
        .await?;

        debug!("Inserted contact {}", contact.id);
        Ok(contact)
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT doc FROM contacts ORDER BY seq")?;
            let docs = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            docs.iter().map(|doc| decode(doc)).collect()
        })
        .await
    }

    async fn get(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let doc: Option<String> = conn
                .query_row("SELECT doc FROM contacts WHERE id = ?1", [&id], |row| {
                    row.get(0)
                })
                .optional()?;
            doc.as_deref().map(decode).transpose()
        })
        .await
    }

    async fn update(&self, id: &ContactId, contact: &NewContact) -> StoreResult<Option<Contact>> {
        let contact = contact.with_id(id.clone());
        let doc = serde_json::to_string(&contact)?;
        let key = id.to_string();

        let changed = self
            .with_conn(move |conn| {
                Ok(conn.execute(
                    "UPDATE contacts SET doc = ?2 WHERE id = ?1",
                    params![key, doc],
                )?)
            })
            .await?;

        if changed == 0 {
            return Ok(None);
        }
        debug!("Updated contact {}", contact.id);
        Ok(Some(contact))
    }

    async fn delete(&self, id: &ContactId) -> StoreResult<bool> {
        let key = id.to_string();
        let removed = self
            .with_conn(move |conn| Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", [&key])?))
            .await?;
        Ok(removed > 0)
    }
}

impl std::fmt::Debug for SqliteContactRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteContactRepository")
            .field("location", &self.location)
            .finish()
    }
}
