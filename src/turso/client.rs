// Turso/libsql client - owns the embedded database and the shared connection
//
// All stores (aliases, feed posts) go through execute/query here so that
// constraint violations are classified in one place.

use libsql::{params::IntoParams, Builder, Connection, Database, Rows};
use std::path::{Path, PathBuf};

/// Database file name inside the data directory
const DB_FILE_NAME: &str = "silva.db";

/// SQLite primary result code for constraint violations
const SQLITE_CONSTRAINT: i32 = 19;
/// Extended result codes for UNIQUE and PRIMARY KEY violations
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Error types for database operations
#[derive(Debug, thiserror::Error)]
pub enum TursoError {
    /// Could not open the database or create its directory
    #[error("Database connection error: {0}")]
    Connection(String),
    /// Statement failed
    #[error("Database query error: {0}")]
    Query(String),
    /// Statement violated a UNIQUE or PRIMARY KEY constraint
    #[error("Database constraint violation: {0}")]
    Constraint(String),
}

impl From<libsql::Error> for TursoError {
    fn from(e: libsql::Error) -> Self {
        if is_constraint_violation(&e) {
            TursoError::Constraint(e.to_string())
        } else {
            TursoError::Query(e.to_string())
        }
    }
}

fn is_constraint_violation(e: &libsql::Error) -> bool {
    match e {
        libsql::Error::SqliteFailure(code, message) => {
            matches!(
                *code,
                SQLITE_CONSTRAINT | SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE
            ) || message.contains("constraint failed")
        }
        other => other.to_string().contains("UNIQUE constraint failed"),
    }
}

/// Embedded libsql database with a single shared connection
pub struct TursoClient {
    _db: Database,
    conn: Connection,
    db_path: PathBuf,
}

impl TursoClient {
    /// Open (or create) the database under `data_dir`.
    pub async fn new(data_dir: PathBuf) -> Result<Self, TursoError> {
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            TursoError::Connection(format!("Failed to create data dir {:?}: {}", data_dir, e))
        })?;

        let db_path = data_dir.join(DB_FILE_NAME);
        crate::debug!("Opening libsql database at {:?}", db_path);

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| TursoError::Connection(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| TursoError::Connection(e.to_string()))?;

        Ok(Self {
            _db: db,
            conn,
            db_path,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run a statement, returning the number of affected rows
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, TursoError> {
        self.conn.execute(sql, params).await.map_err(TursoError::from)
    }

    /// Run a query and hand back its rows
    pub async fn query(&self, sql: &str, params: impl IntoParams) -> Result<Rows, TursoError> {
        self.conn.query(sql, params).await.map_err(TursoError::from)
    }
}

impl std::fmt::Debug for TursoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TursoClient")
            .field("db_path", &self.db_path)
            .finish()
    }
}
