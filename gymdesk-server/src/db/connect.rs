//! SQLite connection handling
//!
//! There is no pool: every repository call opens its own connection and
//! lets it go when the call returns.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

/// How long a connection waits on a locked database file before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the SQLite file holding the `alunos` table.
///
/// Cheap to clone; holds only the path and connect options.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Point at a database file. Nothing is opened until the first operation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::new("bancodedados/academia.db");
    /// ensure_schema(&db).await?;
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);

        Self { path, options }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection.
    ///
    /// The caller owns it; dropping it closes the underlying handle.
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        tracing::trace!(path = %self.path.display(), "opening connection");
        self.options.connect().await
    }

    /// Create the parent directory of the database file if needed
    pub async fn prepare_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent).await
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;
    use tempfile::tempdir;

    #[tokio::test]
    async fn connect_creates_file() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("test.db"));

        let conn = db.connect().await.unwrap();
        conn.close().await.unwrap();

        assert!(db.path().exists());
    }

    #[tokio::test]
    async fn prepare_dir_creates_parents() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("nested").join("deeper").join("test.db"));

        db.prepare_dir().await.unwrap();

        assert!(dir.path().join("nested").join("deeper").is_dir());
    }

    #[tokio::test]
    async fn prepare_dir_accepts_bare_file_name() {
        let db = Database::new("academia.db");
        db.prepare_dir().await.unwrap();
    }
}
