//! Schema bootstrap for the student table

use sqlx::Connection;

use super::connect::Database;
use super::repos::DbError;

/// Create the `alunos` table if it does not exist yet.
///
/// Idempotent: calling it on an existing database is a no-op. Also creates
/// the directory holding the database file.
pub async fn ensure_schema(db: &Database) -> Result<(), DbError> {
    db.prepare_dir().await?;

    let mut conn = db.connect().await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alunos (
            id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            data_nasc TEXT NOT NULL,
            cpf TEXT NOT NULL
        )
        "#,
    )
    .execute(&mut conn)
    .await?;
    conn.close().await?;

    tracing::debug!(path = %db.path().display(), "student schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("bancodedados").join("academia.db"));

        ensure_schema(&db).await.unwrap();
        ensure_schema(&db).await.unwrap();

        assert!(db.path().exists());
    }

    #[tokio::test]
    async fn ensure_schema_creates_expected_columns() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("test.db"));
        ensure_schema(&db).await.unwrap();

        let mut conn = db.connect().await.unwrap();
        let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('alunos')")
            .fetch_all(&mut conn)
            .await
            .unwrap();
        let names: Vec<_> = columns.into_iter().map(|(name,)| name).collect();

        assert_eq!(names, ["id", "nome", "data_nasc", "cpf"]);
    }
}
