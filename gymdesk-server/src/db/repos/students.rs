//! Student repository
//!
//! The four statements behind the front desk, plus single-row lookup and
//! count:
//! - list: plain SELECT in storage order (no ORDER BY)
//! - create: INSERT, id taken from `last_insert_rowid`
//! - update/delete: RETURNING the row, so an absent row is `NotFound`
//!   without a separate existence query. RETURNING statements are always
//!   stepped to completion (`fetch_all`) so the write finishes before the
//!   connection closes.
//!
//! Writes are committed once their statement finishes (autocommit), so a
//! failed close after a write is logged and the write still reported.

use gymdesk_core::{Student, StudentDraft, StudentId};
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use super::DbError;
use crate::db::Database;

/// Student repository
pub struct StudentRepo<'a> {
    db: &'a Database,
}

impl<'a> StudentRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every student in storage order.
    ///
    /// SQLite returns rowid order for this table, which matches insertion
    /// order, but no index guarantees it. An empty table yields an empty vec.
    pub async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query("SELECT id, nome, data_nasc, cpf FROM alunos")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        rows.iter().map(student_from_row).collect()
    }

    /// Single student by id
    pub async fn get(&self, id: StudentId) -> Result<Option<Student>, DbError> {
        let mut conn = self.db.connect().await?;
        let row = sqlx::query("SELECT id, nome, data_nasc, cpf FROM alunos WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut conn)
            .await?;
        conn.close().await?;

        row.as_ref().map(student_from_row).transpose()
    }

    /// Insert a student; the store assigns the id.
    pub async fn create(&self, draft: StudentDraft) -> Result<Student, DbError> {
        let mut conn = self.db.connect().await?;
        let result = sqlx::query("INSERT INTO alunos (nome, data_nasc, cpf) VALUES (?, ?, ?)")
            .bind(&draft.name)
            .bind(draft.birth_date_string())
            .bind(&draft.national_id)
            .execute(&mut conn)
            .await?;
        close_after_write(conn, "insert").await;

        let student = draft.into_student(StudentId::new(result.last_insert_rowid()));
        tracing::info!(id = %student.id, "student registered");
        Ok(student)
    }

    /// Overwrite name, birth date and national id of an existing student.
    ///
    /// Returns `DbError::NotFound` when no row has this id; nothing is
    /// written in that case.
    pub async fn update(&self, id: StudentId, draft: StudentDraft) -> Result<Student, DbError> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            UPDATE alunos SET nome = ?, data_nasc = ?, cpf = ?
            WHERE id = ?
            RETURNING id, nome, data_nasc, cpf
            "#,
        )
        .bind(&draft.name)
        .bind(draft.birth_date_string())
        .bind(&draft.national_id)
        .bind(id.get())
        .fetch_all(&mut conn)
        .await?;
        close_after_write(conn, "update").await;

        let student = rows
            .first()
            .map(student_from_row)
            .transpose()?
            .ok_or_else(|| DbError::student_not_found(id))?;

        tracing::info!(id = %id, "student updated");
        Ok(student)
    }

    /// Permanently remove a student, returning the removed record.
    ///
    /// Returns `DbError::NotFound` when no row has this id.
    pub async fn delete(&self, id: StudentId) -> Result<Student, DbError> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query("DELETE FROM alunos WHERE id = ? RETURNING id, nome, data_nasc, cpf")
            .bind(id.get())
            .fetch_all(&mut conn)
            .await?;
        close_after_write(conn, "delete").await;

        let student = rows
            .first()
            .map(student_from_row)
            .transpose()?
            .ok_or_else(|| DbError::student_not_found(id))?;

        tracing::info!(id = %id, "student deleted");
        Ok(student)
    }

    /// Number of stored students
    pub async fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.db.connect().await?;
        let row = sqlx::query("SELECT COUNT(*) AS count FROM alunos")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;

        Ok(row.try_get("count")?)
    }
}

async fn close_after_write(conn: SqliteConnection, write: &'static str) {
    log_close_failure(conn.close().await, write);
}

fn log_close_failure(result: Result<(), sqlx::Error>, write: &'static str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, write, "closing connection after committed write failed");
            false
        }
    }
}

fn student_from_row(row: &SqliteRow) -> Result<Student, DbError> {
    Ok(Student {
        id: StudentId::new(row.try_get("id")?),
        name: row.try_get("nome")?,
        birth_date: row.try_get("data_nasc")?,
        national_id: row.try_get("cpf")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;
    use chrono::NaiveDate;
    use tempfile::{tempdir, TempDir};

    async fn fresh_db() -> (TempDir, Database) {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("academia.db"));
        ensure_schema(&db).await.unwrap();
        (dir, db)
    }

    fn draft(name: &str, national_id: &str) -> StudentDraft {
        StudentDraft::new(
            name,
            NaiveDate::from_ymd_opt(2001, 5, 10).unwrap(),
            national_id,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() {
        let (_dir, db) = fresh_db().await;
        let students = StudentRepo::new(&db).list_all().await.unwrap();
        assert!(students.is_empty());
    }

    #[tokio::test]
    async fn create_adds_exactly_one_row() {
        let (_dir, db) = fresh_db().await;
        let repo = StudentRepo::new(&db);
        repo.create(draft("Bruno", "222")).await.unwrap();

        let before = repo.count().await.unwrap();
        let created = repo.create(draft("Ana Silva", "111.111.111-11")).await.unwrap();
        let after = repo.count().await.unwrap();

        assert_eq!(after, before + 1);
        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ana Silva");
        assert_eq!(fetched.birth_date, "2001-05-10");
        assert_eq!(fetched.national_id, "111.111.111-11");
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let (_dir, db) = fresh_db().await;
        let repo = StudentRepo::new(&db);
        for name in ["Carla", "Ana", "Bruno"] {
            repo.create(draft(name, "000")).await.unwrap();
        }

        let names: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Carla", "Ana", "Bruno"]);
    }

    #[tokio::test]
    async fn update_touches_only_target_row() {
        let (_dir, db) = fresh_db().await;
        let repo = StudentRepo::new(&db);
        let ana = repo.create(draft("Ana", "111")).await.unwrap();
        let bruno = repo.create(draft("Bruno", "222")).await.unwrap();

        let changed = StudentDraft::new(
            "Ana Souza",
            NaiveDate::from_ymd_opt(2002, 6, 11).unwrap(),
            "333",
        )
        .unwrap();
        let updated = repo.update(ana.id, changed).await.unwrap();

        assert_eq!(updated.id, ana.id);
        assert_eq!(updated.name, "Ana Souza");
        assert_eq!(updated.birth_date, "2002-06-11");
        assert_eq!(updated.national_id, "333");

        let all = repo.list_all().await.unwrap();
        assert_eq!(all, vec![updated, bruno]);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_changes_nothing() {
        let (_dir, db) = fresh_db().await;
        let repo = StudentRepo::new(&db);
        let ana = repo.create(draft("Ana", "111")).await.unwrap();

        let err = repo
            .update(StudentId::new(99), draft("Ghost", "999"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repo.list_all().await.unwrap(), vec![ana]);
    }

    #[tokio::test]
    async fn delete_removes_only_target_row() {
        let (_dir, db) = fresh_db().await;
        let repo = StudentRepo::new(&db);
        let ana = repo.create(draft("Ana", "111")).await.unwrap();
        let bruno = repo.create(draft("Bruno", "222")).await.unwrap();

        let removed = repo.delete(ana.id).await.unwrap();

        assert_eq!(removed, ana);
        assert_eq!(repo.list_all().await.unwrap(), vec![bruno]);
        assert!(repo.get(ana.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found_and_changes_nothing() {
        let (_dir, db) = fresh_db().await;
        let repo = StudentRepo::new(&db);
        let ana = repo.create(draft("Ana", "111")).await.unwrap();

        let err = repo.delete(StudentId::new(42)).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::NotFound { resource: "student", ref id } if id == "42"
        ));
        assert_eq!(repo.list_all().await.unwrap(), vec![ana]);
    }

    #[test]
    fn close_failure_after_write_is_only_logged() {
        assert!(log_close_failure(Ok(()), "insert"));
        assert!(!log_close_failure(Err(sqlx::Error::PoolClosed), "insert"));
    }

    #[tokio::test]
    async fn missing_table_is_storage_error() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("no_schema.db"));

        let err = StudentRepo::new(&db).list_all().await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
