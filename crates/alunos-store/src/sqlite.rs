// ABOUTME: SQLite-backed student table with idempotent schema creation.
// ABOUTME: Uniqueness of matricula and email is enforced by the table constraints.

use std::path::Path;

use alunos_core::{NewStudent, Status, Student};
use chrono::NaiveDate;
use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

/// Errors raised by the storage layer. The message is the raw SQLite text,
/// e.g. `UNIQUE constraint failed: alunos.email`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

const SELECT_COLUMNS: &str = "SELECT id, nome, data_nascimento, matricula, status, email FROM alunos";

/// Handle to the student table. Opened once at startup and shared by all
/// request handlers for the life of the process.
pub struct StudentStore {
    conn: Connection,
}

impl StudentStore {
    /// Open or create the database at `path` and ensure the `alunos` table
    /// exists. An existing table is left untouched.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a private in-memory database with the same schema.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS alunos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                data_nascimento TEXT NOT NULL,
                matricula TEXT UNIQUE NOT NULL,
                status TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL
            );",
        )?;
        tracing::debug!("alunos table ready");
        Ok(Self { conn })
    }

    /// Insert a new row and return the id SQLite assigned to it.
    pub fn insert(&self, student: &NewStudent) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO alunos (nome, data_nascimento, matricula, status, email)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                student.name,
                student.birth_date.to_string(),
                student.enrollment_code,
                student.status.as_str(),
                student.email,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Every student, in whatever order SQLite returns them.
    pub fn list(&self) -> Result<Vec<Student>, StoreError> {
        let mut stmt = self.conn.prepare(SELECT_COLUMNS)?;
        let rows = stmt.query_map([], student_from_row)?;

        let mut students = Vec::new();
        for row in rows {
            students.push(row?);
        }
        Ok(students)
    }

    /// Look up one row. `id` is bound as given, so a text key such as `"1.0"`
    /// is compared under the column's integer affinity.
    pub fn get<I: ToSql>(&self, id: I) -> Result<Option<Student>, StoreError> {
        let student = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                student_from_row,
            )
            .optional()?;
        Ok(student)
    }

    /// Overwrite all five fields of row `id`. Returns false when no row
    /// matched; there is no separate existence check.
    pub fn update<I: ToSql>(&self, id: I, student: &NewStudent) -> Result<bool, StoreError> {
        let changed = self.conn.execute(
            "UPDATE alunos
             SET nome = ?1, data_nascimento = ?2, matricula = ?3, status = ?4, email = ?5
             WHERE id = ?6",
            params![
                student.name,
                student.birth_date.to_string(),
                student.enrollment_code,
                student.status.as_str(),
                student.email,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete row `id`. Returns false when no row matched.
    pub fn delete<I: ToSql>(&self, id: I) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM alunos WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    let birth_date: String = row.get(2)?;
    let birth_date = NaiveDate::parse_from_str(&birth_date, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let status: String = row.get(4)?;
    let status = status
        .parse::<Status>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        birth_date,
        enrollment_code: row.get(3)?,
        status,
        email: row.get(5)?,
    })
}
