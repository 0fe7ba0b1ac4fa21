//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and reorder APIs over canonical `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Listing order is deterministic: `position ASC, id ASC`.
//! - Removal is a hard delete; `AUTOINCREMENT` keeps removed ids from being
//!   reassigned.

use crate::db::{migrations, DbError};
use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    name,
    is_done,
    deadline
FROM tasks";

const DB_DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_TASK_COLUMNS: &[&str] = &[
    "id",
    "name",
    "is_done",
    "deadline",
    "position",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for list of {len}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task store connection is not migrated: expected schema version \
                 {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "task store schema is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(
                    f,
                    "task store schema is missing required column `{table}.{column}`"
                )
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::IndexOutOfRange { .. }
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD and ordering operations.
pub trait TaskRepository {
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn add_task(&self, draft: &NewTask) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn remove_task(&self, id: TaskId) -> RepoResult<()>;
    fn reorder_task(&self, from_index: usize, to_index: usize) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection after verifying it carries the migrated task
    /// schema, so later operations can assume the `tasks` table shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_task_schema(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             ORDER BY position ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn add_task(&self, draft: &NewTask) -> RepoResult<Task> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let position = next_position(&tx)?;
        tx.execute(
            "INSERT INTO tasks (name, is_done, deadline, position)
             VALUES (?1, 0, ?2, ?3);",
            params![
                draft.name.as_str(),
                draft.deadline.map(date_to_db),
                position,
            ],
        )?;

        let id = tx.last_insert_rowid();
        let task = load_required_task(&tx, id)?;
        tx.commit()?;

        Ok(task)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                name = ?1,
                is_done = ?2,
                deadline = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                task.name.as_str(),
                bool_to_int(task.is_done),
                task.deadline.map(date_to_db),
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn remove_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn reorder_task(&self, from_index: usize, to_index: usize) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut ids = list_ordered_ids(&tx)?;

        let len = ids.len();
        if from_index >= len {
            return Err(RepoError::IndexOutOfRange {
                index: from_index,
                len,
            });
        }
        if to_index >= len {
            return Err(RepoError::IndexOutOfRange {
                index: to_index,
                len,
            });
        }

        let moved = ids.remove(from_index);
        ids.insert(to_index, moved);

        for (index, id) in ids.into_iter().enumerate() {
            tx.execute(
                "UPDATE tasks
                 SET position = ?2,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1;",
                params![id, index as i64],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_done value `{other}` in tasks.is_done"
            )));
        }
    };

    let deadline = match row.get::<_, Option<String>>("deadline")? {
        Some(value) => Some(parse_db_date(&value)?),
        None => None,
    };

    let task = Task {
        id: row.get("id")?,
        name: row.get("name")?,
        is_done,
        deadline,
    };
    task.validate()?;
    Ok(task)
}

fn load_required_task(conn: &Connection, id: TaskId) -> RepoResult<Task> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return parse_task_row(row);
    }
    Err(RepoError::NotFound(id))
}

fn list_ordered_ids(conn: &Connection) -> RepoResult<Vec<TaskId>> {
    let mut stmt = conn.prepare(
        "SELECT id
         FROM tasks
         ORDER BY position ASC, id ASC;",
    )?;

    let mut rows = stmt.query([])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        ids.push(row.get(0)?);
    }

    Ok(ids)
}

fn next_position(conn: &Connection) -> RepoResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks;",
        [],
        |row| row.get(0),
    )?;
    Ok(next)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DB_DATE_FORMAT).to_string()
}

fn parse_db_date(value: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DB_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid deadline value `{value}` in tasks.deadline"
        ))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_task_schema(conn: &Connection) -> RepoResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "tasks")? {
        return Err(RepoError::MissingRequiredTable("tasks"));
    }

    for &column in REQUIRED_TASK_COLUMNS {
        if !table_has_column(conn, "tasks", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*)
         FROM sqlite_master
         WHERE type = 'table'
           AND name = ?1;",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*)
         FROM pragma_table_info(?1)
         WHERE name = ?2;",
        params![table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
