//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, gesture-level task functions to Dart via FRB.
//! - Keep error semantics simple for the list-screen UI.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Errors surface as `ok = false` envelopes with a UTF-8 message.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use daylist_core::db::open_db;
use daylist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    SqliteTaskRepository, Task, TaskService,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const TASK_DB_FILE_NAME: &str = "daylist_tasks.sqlite3";
const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
static TASK_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiTask {
    /// Store-assigned stable task ID.
    pub id: i64,
    /// Display name shown in the list.
    pub name: String,
    /// Completion flag.
    pub is_done: bool,
    /// Optional due date as `YYYY-MM-DD`; absent when unscheduled.
    pub deadline: Option<String>,
}

/// List response envelope for the task screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in display order (empty on error or empty store).
    pub items: Vec<FfiTask>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for task gestures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// The affected task, when the operation produces one.
    pub task: Option<FfiTask>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task: Option<FfiTask>) -> Self {
        Self {
            ok: true,
            task,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Lists all tasks in display order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - On failure returns an empty list plus a diagnostic message.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> TaskListResponse {
    match with_task_service(|service| service.list_tasks()) {
        Ok(tasks) => {
            let items = tasks.into_iter().map(to_ffi_task).collect::<Vec<_>>();
            let message = format!("Loaded {} task(s).", items.len());
            TaskListResponse { items, message }
        }
        Err(err) => {
            log::warn!("event=task_list module=ffi status=error");
            TaskListResponse {
                items: Vec::new(),
                message: format!("list_tasks failed: {err}"),
            }
        }
    }
}

/// Creates a task from the add-box text.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the stored task including its assigned ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(name: String) -> TaskActionResponse {
    match with_task_service(|service| service.add_task(name.as_str())) {
        Ok(task) => TaskActionResponse::success("Task added.", Some(to_ffi_task(task))),
        Err(err) => action_failure("add_task", err),
    }
}

/// Flips the completion flag of the task with `id`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the updated task on success.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(id: i64) -> TaskActionResponse {
    match with_task_service(|service| service.toggle_task(id)) {
        Ok(task) => TaskActionResponse::success("Task toggled.", Some(to_ffi_task(task))),
        Err(err) => action_failure("toggle_task", err),
    }
}

/// Replaces the name of the task with `id` using edit-dialog text.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the updated task on success.
#[flutter_rust_bridge::frb(sync)]
pub fn rename_task(id: i64, name: String) -> TaskActionResponse {
    match with_task_service(|service| service.rename_task(id, name.as_str())) {
        Ok(task) => TaskActionResponse::success("Task renamed.", Some(to_ffi_task(task))),
        Err(err) => action_failure("rename_task", err),
    }
}

/// Sets or clears the deadline of the task with `id`.
///
/// Input semantics:
/// - `deadline`: `YYYY-MM-DD` sets the date; `None` or blank clears it.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Malformed dates are rejected without touching the store.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_task(id: i64, deadline: Option<String>) -> TaskActionResponse {
    let parsed = match parse_deadline_input(deadline.as_deref()) {
        Ok(value) => value,
        Err(message) => return TaskActionResponse::failure(message),
    };
    let scheduled = parsed.is_some();

    match with_task_service(|service| service.schedule_task(id, parsed)) {
        Ok(task) => {
            let message = if scheduled {
                "Task scheduled."
            } else {
                "Deadline cleared."
            };
            TaskActionResponse::success(message, Some(to_ffi_task(task)))
        }
        Err(err) => action_failure("schedule_task", err),
    }
}

/// Permanently removes the task with `id`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Removal is a hard delete; the ID is never reassigned.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_task(id: i64) -> TaskActionResponse {
    match with_task_service(|service| service.remove_task(id)) {
        Ok(()) => TaskActionResponse::success("Task removed.", None),
        Err(err) => action_failure("remove_task", err),
    }
}

/// Moves the task at `from_index` to `to_index` in display order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Out-of-range indices are rejected with `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn reorder_task(from_index: u32, to_index: u32) -> TaskActionResponse {
    match with_task_service(|service| {
        service.reorder_task(from_index as usize, to_index as usize)
    }) {
        Ok(()) => TaskActionResponse::success("Task moved.", None),
        Err(err) => action_failure("reorder_task", err),
    }
}

fn action_failure(op: &'static str, err: impl std::fmt::Display) -> TaskActionResponse {
    log::warn!("event=task_action module=ffi status=error op={op}");
    TaskActionResponse::failure(format!("{op} failed: {err}"))
}

fn parse_deadline_input(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, WIRE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("invalid deadline `{trimmed}`; expected YYYY-MM-DD"))
}

fn resolve_task_db_path() -> PathBuf {
    TASK_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DAYLIST_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TASK_DB_FILE_NAME)
        })
        .clone()
}

fn with_task_service<T>(
    f: impl FnOnce(&TaskService<SqliteTaskRepository<'_>>) -> daylist_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_task_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("task DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&conn)
        .map_err(|err| format!("task repo init failed: {err}"))?;
    let service = TaskService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn to_ffi_task(task: Task) -> FfiTask {
    FfiTask {
        id: task.id,
        name: task.name,
        is_done: task.is_done,
        deadline: task
            .deadline
            .map(|date| date.format(WIRE_DATE_FORMAT).to_string()),
    }
}
