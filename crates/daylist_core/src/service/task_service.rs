//! Task use-case service.
//!
//! # Responsibility
//! - Map list-screen gestures onto repository operations.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Mutating gestures re-read the stored task first; persisted state is the
//!   single source of truth.

use chrono::NaiveDate;

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};

/// Use-case service wrapper for task CRUD and ordering operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all tasks in display order.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Creates a task from single-entry add-box input.
    ///
    /// # Contract
    /// - Trims surrounding whitespace from `name`.
    /// - New tasks start not done, without a deadline, at the end of the
    ///   list.
    /// - Returns the stored task including its assigned ID.
    pub fn add_task(&self, name: impl Into<String>) -> RepoResult<Task> {
        let name = name.into();
        let draft = NewTask::new(name.trim());
        self.repo.add_task(&draft)
    }

    /// Gets one task by stable ID.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Flips the completion flag of the task with `id`.
    ///
    /// Returns the updated task, or `NotFound` when no task has that ID.
    pub fn toggle_task(&self, id: TaskId) -> RepoResult<Task> {
        let mut task = self.load_task(id)?;
        task.is_done = !task.is_done;
        self.repo.update_task(&task)?;
        Ok(task)
    }

    /// Replaces the name of the task with `id`.
    ///
    /// Trims the input like `add_task`; a blank result is rejected with a
    /// validation error before anything is written.
    pub fn rename_task(&self, id: TaskId, name: impl Into<String>) -> RepoResult<Task> {
        let name = name.into();
        let mut task = self.load_task(id)?;
        task.name = name.trim().to_string();
        self.repo.update_task(&task)?;
        Ok(task)
    }

    /// Sets or clears the deadline of the task with `id`.
    ///
    /// # Contract
    /// - `Some(date)` schedules the task for that day.
    /// - `None` clears a previously set deadline.
    pub fn schedule_task(&self, id: TaskId, deadline: Option<NaiveDate>) -> RepoResult<Task> {
        let mut task = self.load_task(id)?;
        task.deadline = deadline;
        self.repo.update_task(&task)?;
        Ok(task)
    }

    /// Updates an existing task by stable ID.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_task(&self, task: &Task) -> RepoResult<()> {
        self.repo.update_task(task)
    }

    /// Permanently removes the task with `id`.
    pub fn remove_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.remove_task(id)
    }

    /// Moves the task at `from_index` to `to_index`, shifting the tasks in
    /// between by one slot.
    pub fn reorder_task(&self, from_index: usize, to_index: usize) -> RepoResult<()> {
        self.repo.reorder_task(from_index, to_index)
    }

    fn load_task(&self, id: TaskId) -> RepoResult<Task> {
        self.repo.get_task(id)?.ok_or(RepoError::NotFound(id))
    }
}
