use super::{delete_by_id, find, load_all, load_initial, save_all};
use crate::error::StorageError;
use crate::model::{NewTask, Task, TaskPatch};
use crate::schedule;
use crate::storage::Storage;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct TaskRepository {
    storage: Arc<Storage>,
}

/// Next free `order` slot in a project: one past the current maximum,
/// or 0 for an empty project
fn next_order(tasks: &[Task], project_id: &str) -> i64 {
    tasks
        .iter()
        .filter(|t| t.project_id == project_id)
        .map(|t| t.order)
        .max()
        .map_or(0, |max| max + 1)
}

impl TaskRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn all(&self) -> Result<Vec<Task>, StorageError> {
        load_all(&self.storage)
    }

    pub fn get(&self, id: &str) -> Result<Option<Task>, StorageError> {
        find(&self.storage, id)
    }

    /// Tasks of one project, sorted by `order`
    pub fn by_project(&self, project_id: &str) -> Result<Vec<Task>, StorageError> {
        let mut tasks = self.all()?;
        tasks.retain(|t| t.project_id == project_id);
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    /// Tasks whose due date falls on `date`
    pub fn by_date(&self, date: NaiveDate) -> Result<Vec<Task>, StorageError> {
        let mut tasks = self.all()?;
        tasks.retain(|t| t.due_day() == date);
        Ok(tasks)
    }

    pub fn overdue(&self, today: NaiveDate) -> Result<Vec<Task>, StorageError> {
        Ok(schedule::overdue(&self.all()?, today))
    }

    /// Distinct due dates, ascending
    pub fn dates_with_tasks(&self) -> Result<Vec<NaiveDate>, StorageError> {
        let dates: BTreeSet<NaiveDate> = self.all()?.iter().map(Task::due_day).collect();
        Ok(dates.into_iter().collect())
    }

    /// Create a task at the end of its project
    pub fn create(&self, new: NewTask) -> Result<Task, StorageError> {
        let mut tasks = self.all()?;
        let order = next_order(&tasks, &new.project_id);
        let task = Task::create(new, order);
        tasks.push(task.clone());
        save_all(&self.storage, &tasks)?;
        Ok(task)
    }

    pub fn update(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>, StorageError> {
        self.modify(id, |task| task.apply(patch))
    }

    pub fn toggle_complete(&self, id: &str) -> Result<Option<Task>, StorageError> {
        self.modify(id, |task| {
            task.completed = !task.completed;
            task.touch();
        })
    }

    /// Move a task to the end of `project_id`; a move within the same
    /// project sends the task to the end of its own list.
    pub fn move_to_project(&self, id: &str, project_id: &str) -> Result<Option<Task>, StorageError> {
        let mut tasks = self.all()?;
        let order = next_order(&tasks, project_id);
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.project_id = project_id.to_string();
        task.order = order;
        task.touch();
        let moved = task.clone();
        save_all(&self.storage, &tasks)?;
        Ok(Some(moved))
    }

    /// Rewrite `order` so that each listed task's order equals its index.
    ///
    /// Ids that are unknown or belong to another project are skipped.
    /// Returns the number of tasks rewritten.
    pub fn reorder(&self, project_id: &str, task_ids: &[String]) -> Result<usize, StorageError> {
        let mut tasks = self.all()?;
        let mut rewritten = 0;

        for (index, task_id) in task_ids.iter().enumerate() {
            match tasks
                .iter_mut()
                .find(|t| &t.id == task_id && t.project_id == project_id)
            {
                Some(task) => {
                    task.order = index as i64;
                    task.touch();
                    rewritten += 1;
                }
                None => {
                    tracing::warn!(task_id = %task_id, project_id, "skipping reorder of task outside project");
                }
            }
        }

        if rewritten > 0 {
            save_all(&self.storage, &tasks)?;
        }
        Ok(rewritten)
    }

    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        delete_by_id::<Task>(&self.storage, id)
    }

    /// Delete every task of a project and return the removed tasks
    pub fn delete_by_project(&self, project_id: &str) -> Result<Vec<Task>, StorageError> {
        let tasks = self.all()?;
        let (removed, kept): (Vec<Task>, Vec<Task>) =
            tasks.into_iter().partition(|t| t.project_id == project_id);
        if !removed.is_empty() {
            save_all(&self.storage, &kept)?;
        }
        Ok(removed)
    }

    pub fn load_initial(&self, initial: Vec<Task>) -> Result<bool, StorageError> {
        load_initial(&self.storage, initial)
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut Task)) -> Result<Option<Task>, StorageError> {
        let mut tasks = self.all()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        change(task);
        let updated = task.clone();
        save_all(&self.storage, &tasks)?;
        Ok(Some(updated))
    }
}
