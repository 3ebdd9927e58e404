//! Planner facade
//!
//! Owns the store, the three repositories and the reminder service. This is
//! where the cross-collection rules live: references must point at existing
//! records, deletes cascade downwards, and every task change re-plans that
//! task's reminders.
//!
//! Every public operation holds the planner lock for its whole duration, so
//! a check and the writes that depend on it are never interleaved with
//! another operation.

use crate::bootstrap::InitialData;
use crate::calendar::{self, DayMarker};
use crate::config::PlannerConfig;
use crate::dashboard::{self, DashboardSummary, Progress};
use crate::error::{Result, StorageError, TaskboardError};
use crate::model::{
    Category, CategoryPatch, NewCategory, NewProject, NewTask, Project, ProjectPatch, Task,
    TaskPatch, local_now,
};
use crate::notifications::{NotificationService, Reminder, ReminderBook};
use crate::repository::{CategoryRepository, ProjectRepository, TaskRepository};
use crate::schedule;
use crate::storage::Storage;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// What a cascading delete removed besides the target itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub projects: usize,
    pub tasks: usize,
}

/// Which collections a bootstrap actually seeded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub categories: bool,
    pub projects: bool,
    pub tasks: bool,
}

pub struct Planner {
    storage: Arc<Storage>,
    categories: CategoryRepository,
    projects: ProjectRepository,
    tasks: TaskRepository,
    notifications: NotificationService,
    config: PlannerConfig,
    /// Set once a bootstrap has completed
    bootstrapped: AtomicBool,
    op_lock: Mutex<()>,
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TaskboardError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

impl Planner {
    /// Open the store named by the config (or an in-memory one) and load it.
    pub fn open(config: PlannerConfig) -> Result<Self> {
        let storage = match &config.data_file {
            Some(path) => Storage::new(path),
            None => Storage::in_memory(),
        };
        storage.init()?;
        Ok(Self::with_storage(Arc::new(storage), config))
    }

    pub fn with_storage(storage: Arc<Storage>, config: PlannerConfig) -> Self {
        let notifier = Box::new(ReminderBook::new(storage.clone()));
        Self {
            categories: CategoryRepository::new(storage.clone()),
            projects: ProjectRepository::new(storage.clone()),
            tasks: TaskRepository::new(storage.clone()),
            notifications: NotificationService::new(storage.clone(), notifier),
            storage,
            config,
            bootstrapped: AtomicBool::new(false),
            op_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(Storage::in_memory()), PlannerConfig::default())
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn exclusive(&self) -> Result<MutexGuard<'_, ()>> {
        self.op_lock
            .lock()
            .map_err(|_| TaskboardError::Storage(StorageError::Poisoned))
    }

    fn find_category(&self, id: &str) -> Result<Category> {
        self.categories
            .get(id)?
            .ok_or_else(|| TaskboardError::not_found("Category", id))
    }

    fn find_project(&self, id: &str) -> Result<Project> {
        self.projects
            .get(id)?
            .ok_or_else(|| TaskboardError::not_found("Project", id))
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub fn categories(&self) -> Result<Vec<Category>> {
        let _guard = self.exclusive()?;
        Ok(self.categories.all()?)
    }

    pub fn category(&self, id: &str) -> Result<Category> {
        let _guard = self.exclusive()?;
        self.find_category(id)
    }

    pub fn create_category(&self, new: NewCategory) -> Result<Category> {
        require_name("Category name", &new.name)?;
        let _guard = self.exclusive()?;
        let category = self.categories.create(new)?;
        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Category> {
        if let Some(name) = &patch.name {
            require_name("Category name", name)?;
        }
        let _guard = self.exclusive()?;
        self.categories
            .update(id, patch)?
            .ok_or_else(|| TaskboardError::not_found("Category", id))
    }

    /// Delete a category with all of its projects and their tasks
    pub fn delete_category(&self, id: &str) -> Result<CascadeReport> {
        let _guard = self.exclusive()?;
        self.find_category(id)?;

        let mut report = CascadeReport::default();
        for project in self.projects.by_category(id)? {
            report.tasks += self.remove_project_tasks(&project.id)?;
        }
        report.projects = self.projects.delete_by_category(id)?;
        self.categories.delete(id)?;

        tracing::info!(id, projects = report.projects, tasks = report.tasks, "category deleted");
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub fn projects(&self, category_id: Option<&str>) -> Result<Vec<Project>> {
        let _guard = self.exclusive()?;
        match category_id {
            Some(category_id) => Ok(self.projects.by_category(category_id)?),
            None => Ok(self.projects.all()?),
        }
    }

    pub fn project(&self, id: &str) -> Result<Project> {
        let _guard = self.exclusive()?;
        self.find_project(id)
    }

    pub fn create_project(&self, new: NewProject) -> Result<Project> {
        require_name("Project name", &new.name)?;
        let _guard = self.exclusive()?;
        self.find_category(&new.category_id)?;
        let project = self.projects.create(new)?;
        tracing::info!(id = %project.id, category = %project.category_id, "project created");
        Ok(project)
    }

    pub fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        if let Some(name) = &patch.name {
            require_name("Project name", name)?;
        }
        let _guard = self.exclusive()?;
        if let Some(category_id) = &patch.category_id {
            self.find_category(category_id)?;
        }
        self.projects
            .update(id, patch)?
            .ok_or_else(|| TaskboardError::not_found("Project", id))
    }

    /// Delete a project and its tasks; returns the number of tasks removed
    pub fn delete_project(&self, id: &str) -> Result<CascadeReport> {
        let _guard = self.exclusive()?;
        self.find_project(id)?;
        let tasks = self.remove_project_tasks(id)?;
        self.projects.delete(id)?;
        tracing::info!(id, tasks, "project deleted");
        Ok(CascadeReport { projects: 1, tasks })
    }

    fn remove_project_tasks(&self, project_id: &str) -> Result<usize> {
        let removed = self.tasks.delete_by_project(project_id)?;
        for task in &removed {
            self.forget_reminders(&task.id);
        }
        Ok(removed.len())
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub fn tasks(&self) -> Result<Vec<Task>> {
        let _guard = self.exclusive()?;
        Ok(self.tasks.all()?)
    }

    /// Tasks of a project in display order
    pub fn project_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        let _guard = self.exclusive()?;
        self.find_project(project_id)?;
        Ok(self.tasks.by_project(project_id)?)
    }

    /// Tasks due on `date`, ordered for the calendar
    pub fn tasks_on(&self, date: NaiveDate, today: NaiveDate) -> Result<Vec<Task>> {
        let _guard = self.exclusive()?;
        Ok(calendar::tasks_for_date(&self.tasks.by_date(date)?, date, today))
    }

    pub fn task(&self, id: &str) -> Result<Task> {
        let _guard = self.exclusive()?;
        self.tasks
            .get(id)?
            .ok_or_else(|| TaskboardError::not_found("Task", id))
    }

    pub fn create_task(&self, new: NewTask) -> Result<Task> {
        require_name("Task title", &new.title)?;
        let _guard = self.exclusive()?;
        self.find_project(&new.project_id)?;
        let task = self.tasks.create(new)?;
        tracing::info!(id = %task.id, project = %task.project_id, order = task.order, "task created");
        self.sync_reminders(&task);
        Ok(task)
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            require_name("Task title", title)?;
        }
        let _guard = self.exclusive()?;
        let task = self
            .tasks
            .update(id, patch)?
            .ok_or_else(|| TaskboardError::not_found("Task", id))?;
        self.sync_reminders(&task);
        Ok(task)
    }

    pub fn toggle_task(&self, id: &str) -> Result<Task> {
        let _guard = self.exclusive()?;
        let task = self
            .tasks
            .toggle_complete(id)?
            .ok_or_else(|| TaskboardError::not_found("Task", id))?;
        tracing::debug!(id, completed = task.completed, "task toggled");
        self.sync_reminders(&task);
        Ok(task)
    }

    /// Move a task to the end of a project (its own project included)
    pub fn move_task(&self, id: &str, project_id: &str) -> Result<Task> {
        let _guard = self.exclusive()?;
        self.find_project(project_id)?;
        let task = self
            .tasks
            .move_to_project(id, project_id)?
            .ok_or_else(|| TaskboardError::not_found("Task", id))?;
        self.sync_reminders(&task);
        Ok(task)
    }

    /// Rewrite the order of a project's tasks to match `task_ids`
    pub fn reorder_tasks(&self, project_id: &str, task_ids: &[String]) -> Result<usize> {
        let _guard = self.exclusive()?;
        self.find_project(project_id)?;
        Ok(self.tasks.reorder(project_id, task_ids)?)
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        let _guard = self.exclusive()?;
        if !self.tasks.delete(id)? {
            return Err(TaskboardError::not_found("Task", id));
        }
        self.forget_reminders(id);
        tracing::info!(id, "task deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    pub fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary> {
        let _guard = self.exclusive()?;
        Ok(dashboard::summarize(
            &self.tasks.all()?,
            today,
            self.config.upcoming,
        ))
    }

    pub fn overdue(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let _guard = self.exclusive()?;
        Ok(self.tasks.overdue(today)?)
    }

    pub fn due_today(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let _guard = self.exclusive()?;
        let mut tasks = self.tasks.all()?;
        tasks.retain(|t| schedule::is_due_today(t, today));
        Ok(tasks)
    }

    /// Calendar markers, optionally limited to one month
    pub fn calendar(&self, month: Option<(i32, u32)>, today: NaiveDate) -> Result<Vec<DayMarker>> {
        let _guard = self.exclusive()?;
        let tasks = self.tasks.all()?;
        Ok(match month {
            Some((year, month)) => calendar::month_markers(&tasks, year, month, today),
            None => calendar::day_markers(&tasks, today),
        })
    }

    pub fn dates_with_tasks(&self) -> Result<Vec<NaiveDate>> {
        let _guard = self.exclusive()?;
        Ok(self.tasks.dates_with_tasks()?)
    }

    pub fn project_progress(&self) -> Result<HashMap<String, Progress>> {
        let _guard = self.exclusive()?;
        Ok(dashboard::project_progress(&self.tasks.all()?))
    }

    pub fn category_project_counts(&self) -> Result<HashMap<String, usize>> {
        let _guard = self.exclusive()?;
        Ok(dashboard::category_project_counts(&self.projects.all()?))
    }

    // ------------------------------------------------------------------
    // Reminders
    // ------------------------------------------------------------------

    pub fn reminders(&self) -> Result<Vec<Reminder>> {
        let _guard = self.exclusive()?;
        Ok(self.notifications.pending()?)
    }

    pub fn notifications_enabled(&self) -> Result<bool> {
        let _guard = self.exclusive()?;
        Ok(self.notifications.is_enabled()?)
    }

    /// Toggle reminders. Enabling re-plans every task; returns the number of
    /// reminders now pending.
    pub fn set_notifications(&self, enabled: bool) -> Result<usize> {
        let _guard = self.exclusive()?;
        self.notifications.set_enabled(enabled)?;
        if enabled {
            self.replan_all()?;
        }
        Ok(self.notifications.pending()?.len())
    }

    /// Re-plan reminders for every task against the current time
    pub fn refresh_reminders(&self) -> Result<usize> {
        let _guard = self.exclusive()?;
        self.replan_all()
    }

    fn replan_all(&self) -> Result<usize> {
        if !self.config.notifications {
            return Ok(0);
        }
        Ok(self
            .notifications
            .check_all(&self.tasks.all()?, local_now())?)
    }

    fn sync_reminders(&self, task: &Task) {
        if !self.config.notifications {
            return;
        }
        if let Err(e) = self.notifications.sync_task(task, local_now()) {
            tracing::warn!(task_id = %task.id, error = %e, "failed to schedule reminders");
        }
    }

    fn forget_reminders(&self, task_id: &str) {
        if let Err(e) = self.notifications.cancel_task(task_id) {
            tracing::warn!(task_id, error = %e, "failed to cancel reminders");
        }
    }

    // ------------------------------------------------------------------
    // Bootstrap
    // ------------------------------------------------------------------

    /// Seed empty collections from initial data.
    ///
    /// Once a bootstrap has succeeded later calls return `None`; a failed
    /// one may be retried.
    pub fn bootstrap(&self, data: InitialData) -> Result<Option<BootstrapReport>> {
        let _guard = self.exclusive()?;
        if self.bootstrapped.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let report = BootstrapReport {
            categories: self.categories.load_initial(data.categories)?,
            projects: self.projects.load_initial(data.projects)?,
            tasks: self.tasks.load_initial(data.tasks)?,
        };
        self.bootstrapped.store(true, Ordering::SeqCst);

        if report.tasks {
            self.replan_all()?;
        }
        tracing::info!(?report, "initial data applied");
        Ok(Some(report))
    }
}
